//! Subcommand implementations.

use crate::client::FloodClient;
use anyhow::Result;
use flood_common::{
    paths, DispatchResponse, EmergencyRequest, ExportResponse, ReportResponse, StatusResponse,
    UndoResponse,
};
use owo_colors::OwoColorize;
use reqwest::Method;
use serde_json::{json, Number};

/// Parse a priority the way the daemon will store it (`5` stays an integer)
pub fn parse_priority(raw: &str) -> Result<Number, String> {
    raw.parse::<Number>()
        .map_err(|_| format!("'{}' is not a number", raw))
}

pub async fn report(client: &FloodClient, description: String, priority: Number) -> Result<()> {
    let body = json!({ "description": description, "priority": priority });
    let response: ReportResponse = client.call(Method::POST, paths::REPORT, Some(body)).await?;

    println!("{} {}", "✓".green(), response.message);
    print_request(&response.new_request);
    Ok(())
}

pub async fn dispatch(client: &FloodClient) -> Result<()> {
    let response: DispatchResponse = client.call(Method::GET, paths::DISPATCH, None).await?;

    println!("{} {}", "→".cyan(), response.message);
    print_request(&response.service);
    Ok(())
}

pub async fn undo(client: &FloodClient) -> Result<()> {
    let response: UndoResponse = client.call(Method::POST, paths::UNDO, None).await?;

    println!("{} {}", "↺".yellow(), response.message);
    print_request(&response.last_dispatched);
    Ok(())
}

pub async fn export(client: &FloodClient) -> Result<()> {
    let response: ExportResponse = client
        .call(Method::GET, paths::GENERATE_DAILY_LOG, None)
        .await?;

    println!("{} {}: {}", "✓".green(), response.message, response.file_path.bold());
    Ok(())
}

pub async fn status(client: &FloodClient, json: bool) -> Result<()> {
    let response: StatusResponse = client.call(Method::GET, paths::STATUS, None).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{} ({})", "Pending".bold(), response.pending.len());
    if response.pending.is_empty() {
        println!("  {}", "nothing pending".dimmed());
    }
    for request in &response.pending {
        print_request(request);
    }

    println!();
    println!("{} ({})", "Dispatched".bold(), response.dispatched.len());
    if response.dispatched.is_empty() {
        println!("  {}", "nothing dispatched".dimmed());
    }
    // Most recent first: that is what undo returns next
    for request in response.dispatched.iter().rev() {
        print_request(request);
    }
    Ok(())
}

fn print_request(request: &EmergencyRequest) {
    println!(
        "  [{}] {} {}",
        request.priority.to_string().bold(),
        request.description,
        format!("#{}", request.id).dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority_keeps_integers() {
        assert_eq!(parse_priority("5").unwrap().to_string(), "5");
        assert_eq!(parse_priority("-2").unwrap().to_string(), "-2");
        assert_eq!(parse_priority("2.5").unwrap().to_string(), "2.5");
        assert!(parse_priority("high").is_err());
    }
}
