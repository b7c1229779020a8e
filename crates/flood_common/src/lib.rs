//! Shared types for the flood dispatch daemon and its operator CLI.

pub mod error;
pub mod export;
pub mod request;

pub use error::FloodError;
pub use export::{render_daily_log, DAILY_LOG_HEADER};
pub use request::{
    DispatchResponse, EmergencyRequest, ErrorResponse, ExportResponse, HealthResponse,
    MessageResponse, Priority, ReportPayload, ReportResponse, StatusResponse, UndoResponse,
    ValidReport,
};

/// Crate version, shared by daemon and CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the daemon listens on unless configured otherwise
pub const DEFAULT_PORT: u16 = 3000;

/// Ledger of every reported request (JSON array)
pub const LEDGER_FILE: &str = "logs.json";

/// Flat export of the ledger
pub const EXPORT_FILE: &str = "daily_log.csv";

pub mod paths {
    pub const REPORT: &str = "/report";
    pub const DISPATCH: &str = "/dispatch";
    pub const UNDO: &str = "/undo";
    pub const GENERATE_DAILY_LOG: &str = "/generate-daily-log";
    pub const HEALTH: &str = "/health";
    pub const STATUS: &str = "/status";
}
