//! Dispatch service - owns the queue, the dispatch stack and the ledger.
//!
//! One instance is built at startup and shared with the HTTP handlers
//! behind a single lock, so each operation runs to completion before the
//! next one starts.

use crate::config::StorageConfig;
use crate::ids::RequestIdGenerator;
use crate::ledger::LedgerStore;
use crate::queue::PriorityQueue;
use crate::stack::DispatchStack;
use flood_common::{
    render_daily_log, EmergencyRequest, FloodError, ReportPayload, StatusResponse,
};
use tracing::{info, warn};

pub struct DispatchService {
    queue: PriorityQueue,
    stack: DispatchStack,
    ledger: LedgerStore,
    ids: RequestIdGenerator,
}

impl DispatchService {
    pub fn new(ledger: LedgerStore, ids: RequestIdGenerator) -> Self {
        Self {
            queue: PriorityQueue::new(),
            stack: DispatchStack::new(),
            ledger,
            ids,
        }
    }

    /// Open the ledger and resume id allocation after its highest id.
    /// The queue and stack always start empty.
    pub async fn open(storage: &StorageConfig) -> Result<Self, FloodError> {
        let ledger =
            LedgerStore::open(&storage.logs_dir, &storage.ledger_file, &storage.export_file)
                .await?;
        let entries = ledger.read_all().await?;
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        info!(
            "Ledger loaded from {}: {} entries, last id {}",
            ledger.ledger_path().display(),
            entries.len(),
            last_id
        );
        Ok(Self::new(ledger, RequestIdGenerator::resume_after(last_id)))
    }

    /// Validate, record in the ledger, then queue by priority.
    ///
    /// The ledger is written first: a failed write leaves the queue untouched.
    pub async fn report(&mut self, payload: ReportPayload) -> Result<EmergencyRequest, FloodError> {
        let report = payload.validate().map_err(|e| {
            warn!("Rejected report: {}", e);
            e
        })?;

        let request =
            EmergencyRequest::new(self.ids.next_id()?, report.description, report.priority);
        self.ledger.append(&request).await?;
        self.queue.enqueue(request.clone());

        info!(
            id = request.id,
            priority = %request.priority,
            pending = self.queue.len(),
            "Request reported: {}",
            request.description
        );
        Ok(request)
    }

    /// Move the highest-priority pending request onto the dispatch stack
    pub fn dispatch(&mut self) -> Result<EmergencyRequest, FloodError> {
        let request = self.queue.dispatch_top().ok_or_else(|| {
            warn!("Dispatch requested with nothing pending");
            FloodError::QueueEmpty
        })?;
        self.stack.push(request.clone());

        info!(
            id = request.id,
            priority = %request.priority,
            dispatched = self.stack.len(),
            "Service dispatched"
        );
        Ok(request)
    }

    /// Return the most recently dispatched request to the queue
    pub fn undo(&mut self) -> Result<EmergencyRequest, FloodError> {
        let request = self.stack.pop().ok_or_else(|| {
            warn!("Undo requested with nothing dispatched");
            FloodError::NothingToUndo
        })?;
        self.queue.enqueue(request.clone());

        info!(id = request.id, priority = %request.priority, "Dispatch undone");
        Ok(request)
    }

    /// Regenerate the CSV export from the full ledger. Returns the export file name.
    pub async fn generate_daily_log(&self) -> Result<String, FloodError> {
        let entries = self.ledger.read_all().await?;
        self.ledger
            .write_export(&render_daily_log(&entries)?)
            .await?;

        info!(
            rows = entries.len(),
            "Daily log generated at {}",
            self.ledger.export_path().display()
        );
        Ok(self.ledger.export_file_name())
    }

    pub fn snapshot(&self) -> StatusResponse {
        StatusResponse {
            pending: self.queue.to_vec(),
            dispatched: self.stack.to_vec(),
        }
    }

    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }

    pub fn stack(&self) -> &DispatchStack {
        &self.stack
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn service(dir: &TempDir) -> DispatchService {
        let storage = StorageConfig {
            logs_dir: dir.path().join("logs"),
            ..StorageConfig::default()
        };
        DispatchService::open(&storage).await.unwrap()
    }

    fn payload(value: serde_json::Value) -> ReportPayload {
        serde_json::from_value(value).unwrap()
    }

    fn pending(service: &DispatchService) -> Vec<(String, String)> {
        service
            .queue()
            .iter()
            .map(|r| (r.description.clone(), r.priority.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_report_dispatch_undo_scenario() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir).await;

        service
            .report(payload(json!({"description": "fire", "priority": 5})))
            .await
            .unwrap();
        service
            .report(payload(json!({"description": "cat stuck", "priority": 2})))
            .await
            .unwrap();
        assert_eq!(
            pending(&service),
            vec![
                ("fire".to_string(), "5".to_string()),
                ("cat stuck".to_string(), "2".to_string())
            ]
        );

        let dispatched = service.dispatch().unwrap();
        assert_eq!(dispatched.description, "fire");
        assert_eq!(service.queue().len(), 1);
        assert_eq!(service.snapshot().dispatched, vec![dispatched.clone()]);

        let undone = service.undo().unwrap();
        assert_eq!(undone, dispatched);
        assert!(service.stack().is_empty());
        assert_eq!(
            service.queue().iter().next().map(|r| r.id),
            Some(dispatched.id)
        );
        assert_eq!(service.queue().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_report_mutates_nothing() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir).await;

        let err = service
            .report(payload(json!({"priority": "high"})))
            .await
            .unwrap_err();
        assert!(matches!(err, FloodError::InvalidInput(_)));
        assert!(service.queue().is_empty());
        assert!(service.ledger().read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_ledger_write_leaves_queue_untouched() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir).await;
        std::fs::write(service.ledger().ledger_path(), "{oops").unwrap();

        let err = service
            .report(payload(json!({"description": "fire", "priority": 5})))
            .await
            .unwrap_err();
        assert!(matches!(err, FloodError::Json(_)));
        assert!(service.queue().is_empty());
    }

    #[tokio::test]
    async fn test_exhausted_ids_reject_report() {
        let dir = TempDir::new().unwrap();
        let logs_dir = dir.path().join("logs");
        std::fs::create_dir_all(&logs_dir).unwrap();
        std::fs::write(
            logs_dir.join("logs.json"),
            format!(r#"[{{"id": {}, "description": "last", "priority": 1}}]"#, u64::MAX),
        )
        .unwrap();
        let mut service = service(&dir).await;

        let err = service
            .report(payload(json!({"description": "fire", "priority": 5})))
            .await
            .unwrap_err();
        assert!(matches!(err, FloodError::IdsExhausted(u64::MAX)));
        assert!(service.queue().is_empty());
        assert_eq!(service.ledger().read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_structures() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir).await;

        assert!(matches!(service.dispatch(), Err(FloodError::QueueEmpty)));
        assert!(service.stack().is_empty());
        assert!(matches!(service.undo(), Err(FloodError::NothingToUndo)));
        assert!(service.queue().is_empty());
    }

    #[tokio::test]
    async fn test_ledger_is_not_touched_by_dispatch_or_undo() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir).await;

        let reported = service
            .report(payload(json!({"description": "fire", "priority": 5})))
            .await
            .unwrap();
        service.dispatch().unwrap();
        service.undo().unwrap();
        service.dispatch().unwrap();

        let ledger = service.ledger().read_all().await.unwrap();
        assert_eq!(ledger, vec![reported]);
    }

    #[tokio::test]
    async fn test_ids_unique_and_resume_after_restart() {
        let dir = TempDir::new().unwrap();
        let mut first = service(&dir).await;
        let mut ids = Vec::new();
        for i in 0..20 {
            let r = first
                .report(payload(json!({"description": format!("r{}", i), "priority": 1})))
                .await
                .unwrap();
            ids.push(r.id);
        }
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let mut second = service(&dir).await;
        assert!(second.queue().is_empty(), "queue is in-memory only");
        let next = second
            .report(payload(json!({"description": "after restart", "priority": 1})))
            .await
            .unwrap();
        assert!(next.id > *ids.last().unwrap());
    }

    #[tokio::test]
    async fn test_generate_daily_log() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir).await;

        let fire = service
            .report(payload(json!({"description": "fire", "priority": 5})))
            .await
            .unwrap();
        let cat = service
            .report(payload(json!({"description": "cat stuck", "priority": 2})))
            .await
            .unwrap();
        service.dispatch().unwrap();

        let file_name = service.generate_daily_log().await.unwrap();
        assert_eq!(file_name, "daily_log.csv");

        let content = std::fs::read_to_string(service.ledger().export_path()).unwrap();
        assert_eq!(
            content,
            format!(
                "ID,Description,Priority\n{},fire,5\n{},cat stuck,2",
                fire.id, cat.id
            )
        );
    }
}
