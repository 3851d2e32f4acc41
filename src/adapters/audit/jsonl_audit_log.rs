//! Append-only JSONL audit log.
//!
//! One JSON object per line, appended per settled transaction. The file is
//! opened per append so rotation or deletion between settlements is safe.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::ports::{AuditError, AuditLog, AuditRecord};

/// `AuditLog` implementation writing JSON lines to a local file.
pub struct JsonlAuditLog {
    path: PathBuf,
}

impl JsonlAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AuditLog for JsonlAuditLog {
    async fn append(&self, record: AuditRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(&record)
            .map_err(|e| AuditError::AppendFailed(e.to_string()))?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AuditError::AppendFailed(e.to_string()))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AuditError::AppendFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| AuditError::AppendFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{OrderId, Timestamp, UserId};
    use crate::domain::ledger::OrderStatus;
    use crate::domain::registry::RoleTier;

    fn record(unix_secs: u64) -> AuditRecord {
        let user_id = UserId::new("7").unwrap();
        AuditRecord {
            order_id: OrderId::generate(&user_id, Timestamp::from_unix_secs(unix_secs)),
            user_id,
            role: RoleTier::Warriors,
            status: OrderStatus::Settled,
            timestamp: Timestamp::from_unix_secs(unix_secs),
        }
    }

    #[tokio::test]
    async fn appends_one_json_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let log = JsonlAuditLog::new(&path);

        log.append(record(100)).await.unwrap();
        log.append(record(200)).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: AuditRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, record(100));
        let second: AuditRecord = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.order_id, OrderId::generate(&second.user_id, Timestamp::from_unix_secs(200)));
    }

    #[tokio::test]
    async fn append_fails_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log = JsonlAuditLog::new(dir.path());

        assert!(matches!(
            log.append(record(100)).await,
            Err(AuditError::AppendFailed(_))
        ));
    }
}
