use crate::error::LeaveError;
use crate::model::leave_request::{HISTORY_COLUMNS, HistoryRecord};
use crate::utils::csv_utils::replace_csv;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only request ledger stored as CSV with a fixed header.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in file order; an absent file is an empty log.
    pub fn load(&self) -> Result<Vec<HistoryRecord>, LeaveError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let records = reader
            .deserialize::<HistoryRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        debug!(path = %self.path.display(), records = records.len(), "Loaded history log");
        Ok(records)
    }

    pub fn save(&self, records: &[HistoryRecord]) -> Result<(), LeaveError> {
        replace_csv(&self.path, |w| {
            // header is written explicitly so an empty log still carries the schema
            w.write_record(HISTORY_COLUMNS)?;
            for record in records {
                w.write_record([
                    &record.name,
                    &record.leave_type,
                    &record.from_date,
                    &record.to_date,
                    &record.reason,
                    &record.status,
                    &record.manager_email,
                    &record.applied_on,
                ])?;
            }
            Ok(())
        })
    }

    pub fn append(&self, record: HistoryRecord) -> Result<(), LeaveError> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)?;

        debug!(path = %self.path.display(), records = records.len(), "Appended history record");
        Ok(())
    }
}
