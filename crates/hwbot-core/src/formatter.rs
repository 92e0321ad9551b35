use serde_json::Value;
use tracing::info;

use crate::{catalog::StatusCatalog, validator::HomeworkRecord, Error, Result};

/// Builds the verdict sentence for a single homework record.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerdictFormatter {
    catalog: StatusCatalog,
}

impl VerdictFormatter {
    pub fn new(catalog: StatusCatalog) -> Self {
        Self { catalog }
    }

    pub fn format(&self, record: &HomeworkRecord) -> Result<String> {
        let name = record
            .homework_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingHomeworkName)?;
        let verdict = self.catalog.verdict(record.status);

        info!(homework = name, status = %record.status, "got verdict");
        Ok(format!(
            "Изменился статус проверки работы \"{name}\". {verdict}"
        ))
    }

    /// Format a raw `homeworks` element that has not been through the validator.
    pub fn format_value(&self, item: &Value) -> Result<String> {
        self.format(&HomeworkRecord::from_value(item)?)
    }
}
