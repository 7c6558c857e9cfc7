// ==========================================
// QuickDeck Catalog Ingestion - Run Report
// ==========================================
// Every data row yields exactly one RowOutcome; the ingestor folds
// them into a single IngestionOutcome returned after the last row.
// Row-level failures never interrupt the run.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RowOutcome - explicit per-row result
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// New product persisted (SKU was absent).
    Created,
    /// Existing product overwritten (SKU was present).
    Updated,
    /// Row not persisted; carries the report message.
    Skipped(String),
}

// ==========================================
// IngestionOutcome - per-run report
// ==========================================
// Built once per run and returned, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionOutcome {
    pub ok: bool,
    pub total_rows: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Ordered, human-readable row errors ("Row {n}: {reason}").
    pub errors: Vec<String>,
    pub elapsed_ms: u64,
}

impl IngestionOutcome {
    pub fn new() -> Self {
        Self {
            ok: true,
            total_rows: 0,
            created: 0,
            updated: 0,
            skipped: 0,
            errors: Vec::new(),
            elapsed_ms: 0,
        }
    }

    /// Fold one row result into the running report.
    pub fn record(&mut self, outcome: RowOutcome) {
        self.total_rows += 1;
        match outcome {
            RowOutcome::Created => self.created += 1,
            RowOutcome::Updated => self.updated += 1,
            RowOutcome::Skipped(message) => {
                self.skipped += 1;
                self.errors.push(message);
            }
        }
    }
}

impl Default for IngestionOutcome {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_folds_counts_in_order() {
        let mut outcome = IngestionOutcome::new();
        outcome.record(RowOutcome::Created);
        outcome.record(RowOutcome::Skipped("Row 3: missing value(s) in MRP".to_string()));
        outcome.record(RowOutcome::Updated);
        outcome.record(RowOutcome::Skipped("Row 5: unknown category \"x\"".to_string()));

        assert_eq!(outcome.total_rows, 4);
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(
            outcome.errors,
            vec![
                "Row 3: missing value(s) in MRP".to_string(),
                "Row 5: unknown category \"x\"".to_string(),
            ]
        );
        assert!(outcome.ok);
    }
}
