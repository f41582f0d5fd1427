//! Request and response types for search index operations.

/// Outcome of an index creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexCreation {
    /// The index did not exist and was created by this call.
    Created,
    /// The index was already present.
    AlreadyExists,
}

/// Item status for a `create` whose identifier is already indexed.
const CONFLICT_STATUS: u16 = 409;

/// A single item of a bulk operation that the search engine rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    /// The `_id` of the rejected item.
    pub doc_id: String,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Error type or reason reported by the search engine.
    pub reason: String,
}

/// Summary of a bulk operation containing aggregate statistics and the failed items.
///
/// A bulk request that reaches the search engine succeeds as a whole even when
/// individual items are rejected, for example on an identifier collision under
/// `create` semantics. Those rejections are reported here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Details of each failed item.
    pub failures: Vec<BulkItemFailure>,
}

impl BulkOperationSummary {
    /// Summary for an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: BulkOperationSummary) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.failures.extend(other.failures);
    }

    /// Reclassify items rejected because their identifier already exists as succeeded.
    ///
    /// Returns the number of reclassified items.
    pub fn accept_existing(&mut self) -> usize {
        let before = self.failures.len();
        self.failures.retain(|failure| failure.status != CONFLICT_STATUS);
        let accepted = before - self.failures.len();

        self.failed = self.failed.saturating_sub(accepted);
        self.succeeded += accepted;
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge() {
        let mut summary = BulkOperationSummary {
            total: 2,
            succeeded: 2,
            failed: 0,
            failures: vec![],
        };
        summary.merge(BulkOperationSummary {
            total: 3,
            succeeded: 2,
            failed: 1,
            failures: vec![BulkItemFailure {
                doc_id: "7".to_string(),
                status: 409,
                reason: "version_conflict_engine_exception".to_string(),
            }],
        });

        assert_eq!(summary.total, 5);
        assert_eq!(summary.succeeded, 4);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].doc_id, "7");
    }

    #[test]
    fn test_accept_existing_only_reclassifies_conflicts() {
        let mut summary = BulkOperationSummary {
            total: 3,
            succeeded: 1,
            failed: 2,
            failures: vec![
                BulkItemFailure {
                    doc_id: "1".to_string(),
                    status: 409,
                    reason: "version_conflict_engine_exception".to_string(),
                },
                BulkItemFailure {
                    doc_id: "2".to_string(),
                    status: 400,
                    reason: "mapper_parsing_exception".to_string(),
                },
            ],
        };

        assert_eq!(summary.accept_existing(), 1);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].doc_id, "2");
    }
}
