//! Client-side filtering of the file listing.
//!
//! A conjunction of independent predicates over [`FileRecord`]s. Risk level
//! is deliberately absent: it is applied server-side via a `/files` request
//! parameter, and reapplying it here would let the two tiers drift.

use crate::models::FileRecord;

/// Text-extraction predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFound {
    #[default]
    Any,
    Yes,
    No,
}

/// Size comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOp {
    Over,
    Under,
}

/// Size constraint in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    pub op: SizeOp,
    pub threshold: u64,
}

impl SizeFilter {
    /// Parse a user-supplied threshold. Absent or non-numeric input yields
    /// None: the size constraint fails open, not closed.
    pub fn parse(op: SizeOp, raw: &str) -> Option<Self> {
        let threshold = raw.trim().parse::<u64>().ok()?;
        Some(Self { op, threshold })
    }

    fn matches(&self, size: u64) -> bool {
        match self.op {
            SizeOp::Over => size > self.threshold,
            SizeOp::Under => size < self.threshold,
        }
    }
}

/// Conjunction of client-side predicates. `Default` matches everything.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub text_found: TextFound,
    /// Exact type label to keep, or None for any. The candidate set comes
    /// from [`distinct_types`] over the current records, not a fixed
    /// enumeration.
    pub file_type: Option<String>,
    pub size: Option<SizeFilter>,
}

impl FilterCriteria {
    /// Apply all predicates, AND-combined, preserving input order.
    ///
    /// An empty result is a valid, displayable state.
    pub fn apply(&self, records: &[FileRecord]) -> Vec<FileRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    fn matches(&self, record: &FileRecord) -> bool {
        let text_ok = match self.text_found {
            TextFound::Any => true,
            TextFound::Yes => record.has_text,
            TextFound::No => !record.has_text,
        };
        let type_ok = match &self.file_type {
            None => true,
            Some(t) => record.file_type == *t,
        };
        let size_ok = match &self.size {
            None => true,
            Some(f) => f.matches(record.size),
        };
        text_ok && type_ok && size_ok
    }
}

/// Distinct type labels observed in the current record list, sorted.
///
/// The type dropdown shrinks and grows with the data.
pub fn distinct_types(records: &[FileRecord]) -> Vec<String> {
    let mut types: Vec<String> = records.iter().map(|r| r.file_type.clone()).collect();
    types.sort();
    types.dedup();
    types
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(filename: &str, file_type: &str, size: u64, has_text: bool) -> FileRecord {
        FileRecord {
            filename: filename.to_string(),
            file_type: file_type.to_string(),
            size,
            has_text,
            ..Default::default()
        }
    }

    fn sample() -> Vec<FileRecord> {
        vec![
            record("a.pdf", "application/pdf", 500, true),
            record("b.jpg", "image/jpeg", 5000, false),
            record("c.txt", "text/plain", 1500, true),
            record("d.pdf", "application/pdf", 250_000, false),
        ]
    }

    #[test]
    fn test_default_criteria_is_identity() {
        let records = sample();
        let filtered = FilterCriteria::default().apply(&records);
        assert_eq!(filtered, records);
    }

    #[test]
    fn test_text_found_yes() {
        let filtered = FilterCriteria {
            text_found: TextFound::Yes,
            ..Default::default()
        }
        .apply(&sample());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.has_text));
    }

    #[test]
    fn test_text_found_no() {
        let filtered = FilterCriteria {
            text_found: TextFound::No,
            ..Default::default()
        }
        .apply(&sample());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| !r.has_text));
    }

    #[test]
    fn test_type_filter() {
        let filtered = FilterCriteria {
            file_type: Some("application/pdf".to_string()),
            ..Default::default()
        }
        .apply(&sample());
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].filename, "a.pdf");
        assert_eq!(filtered[1].filename, "d.pdf");
    }

    #[test]
    fn test_size_over_excludes_and_includes() {
        let criteria = FilterCriteria {
            size: Some(SizeFilter {
                op: SizeOp::Over,
                threshold: 1000,
            }),
            ..Default::default()
        };
        let filtered = criteria.apply(&sample());
        assert!(filtered.iter().all(|r| r.size > 1000));
        assert!(!filtered.iter().any(|r| r.size == 500));
        assert!(filtered.iter().any(|r| r.size == 5000));
    }

    #[test]
    fn test_size_under() {
        let criteria = FilterCriteria {
            size: Some(SizeFilter {
                op: SizeOp::Under,
                threshold: 1000,
            }),
            ..Default::default()
        };
        let filtered = criteria.apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].size, 500);
    }

    #[test]
    fn test_size_parse_fails_open() {
        assert_eq!(SizeFilter::parse(SizeOp::Over, ""), None);
        assert_eq!(SizeFilter::parse(SizeOp::Over, "lots"), None);
        assert_eq!(SizeFilter::parse(SizeOp::Over, "-5"), None);
        assert_eq!(
            SizeFilter::parse(SizeOp::Under, " 1000 "),
            Some(SizeFilter {
                op: SizeOp::Under,
                threshold: 1000
            })
        );
    }

    #[test]
    fn test_conjunction_of_all_predicates() {
        let criteria = FilterCriteria {
            text_found: TextFound::Yes,
            file_type: Some("text/plain".to_string()),
            size: Some(SizeFilter {
                op: SizeOp::Over,
                threshold: 1000,
            }),
        };
        let filtered = criteria.apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].filename, "c.txt");
    }

    #[test]
    fn test_empty_result_is_valid() {
        let criteria = FilterCriteria {
            file_type: Some("video/mp4".to_string()),
            ..Default::default()
        };
        assert!(criteria.apply(&sample()).is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let filtered = FilterCriteria {
            text_found: TextFound::No,
            ..Default::default()
        }
        .apply(&sample());
        assert_eq!(filtered[0].filename, "b.jpg");
        assert_eq!(filtered[1].filename, "d.pdf");
    }

    #[test]
    fn test_distinct_types_derived_from_data() {
        let types = distinct_types(&sample());
        assert_eq!(types, vec!["application/pdf", "image/jpeg", "text/plain"]);
    }

    #[test]
    fn test_distinct_types_empty() {
        assert!(distinct_types(&[]).is_empty());
    }
}
