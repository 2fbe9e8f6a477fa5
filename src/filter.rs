//! Filter engine: derives the visible subset of dataset rows.
//!
//! Two steps, in order: partition on the exact `Auditors` value, then an
//! optional case-insensitive substring predicate across every field.
//! Dataset order is preserved and no row is ever mutated.

use crate::dataset::{Dataset, AUDITORS_COLUMN};

/// Indices of the rows visible for the given auditor and predicate text.
///
/// The partition step keeps rows whose `Auditors` field equals `auditor`
/// exactly (case-sensitive, as stored). When `predicate` is non-empty, a
/// row survives only if some field contains it as a case-insensitive
/// substring.
pub fn visible_rows(dataset: &Dataset, auditor: &str, predicate: &str) -> Vec<usize> {
    let Some(auditors_col) = dataset.column_index(AUDITORS_COLUMN) else {
        return Vec::new();
    };
    let needle = predicate.to_lowercase();

    (0..dataset.len())
        .filter(|&idx| {
            let Some(row) = dataset.row(idx) else {
                return false;
            };
            if row.get(auditors_col).map(|v| v.as_str()) != Some(auditor) {
                return false;
            }
            if needle.is_empty() {
                return true;
            }
            row.iter().any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Number of rows matching the partition step alone, for the summary line.
///
/// Independent of any predicate text, so it is always >= the length of the
/// corresponding `visible_rows` result.
pub fn count(dataset: &Dataset, auditor: &str) -> usize {
    let Some(auditors_col) = dataset.column_index(AUDITORS_COLUMN) else {
        return 0;
    };
    (0..dataset.len())
        .filter(|&idx| {
            dataset
                .row(idx)
                .and_then(|r| r.get(auditors_col))
                .map(|v| v == auditor)
                .unwrap_or(false)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::FileFormat;

    fn sample() -> Dataset {
        let csv = "\
example_asin_1,example_asin_2,example_asin_3,parent_item_id,marketplace_id,Auditors
ABC123,B002,B003,P100,44,Alice
B004,B005,B006,P200,44,Alice
B007,B008,B009,P300,7,Bob
";
        Dataset::from_bytes(csv.as_bytes(), FileFormat::Csv).unwrap()
    }

    #[test]
    fn partition_keeps_only_matching_auditor() {
        let ds = sample();
        assert_eq!(visible_rows(&ds, "Alice", ""), vec![0, 1]);
        assert_eq!(visible_rows(&ds, "Bob", ""), vec![2]);
        assert_eq!(visible_rows(&ds, "Carol", ""), Vec::<usize>::new());
    }

    #[test]
    fn auditor_match_is_case_sensitive() {
        let ds = sample();
        assert!(visible_rows(&ds, "alice", "").is_empty());
    }

    #[test]
    fn predicate_is_case_insensitive_substring() {
        let ds = sample();
        assert_eq!(visible_rows(&ds, "Alice", "abc"), vec![0]);
        assert_eq!(visible_rows(&ds, "Alice", "AbC"), vec![0]);
        assert_eq!(visible_rows(&ds, "Alice", "zzz"), Vec::<usize>::new());
    }

    #[test]
    fn predicate_matches_any_field() {
        let ds = sample();
        // P200 only appears in the parent_item_id field of row 1.
        assert_eq!(visible_rows(&ds, "Alice", "p200"), vec![1]);
    }

    #[test]
    fn visible_rows_is_idempotent() {
        let ds = sample();
        let first = visible_rows(&ds, "Alice", "b00");
        let second = visible_rows(&ds, "Alice", "b00");
        assert_eq!(first, second);
    }

    #[test]
    fn count_ignores_predicate_and_bounds_visible_len() {
        let ds = sample();
        assert_eq!(count(&ds, "Alice"), 2);
        for predicate in ["", "abc", "zzz", "44"] {
            assert!(count(&ds, "Alice") >= visible_rows(&ds, "Alice", predicate).len());
        }
    }
}
