//! Deterministic ordering and identifier assignment

use lineage_common::Researcher;

/// Stable sort by `(award_date, primary_name)`, both compared as strings.
/// Records with equal keys keep their relative input order.
pub fn sort_records(mut records: Vec<Researcher>) -> Vec<Researcher> {
    records.sort_by(|a, b| {
        (a.award_date.as_str(), a.primary_name()).cmp(&(b.award_date.as_str(), b.primary_name()))
    });
    records
}

/// Overwrite every id with its 1-based position
pub fn assign_ids(mut records: Vec<Researcher>) -> Vec<Researcher> {
    for (idx, record) in records.iter_mut().enumerate() {
        record.id = Some(idx as u32 + 1);
    }
    records
}

/// Sort, then number the result
pub fn order_and_number(records: Vec<Researcher>) -> Vec<Researcher> {
    assign_ids(sort_records(records))
}
