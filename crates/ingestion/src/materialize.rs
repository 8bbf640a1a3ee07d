//! Advisor materialization
//!
//! Every name cited as an advisor must resolve to a record. Names that never
//! appear as a primary record get a placeholder appended to the collection.

use lineage_common::Researcher;
use std::collections::HashSet;
use tracing::debug;

/// Result of materializing advisor-only records
#[derive(Debug, Clone)]
pub struct Materialized {
    /// Input records, unchanged, followed by the placeholders
    pub records: Vec<Researcher>,
    /// Names that received a placeholder, in creation order
    pub synthesized: Vec<String>,
}

/// Append a placeholder for every advisor name that no record carries.
///
/// Placeholders get `award_date` as their date and no advisors. Each missing
/// name is synthesized once, however many records cite it.
pub fn materialize_advisors(records: Vec<Researcher>, award_date: &str) -> Materialized {
    let mut known: HashSet<String> = records
        .iter()
        .flat_map(|r| r.name.iter().cloned())
        .collect();

    let mut synthesized = Vec::new();
    for record in &records {
        for advisor in &record.advisors {
            if known.insert(advisor.clone()) {
                debug!(advisor = %advisor, cited_by = %record.primary_name(), "Synthesizing advisor record");
                synthesized.push(advisor.clone());
            }
        }
    }

    let mut records = records;
    records.extend(
        synthesized
            .iter()
            .map(|name| Researcher::placeholder(name.clone(), award_date)),
    );

    Materialized {
        records,
        synthesized,
    }
}

/// Records dated strictly before `award_date`; these sort ahead of placeholders
pub fn dated_before(records: &[Researcher], award_date: &str) -> usize {
    records
        .iter()
        .filter(|r| r.award_date.as_str() < award_date)
        .count()
}

/// Advisor names that no record carries
pub fn unresolved_advisors(records: &[Researcher]) -> Vec<&str> {
    let known: HashSet<&str> = records
        .iter()
        .flat_map(|r| r.name.iter().map(String::as_str))
        .collect();

    records
        .iter()
        .flat_map(|r| r.advisors.iter().map(String::as_str))
        .filter(|a| !known.contains(a))
        .collect()
}
