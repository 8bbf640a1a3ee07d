//! Relation resolution
//!
//! Turns each record's textual advisor list into advisor ids, then inverts
//! those edges to obtain advisee ids. Deriving advisees from the resolved
//! advisor edges keeps the two directions symmetric under every duplicate
//! name policy.

use super::index::NameIndex;
use lineage_common::config::DuplicateNamePolicy;
use lineage_common::errors::{PipelineError, Result};
use lineage_common::{RelationEntry, Researcher};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A reference that did not resolve to exactly one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceWarning {
    /// No record carries the advisor name
    Unresolved { id: u32, advisor: String },
    /// Several records carry the advisor name
    Ambiguous {
        id: u32,
        advisor: String,
        candidates: Vec<u32>,
    },
}

impl ReferenceWarning {
    pub fn kind(&self) -> &'static str {
        match self {
            ReferenceWarning::Unresolved { .. } => "unresolved",
            ReferenceWarning::Ambiguous { .. } => "ambiguous",
        }
    }

    /// Id of the record holding the reference
    pub fn id(&self) -> u32 {
        match self {
            ReferenceWarning::Unresolved { id, .. } | ReferenceWarning::Ambiguous { id, .. } => *id,
        }
    }
}

/// Relation entries plus the warnings raised while resolving them
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// One entry per record, in collection order
    pub entries: Vec<RelationEntry>,
    pub warnings: Vec<ReferenceWarning>,
    /// Names carried by more than one record, with their ids, sorted by name
    pub duplicate_names: Vec<(String, Vec<u32>)>,
}

impl Resolution {
    /// Number of advisor → advisee edges
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|e| e.advisors.len()).sum()
    }
}

/// Ids must be exactly `1..N` in collection order
pub fn check_id_sequence(records: &[Researcher]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        let expected = index as u32 + 1;
        if record.id != Some(expected) {
            return Err(PipelineError::IdSequence {
                index,
                expected,
                found: record.id,
            });
        }
    }
    Ok(())
}

/// Resolve advisor and advisee ids for every record of a canonical collection
#[instrument(skip_all, fields(records = records.len(), policy = ?policy))]
pub fn resolve_relations(records: &[Researcher], policy: DuplicateNamePolicy) -> Result<Resolution> {
    check_id_sequence(records)?;

    let index = NameIndex::build(records);
    let mut duplicate_names: Vec<(String, Vec<u32>)> = index
        .duplicates()
        .map(|(name, slots)| (name.to_string(), slots.iter().map(|&p| p as u32 + 1).collect()))
        .collect();
    duplicate_names.sort();

    let mut resolution = Resolution {
        entries: (1..=records.len() as u32).map(RelationEntry::new).collect(),
        warnings: Vec::new(),
        duplicate_names,
    };

    for (pos, record) in records.iter().enumerate() {
        let id = pos as u32 + 1;

        for advisor in &record.advisors {
            let matches = index.lookup(advisor);

            let chosen: &[usize] = match matches.len() {
                0 => {
                    resolution.warnings.push(ReferenceWarning::Unresolved {
                        id,
                        advisor: advisor.clone(),
                    });
                    &[]
                }
                1 => matches,
                _ => {
                    let candidates: Vec<u32> = matches.iter().map(|&p| p as u32 + 1).collect();
                    match policy {
                        DuplicateNamePolicy::Reject => {
                            return Err(PipelineError::AmbiguousName {
                                name: advisor.clone(),
                                ids: candidates,
                            });
                        }
                        DuplicateNamePolicy::First => {
                            resolution.warnings.push(ReferenceWarning::Ambiguous {
                                id,
                                advisor: advisor.clone(),
                                candidates,
                            });
                            &matches[..1]
                        }
                        DuplicateNamePolicy::All => {
                            resolution.warnings.push(ReferenceWarning::Ambiguous {
                                id,
                                advisor: advisor.clone(),
                                candidates,
                            });
                            matches
                        }
                    }
                }
            };

            for &target in chosen {
                push_unique(&mut resolution.entries[pos].advisors, target as u32 + 1);
            }
        }
    }

    // Invert: y lists x as advisor ⟺ x lists y as advisee
    for pos in 0..resolution.entries.len() {
        let advisee_id = resolution.entries[pos].id;
        for k in 0..resolution.entries[pos].advisors.len() {
            let advisor_id = resolution.entries[pos].advisors[k];
            let advisor_pos = advisor_id as usize - 1;
            push_unique(&mut resolution.entries[advisor_pos].advisees, advisee_id);
        }
    }

    debug!(
        edges = resolution.edge_count(),
        warnings = resolution.warnings.len(),
        "Relations resolved"
    );

    Ok(resolution)
}

fn push_unique(ids: &mut Vec<u32>, id: u32) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
