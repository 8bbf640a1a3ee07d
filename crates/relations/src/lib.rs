//! Lineage Relations
//!
//! Derives the direct advisor/advisee graph of the canonical collection:
//! - Name index built once per pass
//! - Advisor ids resolved per record, advisee ids by inversion
//! - Unresolved and ambiguous references collected as warnings

pub mod processor;
pub mod relation;

pub use processor::RelationProcessor;
pub use relation::{
    resolve_relations, AdvisorEdge, ReferenceWarning, RelationGraph, RelationSummary, Resolution,
};
