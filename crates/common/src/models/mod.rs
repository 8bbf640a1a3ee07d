//! Dataset models shared by every pipeline stage

mod relation;
mod researcher;

pub use relation::RelationEntry;
pub use researcher::{decode_records, validate_award_date, Researcher};
