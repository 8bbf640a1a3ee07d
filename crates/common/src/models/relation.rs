//! Relation entry: one record's direct advisor/advisee edges by id

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEntry {
    /// Id of the researcher this entry describes
    pub id: u32,

    /// Ids of records named in this researcher's `advisors`
    pub advisors: Vec<u32>,

    /// Ids of records that name this researcher as an advisor
    pub advisees: Vec<u32>,
}

impl RelationEntry {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn degree(&self) -> usize {
        self.advisors.len() + self.advisees.len()
    }
}
