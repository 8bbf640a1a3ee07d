//! Name lookup tables over a frozen collection
//!
//! Built once per resolution pass so each reference resolves with a hash
//! lookup instead of a rescan of the collection.

use lineage_common::Researcher;
use std::collections::HashMap;

/// Alias → positions of the records carrying it
pub struct NameIndex<'a> {
    by_name: HashMap<&'a str, Vec<usize>>,
}

impl<'a> NameIndex<'a> {
    /// Index every alias of every record. Positions are ascending.
    pub fn build(records: &'a [Researcher]) -> Self {
        let mut by_name: HashMap<&'a str, Vec<usize>> = HashMap::new();

        for (pos, record) in records.iter().enumerate() {
            for alias in &record.name {
                let slots = by_name.entry(alias.as_str()).or_default();
                // A record listing the same alias twice still counts once
                if slots.last() != Some(&pos) {
                    slots.push(pos);
                }
            }
        }

        Self { by_name }
    }

    /// Positions of the records carrying `name`
    pub fn lookup(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Aliases carried by more than one record, with their positions
    pub fn duplicates(&self) -> impl Iterator<Item = (&'a str, &[usize])> + '_ {
        self.by_name
            .iter()
            .filter(|(_, slots)| slots.len() > 1)
            .map(|(name, slots)| (*name, slots.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(names: &[&str]) -> Researcher {
        let mut r = Researcher::placeholder(names[0], "2000-01");
        r.name = names.iter().map(|s| s.to_string()).collect();
        r
    }

    #[test]
    fn test_lookup_by_any_alias() {
        let records = vec![record(&["송", "Song"]), record(&["Yoon"])];
        let index = NameIndex::build(&records);

        assert_eq!(index.lookup("송"), &[0]);
        assert_eq!(index.lookup("Song"), &[0]);
        assert_eq!(index.lookup("Yoon"), &[1]);
        assert!(index.lookup("Nobody").is_empty());
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn test_duplicates_reported() {
        let records = vec![record(&["Kim"]), record(&["Lee"]), record(&["Kim", "Kim J."])];
        let index = NameIndex::build(&records);

        assert_eq!(index.lookup("Kim"), &[0, 2]);
        let dups: Vec<_> = index.duplicates().collect();
        assert_eq!(dups, vec![("Kim", &[0usize, 2][..])]);
    }

    #[test]
    fn test_repeated_alias_in_one_record() {
        let records = vec![record(&["Han", "Han"])];
        let index = NameIndex::build(&records);
        assert_eq!(index.lookup("Han"), &[0]);
        assert!(index.duplicates().next().is_none());
    }
}
