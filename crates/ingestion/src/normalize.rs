//! Name normalization
//!
//! Legacy shards store `name` either as one string or as a list of aliases.
//! Normalization rewrites the scalar form into a one-element list so that
//! every later stage can rely on the typed list.

use serde_json::Value;

/// Keys under which a record may carry its names
const NAME_KEYS: [&str; 2] = ["name", "names"];

/// Rewrite a scalar name into a one-element list. Returns whether the record
/// changed. No other field is touched.
pub fn normalize_record(record: &mut Value) -> bool {
    let Some(fields) = record.as_object_mut() else {
        return false;
    };

    let mut changed = false;
    for key in NAME_KEYS {
        if let Some(slot) = fields.get_mut(key) {
            if let Value::String(name) = slot {
                let name = std::mem::take(name);
                *slot = Value::Array(vec![Value::String(name)]);
                changed = true;
            }
        }
    }
    changed
}

/// Normalize every record, returning the collection and how many records
/// were rewritten. Applying it twice is the same as applying it once.
pub fn normalize_names(mut records: Vec<Value>) -> (Vec<Value>, usize) {
    let rewritten = records
        .iter_mut()
        .map(normalize_record)
        .filter(|changed| *changed)
        .count();
    (records, rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_becomes_list() {
        let (records, rewritten) = normalize_names(vec![json!({"name": "Solo", "advisors": []})]);
        assert_eq!(rewritten, 1);
        assert_eq!(records[0], json!({"name": ["Solo"], "advisors": []}));
    }

    #[test]
    fn test_list_left_untouched() {
        let input = vec![json!({"name": ["홍길동", "Hong Gildong"], "advisors": ["Solo"]})];
        let (records, rewritten) = normalize_names(input.clone());
        assert_eq!(rewritten, 0);
        assert_eq!(records, input);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            json!({"name": "A", "advisors": ["B"], "award_date": "2020-01"}),
            json!({"name": ["C"], "advisors": [], "award_date": "2019-06"}),
            json!({"names": "D", "advisors": []}),
        ];
        let (once, _) = normalize_names(input);
        let (twice, rewritten) = normalize_names(once.clone());
        assert_eq!(once, twice);
        assert_eq!(rewritten, 0);
    }

    #[test]
    fn test_other_fields_untouched() {
        let mut record = json!({"name": "A", "title": "Prof", "advisors": "B"});
        assert!(normalize_record(&mut record));
        assert_eq!(record["advisors"], json!("B"));
        assert_eq!(record["title"], json!("Prof"));
    }

    #[test]
    fn test_non_object_ignored() {
        let mut record = json!("A");
        assert!(!normalize_record(&mut record));
    }
}
