//! Researcher record

use crate::errors::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Researcher {
    /// Aliases, possibly in several scripts; the first one is the primary name
    #[serde(alias = "names")]
    #[validate(length(min = 1, message = "name must hold at least one alias"))]
    pub name: Vec<String>,

    /// Names of this researcher's advisors, as written in the source
    pub advisors: Vec<String>,

    #[serde(default)]
    pub affiliation: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    /// `YYYY-MM`
    #[validate(custom(function = "validate_award_date"))]
    pub award_date: String,

    /// 1-based position in the canonical ordering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// Source fields the pipeline does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Researcher {
    /// Record for a name that only ever appears as somebody's advisor
    pub fn placeholder(name: impl Into<String>, award_date: impl Into<String>) -> Self {
        Self {
            name: vec![name.into()],
            advisors: Vec::new(),
            affiliation: None,
            title: None,
            category: None,
            keywords: Vec::new(),
            award_date: award_date.into(),
            id: None,
            extra: Map::new(),
        }
    }

    /// Representative name used as the secondary sort key
    pub fn primary_name(&self) -> &str {
        self.name.first().map(String::as_str).unwrap_or_default()
    }

    pub fn has_name(&self, candidate: &str) -> bool {
        self.name.iter().any(|n| n == candidate)
    }

    pub fn is_root(&self) -> bool {
        self.advisors.is_empty()
    }
}

/// Decode raw records into typed researchers, failing on the first record
/// that is missing a required field or carries an unusable one.
pub fn decode_records(values: Vec<Value>) -> Result<Vec<Researcher>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let record: Researcher = serde_json::from_value(value).map_err(|e| {
                PipelineError::SchemaViolation {
                    index,
                    message: e.to_string(),
                }
            })?;
            record.validate().map_err(|e| PipelineError::SchemaViolation {
                index,
                message: e.to_string(),
            })?;
            Ok(record)
        })
        .collect()
}

/// Accepts `YYYY-MM` with a real month.
pub fn validate_award_date(value: &str) -> std::result::Result<(), ValidationError> {
    let well_formed = value.len() == 7
        && value
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 { b == b'-' } else { b.is_ascii_digit() })
        && chrono::NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_ok();

    if well_formed {
        Ok(())
    } else {
        let mut err = ValidationError::new("award_date");
        err.message = Some(format!("award_date {value:?} is not YYYY-MM").into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_defaults() {
        let record: Researcher = serde_json::from_value(json!({
            "name": ["김철수", "Kim Cheolsu"],
            "advisors": ["Lee"],
            "award_date": "2011-03"
        }))
        .unwrap();

        assert_eq!(record.primary_name(), "김철수");
        assert!(record.has_name("Kim Cheolsu"));
        assert!(record.keywords.is_empty());
        assert_eq!(record.affiliation, None);
        assert_eq!(record.id, None);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_names_alias_and_extra_fields() {
        let record: Researcher = serde_json::from_value(json!({
            "names": ["Park"],
            "advisors": [],
            "award_date": "2001-12",
            "thesis": "On lattices"
        }))
        .unwrap();

        assert_eq!(record.name, vec!["Park".to_string()]);
        assert!(record.is_root());
        assert_eq!(record.extra.get("thesis"), Some(&json!("On lattices")));
    }

    #[test]
    fn test_id_omitted_until_assigned() {
        let mut record = Researcher::placeholder("Choi", "1990-01");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["affiliation"], Value::Null);

        record.id = Some(7);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], json!(7));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut record = Researcher::placeholder("Choi", "1990-01");
        record.name.clear();
        assert!(record.validate().is_err());
        assert_eq!(record.primary_name(), "");
    }

    #[test]
    fn test_decode_reports_offending_index() {
        let values = vec![
            json!({"name": ["A"], "advisors": [], "award_date": "2020-01"}),
            json!({"name": ["B"], "award_date": "2020-01"}),
        ];
        match decode_records(values) {
            Err(PipelineError::SchemaViolation { index, message }) => {
                assert_eq!(index, 1);
                assert!(message.contains("advisors"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_scalar_name() {
        let values = vec![json!({"name": "Solo", "advisors": [], "award_date": "2020-01"})];
        assert!(matches!(
            decode_records(values),
            Err(PipelineError::SchemaViolation { index: 0, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_bad_award_date() {
        let values = vec![json!({"name": ["A"], "advisors": [], "award_date": "spring 2020"})];
        assert!(matches!(
            decode_records(values),
            Err(PipelineError::SchemaViolation { index: 0, .. })
        ));
    }

    #[test]
    fn test_award_date_shape() {
        assert!(validate_award_date("2020-01").is_ok());
        assert!(validate_award_date("1990-12").is_ok());
        assert!(validate_award_date("2020-13").is_err());
        assert!(validate_award_date("2020-1").is_err());
        assert!(validate_award_date("2020/01").is_err());
        assert!(validate_award_date("").is_err());
        assert!(validate_award_date("2020- 1").is_err());
        assert!(validate_award_date("+020-01").is_err());
        assert!(validate_award_date(" 2020-1").is_err());
    }

    #[test]
    fn test_decode_rejects_padded_month() {
        let values = vec![
            json!({"name": ["A"], "advisors": [], "award_date": "2020-01"}),
            json!({"name": ["B"], "advisors": [], "award_date": "2020- 1"}),
        ];
        assert!(matches!(
            decode_records(values),
            Err(PipelineError::SchemaViolation { index: 1, .. })
        ));
    }
}
