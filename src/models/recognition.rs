use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Raw output of the NLU recognizer for one turn.
///
/// Entities stay as untyped JSON: the recognizer nests them differently per
/// category, and a shape the pipeline does not expect must read as "absent"
/// instead of failing the whole turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecognitionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Label to score record, either a bare number or `{"score": n}`.
    #[serde(default, deserialize_with = "intents_or_empty")]
    pub intents: BTreeMap<String, Value>,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub entities: Map<String, Value>,
}

// `null`, arrays and scalars where an object belongs read as an empty section.
fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(fields) => Ok(fields),
        other => {
            tracing::debug!(value = %other, "treating non-object section as empty");
            Ok(Map::new())
        }
    }
}

fn intents_or_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(object_or_empty(deserializer)?.into_iter().collect())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeKind {
    Date,
    DateRange,
    Duration,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateTimeEntity {
    #[serde(rename = "type")]
    pub kind: DateTimeKind,
    #[serde(default)]
    pub timex: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognition_result() {
        let json = r#"{
            "text": "fly from london to paris",
            "intents": {"BookFlight": {"score": 0.92}, "Cancel": 0.01},
            "entities": {"$instance": {"To": [{"text": "paris"}]}}
        }"#;
        let result: RecognitionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.text.as_deref(), Some("fly from london to paris"));
        assert_eq!(result.intents.len(), 2);
        assert!(result.entities.contains_key("$instance"));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let result: RecognitionResult = serde_json::from_str("{}").unwrap();
        assert!(result.intents.is_empty());
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_non_object_sections_read_as_empty() {
        for json in [
            r#"{"intents": null, "entities": null}"#,
            r#"{"intents": [], "entities": []}"#,
            r#"{"intents": "BookFlight", "entities": 3}"#,
        ] {
            let result: RecognitionResult = serde_json::from_str(json).unwrap();
            assert!(result.intents.is_empty(), "{json}");
            assert!(result.entities.is_empty(), "{json}");
        }
    }

    #[test]
    fn test_datetime_kind_unknown_type() {
        let entity: DateTimeEntity =
            serde_json::from_str(r#"{"type":"datetime","timex":["2023-05-01T10"]}"#).unwrap();
        assert_eq!(entity.kind, DateTimeKind::Other);

        let entity: DateTimeEntity =
            serde_json::from_str(r#"{"type":"daterange","timex":["(2023-05-01,2023-05-10,P9D)"]}"#)
                .unwrap();
        assert_eq!(entity.kind, DateTimeKind::DateRange);
    }
}
