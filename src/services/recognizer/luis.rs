use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::Recognizer;
use crate::models::RecognitionResult;

const DATETIME_PREFIX: &str = "builtin.datetimeV2.";
const CURRENCY_TYPE: &str = "builtin.currency";

pub struct LuisRecognizer {
    app_id: String,
    api_key: String,
    host: String,
    client: reqwest::Client,
}

impl LuisRecognizer {
    pub fn new(app_id: String, api_key: String, host: String) -> Self {
        Self {
            app_id,
            api_key,
            host,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Recognizer for LuisRecognizer {
    async fn recognize(&self, text: &str) -> anyhow::Result<RecognitionResult> {
        let url = format!("https://{}/luis/v2.0/apps/{}", self.host, self.app_id);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("verbose", "true"),
                ("subscription-key", self.api_key.as_str()),
                ("q", text),
            ])
            .send()
            .await
            .context("failed to call LUIS API")?;

        let status = resp.status();
        let data: Value = resp
            .json()
            .await
            .context("failed to parse LUIS response")?;

        if !status.is_success() {
            anyhow::bail!("LUIS API error ({}): {}", status, data);
        }

        let prediction: LuisPrediction =
            serde_json::from_value(data).context("unexpected LUIS response shape")?;

        Ok(prediction.into_recognition_result(text))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuisPrediction {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    pub intents: Vec<LuisIntent>,
    #[serde(default)]
    pub entities: Vec<LuisEntity>,
}

#[derive(Debug, Deserialize)]
pub struct LuisIntent {
    pub intent: String,
    pub score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LuisEntity {
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start_index: usize,
    /// Inclusive, as LUIS v2 reports it.
    pub end_index: usize,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub resolution: Option<Value>,
}

impl LuisPrediction {
    /// Reshapes the v2 prediction into category-keyed entities with
    /// `$instance` metadata, `datetime` TIMEX records and `money` values.
    pub fn into_recognition_result(self, utterance: &str) -> RecognitionResult {
        let query = self.query.unwrap_or_else(|| utterance.to_string());

        let mut intents = BTreeMap::new();
        let scored = if self.intents.is_empty() {
            self.top_scoring_intent.into_iter().collect()
        } else {
            self.intents
        };
        for intent in scored {
            intents.insert(intent.intent, json!(intent.score));
        }

        let mut entities = Map::new();
        let mut instances = Map::new();

        for entity in self.entities {
            let text = span_text(&query, entity.start_index, entity.end_index)
                .unwrap_or_else(|| entity.entity.clone());

            let (category, value) = if let Some(kind) = entity.kind.strip_prefix(DATETIME_PREFIX) {
                let timex: Vec<Value> = resolution_values(entity.resolution.as_ref())
                    .filter_map(|v| v.get("timex").cloned())
                    .collect();
                ("datetime".to_string(), json!({ "type": kind, "timex": timex }))
            } else if entity.kind == CURRENCY_TYPE {
                let resolution = entity.resolution.clone().unwrap_or(Value::Null);
                (
                    "money".to_string(),
                    json!({
                        "number": resolution.get("value").and_then(number_value),
                        "units": resolution.get("unit"),
                    }),
                )
            } else {
                (category_name(&entity), Value::String(text.clone()))
            };

            let mut instance = json!({
                "startIndex": entity.start_index,
                "endIndex": entity.end_index.saturating_add(1),
                "text": text,
                "type": entity.kind,
            });
            if let Some(score) = entity.score {
                instance["score"] = json!(score);
            }

            push_to(&mut entities, &category, value);
            push_to(&mut instances, &category, instance);
        }

        if !instances.is_empty() {
            entities.insert("$instance".to_string(), Value::Object(instances));
        }

        RecognitionResult {
            text: Some(query),
            intents,
            entities,
        }
    }
}

fn category_name(entity: &LuisEntity) -> String {
    if let Some(role) = entity.role.as_deref().filter(|r| !r.is_empty()) {
        return role.to_string();
    }
    match entity.kind.split_once("::") {
        Some((_, child)) => child.to_string(),
        None => entity.kind.clone(),
    }
}

fn resolution_values(resolution: Option<&Value>) -> impl Iterator<Item = &Value> {
    resolution
        .and_then(|r| r.get("values"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn number_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// Offsets count characters, not bytes.
fn span_text(query: &str, start: usize, end_inclusive: usize) -> Option<String> {
    if end_inclusive < start || end_inclusive >= query.chars().count() {
        return None;
    }
    Some(
        query
            .chars()
            .skip(start)
            .take(end_inclusive - start + 1)
            .collect(),
    )
}

fn push_to(map: &mut Map<String, Value>, key: &str, value: Value) {
    match map.get_mut(key) {
        Some(Value::Array(items)) => items.push(value),
        _ => {
            map.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Intent;
    use crate::services::nlu::interpret;

    const PREDICTION: &str = r#"{
        "query": "Book a flight from London to Paris on May 1st for $500",
        "topScoringIntent": {"intent": "BookFlight", "score": 0.93},
        "intents": [
            {"intent": "BookFlight", "score": 0.93},
            {"intent": "Cancel", "score": 0.02},
            {"intent": "None", "score": 0.05}
        ],
        "entities": [
            {"entity": "london", "type": "Airport", "role": "From", "startIndex": 19, "endIndex": 24, "score": 0.97},
            {"entity": "paris", "type": "Airport", "role": "To", "startIndex": 29, "endIndex": 33, "score": 0.95},
            {"entity": "may 1st", "type": "builtin.datetimeV2.date", "startIndex": 38, "endIndex": 44,
             "resolution": {"values": [
                {"timex": "XXXX-05-01", "type": "date", "value": "2023-05-01"},
                {"timex": "XXXX-05-01", "type": "date", "value": "2024-05-01"}
             ]}},
            {"entity": "$500", "type": "builtin.currency", "startIndex": 50, "endIndex": 53,
             "resolution": {"unit": "Dollar", "value": "500"}}
        ]
    }"#;

    fn prediction() -> LuisPrediction {
        serde_json::from_str(PREDICTION).unwrap()
    }

    #[test]
    fn test_converts_intents() {
        let result = prediction().into_recognition_result("ignored");
        assert_eq!(result.intents.len(), 3);
        assert_eq!(result.intents["BookFlight"], json!(0.93));
    }

    #[test]
    fn test_converts_instances_with_original_casing() {
        let result = prediction().into_recognition_result("ignored");
        let instances = &result.entities["$instance"];
        assert_eq!(instances["From"][0]["text"], "London");
        assert_eq!(instances["To"][0]["text"], "Paris");
        assert_eq!(instances["To"][0]["endIndex"], 34);
        assert_eq!(instances["money"][0]["text"], "$500");
        assert_eq!(result.entities["money"][0]["number"], json!(500.0));
    }

    #[test]
    fn test_converts_datetime_records() {
        let result = prediction().into_recognition_result("ignored");
        assert_eq!(
            result.entities["datetime"],
            json!([{"type": "date", "timex": ["XXXX-05-01", "XXXX-05-01"]}])
        );
    }

    #[test]
    fn test_converted_prediction_interprets() {
        let result = prediction().into_recognition_result("ignored");
        let interpretation = interpret(&result).unwrap();
        assert_eq!(interpretation.intent, Intent::BookFlight);
        let details = interpretation.booking_details.unwrap();
        assert_eq!(details.origin.as_deref(), Some("London"));
        assert_eq!(details.destination.as_deref(), Some("Paris"));
        assert_eq!(details.travel_start_date.as_deref(), Some("XXXX-05-01"));
        assert_eq!(details.budget.as_deref(), Some("$500"));
    }

    #[test]
    fn test_top_scoring_intent_fallback() {
        let prediction: LuisPrediction = serde_json::from_value(json!({
            "topScoringIntent": {"intent": "Cancel", "score": 0.8}
        }))
        .unwrap();
        let result = prediction.into_recognition_result("cancel my trip");
        assert_eq!(result.text.as_deref(), Some("cancel my trip"));
        assert_eq!(result.intents["Cancel"], json!(0.8));
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_span_text_out_of_range_falls_back() {
        assert_eq!(span_text("to paris", 3, 7).as_deref(), Some("paris"));
        assert_eq!(span_text("to paris", 3, 8), None);
        assert_eq!(span_text("to paris", 5, 3), None);
    }

    #[test]
    fn test_huge_end_index_does_not_overflow() {
        let prediction: LuisPrediction = serde_json::from_value(json!({
            "query": "to paris",
            "intents": [{"intent": "BookFlight", "score": 0.7}],
            "entities": [
                {"entity": "paris", "type": "To", "startIndex": 3, "endIndex": usize::MAX}
            ]
        }))
        .unwrap();
        let result = prediction.into_recognition_result("to paris");
        let instance = &result.entities["$instance"]["To"][0];
        assert_eq!(instance["text"], "paris");
        assert_eq!(instance["endIndex"], json!(usize::MAX));
    }

    #[test]
    fn test_category_name_for_hierarchical_type() {
        let entity = LuisEntity {
            entity: "seattle".to_string(),
            kind: "Location::Destination".to_string(),
            start_index: 0,
            end_index: 6,
            score: None,
            role: None,
            resolution: None,
        };
        assert_eq!(category_name(&entity), "Destination");
    }
}
