use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::InterpretError;
use crate::models::{Intent, TopIntent};

/// Picks the highest-scoring intent.
///
/// The mapping is ordered by label, and a later entry only replaces the
/// current best when its score is strictly greater, so on a tie the label
/// that sorts first wins. Only scores above zero can win; an empty or
/// all-zero mapping yields `(None, 0.0)`. Scores outside `[0, 1]` are
/// skipped.
pub fn top_intent(intents: &BTreeMap<String, Value>) -> Result<TopIntent, InterpretError> {
    let mut best: Option<(&str, f64)> = None;

    for (label, raw) in intents {
        let score = score_of(raw).ok_or_else(|| {
            InterpretError::Recognition(format!("score for intent {label:?} is not numeric: {raw}"))
        })?;

        if !(0.0..=1.0).contains(&score) {
            tracing::warn!(intent = %label, score, "ignoring out-of-range intent score");
            continue;
        }

        if score > best.map_or(0.0, |(_, best_score)| best_score) {
            best = Some((label.as_str(), score));
        }
    }

    Ok(best
        .map(|(label, score)| TopIntent {
            intent: Intent::parse(label),
            score,
        })
        .unwrap_or_else(TopIntent::none))
}

// Recognizers report either a bare number or an `IntentScore`-like object.
fn score_of(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::Object(fields) => fields.get("score").and_then(Value::as_f64),
        _ => None,
    }
}
