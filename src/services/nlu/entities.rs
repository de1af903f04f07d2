use serde_json::{Map, Value};

const INSTANCE_KEY: &str = "$instance";
const DESTINATION_CATEGORY: &str = "To";
const ORIGIN_CATEGORY: &str = "From";
const BUDGET_CATEGORY: &str = "money";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedEntities {
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub budget: Option<String>,
}

/// Pulls the location and budget slots out of the recognizer's instance
/// metadata. Missing or oddly shaped categories read as absent.
pub fn extract_entities(entities: &Map<String, Value>) -> ExtractedEntities {
    ExtractedEntities {
        destination: first_instance_text(entities, DESTINATION_CATEGORY).map(capitalize),
        origin: first_instance_text(entities, ORIGIN_CATEGORY).map(capitalize),
        budget: first_instance_text(entities, BUDGET_CATEGORY).map(str::to_string),
    }
}

fn first_instance_text<'a>(entities: &'a Map<String, Value>, category: &str) -> Option<&'a str> {
    entities
        .get(INSTANCE_KEY)?
        .as_object()?
        .get(category)?
        .as_array()?
        .first()?
        .get("text")?
        .as_str()
}

/// Upper-cases the first character and lower-cases the rest. Characters
/// with a multi-character upper-case form expand fully (`ß` becomes `SS`).
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entities(value: Value) -> Map<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extracts_locations_and_budget() {
        let extracted = extract_entities(&entities(json!({
            "$instance": {
                "To": [{"text": "paris", "startIndex": 18, "endIndex": 23}],
                "From": [{"text": "london"}],
                "money": [{"text": "$500"}],
            }
        })));
        assert_eq!(extracted.destination.as_deref(), Some("Paris"));
        assert_eq!(extracted.origin.as_deref(), Some("London"));
        assert_eq!(extracted.budget.as_deref(), Some("$500"));
    }

    #[test]
    fn test_first_match_wins() {
        let extracted = extract_entities(&entities(json!({
            "$instance": {"To": [{"text": "rome"}, {"text": "milan"}]}
        })));
        assert_eq!(extracted.destination.as_deref(), Some("Rome"));
    }

    #[test]
    fn test_missing_categories_are_none() {
        let extracted = extract_entities(&entities(json!({
            "$instance": {"From": [{"text": "london"}], "To": []}
        })));
        assert_eq!(extracted.destination, None);
        assert_eq!(extracted.budget, None);
        assert_eq!(extracted.origin.as_deref(), Some("London"));

        assert_eq!(extract_entities(&Map::new()), ExtractedEntities::default());
    }

    #[test]
    fn test_unexpected_shapes_are_none() {
        let extracted = extract_entities(&entities(json!({
            "$instance": {
                "To": {"text": "paris"},
                "From": [{"value": "london"}],
                "money": ["$500"],
            }
        })));
        assert_eq!(extracted, ExtractedEntities::default());

        let extracted = extract_entities(&entities(json!({"$instance": "garbage"})));
        assert_eq!(extracted, ExtractedEntities::default());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("paris"), "Paris");
        assert_eq!(capitalize("new YORK"), "New york");
        assert_eq!(capitalize("ßtadt"), "SStadt");
        assert_eq!(capitalize(""), "");
    }
}
