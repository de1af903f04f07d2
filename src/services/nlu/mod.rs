pub mod entities;
pub mod intent;
pub mod timex;

use crate::errors::InterpretError;
use crate::models::{BookingDetails, Intent, Interpretation, RecognitionResult};
use crate::services::recognizer::Recognizer;

pub use entities::{extract_entities, ExtractedEntities};
pub use intent::top_intent;
pub use timex::{resolve_travel_dates, TravelDates};

/// Interprets one recognition result: selects the top intent and, for
/// `BookFlight`, fills in the booking slots.
pub fn interpret(result: &RecognitionResult) -> Result<Interpretation, InterpretError> {
    let top = top_intent(&result.intents)?;

    tracing::info!(intent = top.intent.as_str(), score = top.score, "selected top intent");

    let booking_details = match top.intent {
        Intent::BookFlight => Some(build_booking_details(
            extract_entities(&result.entities),
            resolve_travel_dates(&result.entities)?,
        )),
        Intent::Cancel | Intent::None => None,
    };

    Ok(Interpretation {
        intent: top.intent,
        score: top.score,
        booking_details,
    })
}

pub fn build_booking_details(entities: ExtractedEntities, dates: TravelDates) -> BookingDetails {
    BookingDetails {
        destination: entities.destination,
        origin: entities.origin,
        travel_start_date: dates.start,
        travel_end_date: dates.end,
        budget: entities.budget,
    }
}

/// Sends the turn text to the recognizer and interprets the result.
/// Recognizer failures are returned as-is; nothing is retried here.
pub async fn execute_query(
    recognizer: &dyn Recognizer,
    text: &str,
) -> Result<Interpretation, InterpretError> {
    let result = recognizer
        .recognize(text)
        .await
        .map_err(InterpretError::RecognitionFailure)?;

    interpret(&result)
}
