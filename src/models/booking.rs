use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::nlu::timex;

/// Slots of a flight booking request. Travel dates are TIMEX expressions and
/// may be partial (e.g. `XXXX-05-01` when the user gave no year).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingDetails {
    pub destination: Option<String>,
    pub origin: Option<String>,
    pub travel_start_date: Option<String>,
    pub travel_end_date: Option<String>,
    pub budget: Option<String>,
}

impl BookingDetails {
    pub fn definite_start_date(&self) -> Option<NaiveDate> {
        self.travel_start_date
            .as_deref()
            .and_then(timex::to_calendar_date)
    }

    pub fn definite_end_date(&self) -> Option<NaiveDate> {
        self.travel_end_date
            .as_deref()
            .and_then(timex::to_calendar_date)
    }
}
