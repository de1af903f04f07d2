use serde::{Deserialize, Serialize};

use super::BookingDetails;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intent {
    BookFlight,
    Cancel,
    None,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::BookFlight => "BookFlight",
            Intent::Cancel => "Cancel",
            Intent::None => "None",
        }
    }

    /// Maps a recognizer label onto the closed intent set. Labels the
    /// assistant does not handle fall back to `Intent::None`.
    pub fn parse(label: &str) -> Self {
        match label {
            "BookFlight" => Intent::BookFlight,
            "Cancel" => Intent::Cancel,
            _ => Intent::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopIntent {
    pub intent: Intent,
    pub score: f64,
}

impl TopIntent {
    pub fn none() -> Self {
        Self {
            intent: Intent::None,
            score: 0.0,
        }
    }
}

/// Outcome of interpreting one recognition result.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Interpretation {
    pub intent: Intent,
    pub score: f64,
    pub booking_details: Option<BookingDetails>,
}
