pub mod booking;
pub mod intent;
pub mod recognition;

pub use booking::BookingDetails;
pub use intent::{Intent, Interpretation, TopIntent};
pub use recognition::{DateTimeEntity, DateTimeKind, RecognitionResult};
