pub mod nlu;
pub mod recognizer;
