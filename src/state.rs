use crate::config::AppConfig;
use crate::services::recognizer::Recognizer;

pub struct AppState {
    pub config: AppConfig,
    pub recognizer: Box<dyn Recognizer>,
}
