pub mod bus;
pub mod language;
pub mod state;
pub mod words;

pub use bus::EventBus;
pub use language::DifficultyClassifier;
pub use state::AppState;
