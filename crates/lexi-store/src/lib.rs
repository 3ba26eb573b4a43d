pub mod articles;
pub mod backend;
pub mod error;
pub mod history;
pub mod keys;
pub mod notes;
pub mod settings;
pub mod stats;
pub mod store;
pub mod summaries;
pub mod vocabulary;

pub use backend::{JsonFileStore, KeyValueStore, MemoryStore};
pub use error::StoreError;
pub use store::Store;

/// Current time as epoch milliseconds, the timestamp unit of every record
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Calendar day used for streaks
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
