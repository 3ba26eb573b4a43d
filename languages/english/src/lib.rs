pub mod dictionary;
pub mod frequency;
pub mod translator;

pub use dictionary::FallbackDictionary;
pub use frequency::{EnglishFrequency, FrequencyBand};
pub use translator::DeepLTranslator;
