pub mod browser;
pub mod config;
pub mod contest;
pub mod error;
pub mod extractor;
pub mod options;
pub mod problem;
pub mod report;
pub mod sample;
pub mod types;

pub use extractor::{ContestExtractor, ContestMetadata};
pub use options::Options;
