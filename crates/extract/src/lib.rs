//! Collaborators that describe media for the quality engine.
//!
//! A [`MetadataExtractor`] turns a video into an attribute record using a
//! generative model, and an [`EmbeddingService`] turns a record summary into
//! a vector for similarity search.

#![warn(missing_docs)]

pub mod embedding;
pub mod error;
pub mod extractor;
pub mod gemini;
pub mod prompt;
pub mod response;

pub use embedding::{EmbeddingService, GeminiEmbeddingClient};
pub use error::{ExtractError, Result};
pub use extractor::{mime_type, GeminiExtractor, MetadataExtractor};
pub use gemini::GeminiClient;
pub use response::parse_model_response;
