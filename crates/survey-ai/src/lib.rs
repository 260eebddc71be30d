//! # survey-ai
//!
//! Narrative comparison of two organizations using a generative text model.
//!
//! [`NarrativeComparator`] loads both organizations' filtered responses,
//! builds a single prompt, calls a [`TextGenerator`] once and shapes whatever
//! comes back into `{similarities, differences, summary}`. [`GeminiClient`]
//! is the production generator; [`ScriptedGenerator`] replays canned replies
//! for tests.

pub mod comparator;
pub mod error;
pub mod gemini;
pub mod generator;
mod http;

pub use comparator::NarrativeComparator;
pub use error::AiError;
pub use gemini::GeminiClient;
pub use generator::{ScriptedGenerator, TextGenerator};
