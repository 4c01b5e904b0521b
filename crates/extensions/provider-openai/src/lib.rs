//! OpenAI-compatible classifier for tabweave.

mod api;
mod classifier;

pub use classifier::{OpenAIClassifier, DEFAULT_BASE_URL, DEFAULT_MODEL};
