// Generative-AI client (Gemini REST).

mod client;
pub mod types;

pub use client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GenAiClient};
