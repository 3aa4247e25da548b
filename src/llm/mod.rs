//! Language-model access
//!
//! The rest of the crate only sees [`CompletionModel`]: a system message and
//! a prompt go in, the model's reply text comes out.

pub mod openai;

use crate::error::RequestError;

pub use openai::OpenAiClient;

/// A blocking text-in, text-out model request
pub trait CompletionModel {
    fn complete(&self, system: &str, prompt: &str) -> Result<String, RequestError>;
}
