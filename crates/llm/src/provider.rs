//! Text generation provider trait

use crate::error::LlmError;

/// A hosted model that turns a prompt into a single text completion.
pub trait TextGenerator {
    /// Send the prompt and wait for the full completion.
    fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Service name, as used in user-facing messages
    fn name(&self) -> &'static str;

    /// Model identifier
    fn model(&self) -> &str;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        (**self).generate(prompt)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn model(&self) -> &str {
        (**self).model()
    }
}
