use crate::engine::tokenizer::tokenize;

/// Token sequence for one passage. Built once at passage selection and
/// immutable for the rest of the reading session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSequence {
    tokens: Vec<String>,
}

impl ReferenceSequence {
    pub fn from_text(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
