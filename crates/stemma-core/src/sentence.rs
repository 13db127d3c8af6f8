//! Sentences: ordered token sequences with annotation bookkeeping.

use serde::{Deserialize, Serialize};

use crate::{identifier::SentenceId, token::Token};

/// A sentence of a source division.
///
/// Sentences carry the ordered tokens, the annotator/reviewer bookkeeping
/// used for completion tracking, and an optional stored alignment link to a
/// sentence in the division's aligned division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    id: SentenceId,
    /// Position of the sentence within its division, starting at 1.
    number: u32,
    tokens: Vec<Token>,
    #[serde(default)]
    annotated_by: Option<String>,
    #[serde(default)]
    reviewed_by: Option<String>,
    #[serde(default)]
    aligned_sentence: Option<SentenceId>,
}

impl Sentence {
    /// Creates a new sentence from its ordered tokens.
    pub fn new(id: SentenceId, number: u32, tokens: Vec<Token>) -> Self {
        Self {
            id,
            number,
            tokens,
            annotated_by: None,
            reviewed_by: None,
            aligned_sentence: None,
        }
    }

    /// Sets the annotator of this sentence.
    pub fn with_annotated_by(mut self, annotator: impl Into<String>) -> Self {
        self.annotated_by = Some(annotator.into());
        self
    }

    /// Sets the reviewer of this sentence.
    pub fn with_reviewed_by(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewed_by = Some(reviewer.into());
        self
    }

    /// Sets the stored alignment link of this sentence.
    pub fn with_aligned_sentence(mut self, aligned: SentenceId) -> Self {
        self.aligned_sentence = Some(aligned);
        self
    }

    /// Returns the sentence identifier.
    pub fn id(&self) -> SentenceId {
        self.id
    }

    /// Returns the position of the sentence within its division.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Borrows the ordered tokens of this sentence.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Returns the annotator of this sentence, if any.
    pub fn annotated_by(&self) -> Option<&str> {
        self.annotated_by.as_deref()
    }

    /// Returns the reviewer of this sentence, if any.
    pub fn reviewed_by(&self) -> Option<&str> {
        self.reviewed_by.as_deref()
    }

    /// Returns the stored alignment link of this sentence, if any.
    pub fn aligned_sentence(&self) -> Option<SentenceId> {
        self.aligned_sentence
    }

    /// Returns whether an annotator is recorded.
    pub fn is_annotated(&self) -> bool {
        self.annotated_by.is_some()
    }

    /// Returns whether a reviewer is recorded.
    pub fn is_reviewed(&self) -> bool {
        self.reviewed_by.is_some()
    }

    /// Returns the sentence content as token forms joined by single spaces.
    ///
    /// This is the comparison key used by the sentence aligner, so two
    /// sentences with the same token forms compare equal regardless of
    /// identifiers or annotation state.
    pub fn text(&self) -> String {
        let forms: Vec<&str> = self.tokens.iter().map(Token::form).collect();
        forms.join(" ")
    }
}
