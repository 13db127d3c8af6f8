//! Tokens, the ordered leaf units of a sentence.

use serde::{Deserialize, Serialize};

use crate::identifier::TokenId;

/// A single token of a sentence.
///
/// Tokens carry the display form used for graph-node labels and alignment
/// keys, an optional citation part (for citation-range computation), and an
/// optional contrast-group value. Apart from contrast-group clearing, tokens
/// are immutable once created by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    id: TokenId,
    /// Position of the token within its sentence, starting at 1.
    number: u32,
    form: String,
    #[serde(default)]
    citation_part: Option<String>,
    #[serde(default)]
    contrast_group: Option<String>,
}

impl Token {
    /// Creates a new token with the given identifier, sentence-local number,
    /// and display form.
    pub fn new(id: TokenId, number: u32, form: impl Into<String>) -> Self {
        Self {
            id,
            number,
            form: form.into(),
            citation_part: None,
            contrast_group: None,
        }
    }

    /// Sets the citation part of this token.
    pub fn with_citation_part(mut self, citation_part: impl Into<String>) -> Self {
        self.citation_part = Some(citation_part.into());
        self
    }

    /// Sets the contrast-group value of this token.
    pub fn with_contrast_group(mut self, contrast_group: impl Into<String>) -> Self {
        self.contrast_group = Some(contrast_group.into());
        self
    }

    /// Returns the token identifier.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Returns the position of the token within its sentence.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the display form of the token.
    pub fn form(&self) -> &str {
        &self.form
    }

    /// Returns the citation part of the token, if assigned.
    pub fn citation_part(&self) -> Option<&str> {
        self.citation_part.as_deref()
    }

    /// Returns the contrast-group value of the token, if assigned.
    pub fn contrast_group(&self) -> Option<&str> {
        self.contrast_group.as_deref()
    }

    /// Clears the contrast-group value.
    pub(crate) fn clear_contrast_group(&mut self) {
        self.contrast_group = None;
    }
}
