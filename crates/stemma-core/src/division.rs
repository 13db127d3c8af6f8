//! Source divisions and their derived annotation-state helpers.
//!
//! A [`SourceDivision`] is a structural unit of a source text (a chapter,
//! a book) holding an ordered sequence of sentences and the flat list of
//! semantic-relation edges annotated on its tokens. Besides plain access,
//! the division derives a few values from its content:
//!
//! - [`SourceDivision::completion`] - Aggregate annotation state.
//! - [`SourceDivision::citation`] - Citation string covering the division.
//! - [`SourceDivision::contrast_groups`] /
//!   [`SourceDivision::delete_contrast_group`] - Contrast-group inventory
//!   and prefix-wildcard deletion.

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
    str::FromStr,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::ModelError,
    identifier::{DivisionId, RelationType},
    relation::SemanticRelation,
    sentence::Sentence,
    token::Token,
};

/// Aggregate annotation state of a division.
///
/// The names match external configuration strings (snake_case).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionState {
    /// At least one sentence has no annotator recorded (default).
    #[default]
    Unannotated,
    /// Every sentence is annotated, but not every sentence is reviewed.
    Annotated,
    /// Every sentence is annotated and reviewed.
    Reviewed,
}

impl FromStr for CompletionState {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unannotated" => Ok(Self::Unannotated),
            "annotated" => Ok(Self::Annotated),
            "reviewed" => Ok(Self::Reviewed),
            _ => Err("Unknown completion state"),
        }
    }
}

impl From<CompletionState> for &'static str {
    fn from(val: CompletionState) -> Self {
        match val {
            CompletionState::Unannotated => "unannotated",
            CompletionState::Annotated => "annotated",
            CompletionState::Reviewed => "reviewed",
        }
    }
}

impl Display for CompletionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A structural division of a source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDivision {
    id: DivisionId,
    /// Position of the division within its source; drives division ordering.
    position: u32,
    title: String,
    #[serde(default)]
    abbreviated_title: Option<String>,
    citation_part: String,
    #[serde(default)]
    aligned_division: Option<DivisionId>,
    #[serde(default)]
    sentences: Vec<Sentence>,
    #[serde(default)]
    relations: Vec<SemanticRelation>,
}

impl SourceDivision {
    /// Creates a new, empty division.
    pub fn new(
        id: DivisionId,
        position: u32,
        title: impl Into<String>,
        citation_part: impl Into<String>,
    ) -> Self {
        Self {
            id,
            position,
            title: title.into(),
            abbreviated_title: None,
            citation_part: citation_part.into(),
            aligned_division: None,
            sentences: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Sets the ordered sentences of this division.
    pub fn with_sentences(mut self, sentences: Vec<Sentence>) -> Self {
        self.sentences = sentences;
        self
    }

    /// Sets the semantic-relation edge list of this division.
    pub fn with_relations(mut self, relations: Vec<SemanticRelation>) -> Self {
        self.relations = relations;
        self
    }

    /// Sets the stored alignment link to a parallel division.
    pub fn with_aligned_division(mut self, aligned: DivisionId) -> Self {
        self.aligned_division = Some(aligned);
        self
    }

    /// Sets the abbreviated title of this division.
    pub fn with_abbreviated_title(mut self, abbreviated_title: impl Into<String>) -> Self {
        self.abbreviated_title = Some(abbreviated_title.into());
        self
    }

    /// Returns the division identifier.
    pub fn id(&self) -> DivisionId {
        self.id
    }

    /// Returns the position of the division within its source.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Returns the title of the division.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the abbreviated title, if any.
    pub fn abbreviated_title(&self) -> Option<&str> {
        self.abbreviated_title.as_deref()
    }

    /// Returns the citation fragment of the division itself.
    pub fn citation_part(&self) -> &str {
        &self.citation_part
    }

    /// Returns the stored alignment link, if any.
    pub fn aligned_division(&self) -> Option<DivisionId> {
        self.aligned_division
    }

    /// Borrows the ordered sentences of this division.
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Borrows the semantic-relation edge list of this division.
    pub fn relations(&self) -> &[SemanticRelation] {
        &self.relations
    }

    /// Iterates over all tokens of the division in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|sentence| sentence.tokens())
    }

    /// Iterates over the relation edges of the given type.
    pub fn relations_of_type(
        &self,
        relation_type: RelationType,
    ) -> impl Iterator<Item = &SemanticRelation> {
        self.relations
            .iter()
            .filter(move |relation| relation.relation_type() == relation_type)
    }

    /// Returns whether any edge of the given type is annotated on this
    /// division.
    pub fn has_relation_type(&self, relation_type: RelationType) -> bool {
        self.relations_of_type(relation_type).next().is_some()
    }

    /// Tests if every sentence has an annotator recorded.
    pub fn is_annotation_complete(&self) -> bool {
        self.sentences.iter().all(Sentence::is_annotated)
    }

    /// Tests if every sentence has a reviewer recorded.
    pub fn is_review_complete(&self) -> bool {
        self.sentences.iter().all(Sentence::is_reviewed)
    }

    /// Returns the aggregate annotation state of this division.
    ///
    /// Annotation completeness gates review completeness: a division whose
    /// sentences are all reviewed but not all annotated is still
    /// [`CompletionState::Unannotated`].
    pub fn completion(&self) -> CompletionState {
        if self.is_annotation_complete() {
            if self.is_review_complete() {
                CompletionState::Reviewed
            } else {
                CompletionState::Annotated
            }
        } else {
            CompletionState::Unannotated
        }
    }

    /// Returns a citation for the division.
    ///
    /// Without sentences this is the division's own citation fragment.
    /// Otherwise the fragment is joined with a range built from the citation
    /// part of the first token of the first sentence and the last token of
    /// the last sentence.
    ///
    /// # Examples
    ///
    /// ```
    /// use stemma_core::division::SourceDivision;
    /// use stemma_core::identifier::DivisionId;
    ///
    /// let division = SourceDivision::new(DivisionId::new(1), 1, "Liber I", "Caes. Gal. 1");
    /// assert_eq!(division.citation(), "Caes. Gal. 1");
    /// ```
    pub fn citation(&self) -> String {
        let first = self
            .sentences
            .first()
            .and_then(|sentence| sentence.tokens().first())
            .and_then(Token::citation_part);
        let last = self
            .sentences
            .last()
            .and_then(|sentence| sentence.tokens().last())
            .and_then(Token::citation_part);

        match citation_range(first, last) {
            Some(range) => format!("{} {}", self.citation_part, range),
            None => self.citation_part.clone(),
        }
    }

    /// Returns all contrast groups defined in the division, as the sorted
    /// set of distinct numeric prefixes of the stored values.
    ///
    /// A value like `"12a"` belongs to group 12; a value without a leading
    /// digit belongs to no group.
    pub fn contrast_groups(&self) -> BTreeSet<u32> {
        self.tokens()
            .filter_map(Token::contrast_group)
            .filter_map(leading_group_number)
            .collect()
    }

    /// Deletes a contrast group from the division.
    ///
    /// Clears every token whose contrast-group value starts with the decimal
    /// rendering of `group`, so deleting group 12 clears `"12"`, `"120"`,
    /// and `"12a"` alike. Returns the number of tokens cleared.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidContrastGroup`] if `group` is not a
    /// positive integer; nothing is mutated in that case.
    pub fn delete_contrast_group(&mut self, group: i64) -> Result<usize, ModelError> {
        if group <= 0 {
            return Err(ModelError::InvalidContrastGroup(group));
        }

        let prefix = group.to_string();
        let mut cleared = 0;
        for sentence in &mut self.sentences {
            for token in sentence.tokens_mut() {
                if token
                    .contrast_group()
                    .is_some_and(|value| value.starts_with(&prefix))
                {
                    token.clear_contrast_group();
                    cleared += 1;
                }
            }
        }

        debug!(division = self.id.value(), group = group, cleared = cleared; "Deleted contrast group");
        Ok(cleared)
    }
}

/// Builds the `first`-`last` citation range, collapsing to a single part
/// when both are equal or one side is missing.
fn citation_range(first: Option<&str>, last: Option<&str>) -> Option<String> {
    match (first, last) {
        (Some(first), Some(last)) if first == last => Some(first.to_string()),
        (Some(first), Some(last)) => Some(format!("{first}\u{2013}{last}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

/// Extracts the leading decimal number of a contrast-group value.
fn leading_group_number(value: &str) -> Option<u32> {
    let digits: &str = value
        .split_once(|c: char| !c.is_ascii_digit())
        .map(|(head, _)| head)
        .unwrap_or(value);
    digits.parse().ok()
}
