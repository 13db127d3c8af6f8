//! Semantic-relation edges between tokens.

use serde::{Deserialize, Serialize};

use crate::identifier::{RelationType, TokenId};

/// A directed semantic-relation edge between two tokens.
///
/// The `source` token anchors the relation and the `controller` token is
/// what the relation points at; a graph edge is drawn source→controller.
/// Relations are stored as a flat edge list on the division. Nothing
/// requires the resulting graph to be acyclic: consumers only ever perform
/// local neighborhood queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticRelation {
    relation_type: RelationType,
    /// Human-readable label displayed on the edge (for example `"RESTAT"`).
    tag: String,
    source: TokenId,
    controller: TokenId,
}

impl SemanticRelation {
    /// Creates a new relation edge of the given type.
    pub fn new(
        relation_type: RelationType,
        tag: impl Into<String>,
        source: TokenId,
        controller: TokenId,
    ) -> Self {
        Self {
            relation_type,
            tag: tag.into(),
            source,
            controller,
        }
    }

    /// Returns the relation type of this edge.
    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    /// Returns the human-readable label of this edge.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the anchoring token of this edge.
    pub fn source(&self) -> TokenId {
        self.source
    }

    /// Returns the controlled token of this edge.
    pub fn controller(&self) -> TokenId {
        self.controller
    }
}
