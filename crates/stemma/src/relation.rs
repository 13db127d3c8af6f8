//! Per-request indexing of semantic relations and head-span resolution.
//!
//! A [`RelationIndex`] is built once per graph request from a division and a
//! relation type. It records document order for every token (the position
//! table), the edges of the requested type keyed by both endpoints, and the
//! resulting head set. On top of the index, head spans and span containment
//! determine which heads are nested inside which ([`RelationIndex::span`],
//! [`RelationIndex::enclosing_head`]).

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};

use stemma_core::{
    division::SourceDivision,
    identifier::{RelationType, TokenId},
    relation::SemanticRelation,
    token::Token,
};

/// An inclusive range of token positions within a division.
///
/// Positions are document-order indices assigned by the [`RelationIndex`],
/// not token identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    start: usize,
    end: usize,
}

impl TokenSpan {
    /// Creates the degenerate span covering a single position.
    pub fn point(position: usize) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    /// Returns the smallest span covering this span and the given position.
    pub fn cover(self, position: usize) -> Self {
        Self {
            start: self.start.min(position),
            end: self.end.max(position),
        }
    }

    /// Returns the first covered position.
    pub fn start(self) -> usize {
        self.start
    }

    /// Returns the last covered position.
    pub fn end(self) -> usize {
        self.end
    }

    /// Returns the number of covered positions.
    pub fn len(self) -> usize {
        self.end - self.start + 1
    }

    /// Returns whether this span strictly contains `other`.
    ///
    /// Equal spans do not contain each other, and partial overlap is never
    /// containment.
    pub fn encloses(self, other: TokenSpan) -> bool {
        self != other && self.start <= other.start && other.end <= self.end
    }
}

/// An index over one division's relation edges of a single type.
///
/// Built once per graph request. Head tokens are the tokens participating
/// in at least one edge of the requested type, as source or as controller;
/// the head set preserves document order and is de-duplicated by
/// construction.
pub struct RelationIndex<'d> {
    relation_type: RelationType,
    /// Token position table; insertion order is document order.
    tokens: IndexMap<TokenId, &'d Token>,
    edges: Vec<&'d SemanticRelation>,
    outgoing: HashMap<TokenId, Vec<usize>>,
    incoming: HashMap<TokenId, Vec<usize>>,
    heads: Vec<TokenId>,
}

impl<'d> RelationIndex<'d> {
    /// Builds the index for one division and relation type.
    ///
    /// One pass over the tokens fixes document positions; one pass over the
    /// edge list keys the edges of the requested type by both endpoints.
    /// Edges mentioning a token the division does not contain are skipped
    /// with a warning.
    pub fn build(division: &'d SourceDivision, relation_type: RelationType) -> Self {
        let mut tokens = IndexMap::new();
        for token in division.tokens() {
            tokens.entry(token.id()).or_insert(token);
        }

        let mut edges: Vec<&'d SemanticRelation> = Vec::new();
        let mut outgoing: HashMap<TokenId, Vec<usize>> = HashMap::new();
        let mut incoming: HashMap<TokenId, Vec<usize>> = HashMap::new();
        for relation in division.relations_of_type(relation_type) {
            if !tokens.contains_key(&relation.source())
                || !tokens.contains_key(&relation.controller())
            {
                warn!(
                    source = relation.source().value(),
                    controller = relation.controller().value();
                    "Skipping relation with an endpoint outside the division"
                );
                continue;
            }

            let index = edges.len();
            edges.push(relation);
            outgoing.entry(relation.source()).or_default().push(index);
            incoming
                .entry(relation.controller())
                .or_default()
                .push(index);
        }

        let heads: Vec<TokenId> = tokens
            .keys()
            .filter(|id| outgoing.contains_key(*id) || incoming.contains_key(*id))
            .copied()
            .collect();

        debug!(
            relation_type:% = relation_type,
            tokens = tokens.len(),
            edges = edges.len(),
            heads = heads.len();
            "Built relation index"
        );

        Self {
            relation_type,
            tokens,
            edges,
            outgoing,
            incoming,
            heads,
        }
    }

    /// Returns the relation type this index was built for.
    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    /// Returns the head tokens in document order.
    pub fn heads(&self) -> &[TokenId] {
        &self.heads
    }

    /// Returns the document position of a token.
    pub fn position(&self, id: TokenId) -> Option<usize> {
        self.tokens.get_index_of(&id)
    }

    /// Returns the token at a document position.
    pub fn token_at(&self, position: usize) -> Option<&'d Token> {
        self.tokens.get_index(position).map(|(_, token)| *token)
    }

    /// Iterates over the edges anchored at the given token, in edge-list
    /// order.
    pub fn outgoing(&self, id: TokenId) -> impl Iterator<Item = &'d SemanticRelation> {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&index| self.edges[index])
    }

    /// Iterates over the edges controlling the given token, in edge-list
    /// order.
    pub fn incoming(&self, id: TokenId) -> impl Iterator<Item = &'d SemanticRelation> {
        self.incoming
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&index| self.edges[index])
    }

    /// Returns whether the given token anchors any edge.
    pub fn has_outgoing(&self, id: TokenId) -> bool {
        self.outgoing.contains_key(&id)
    }

    /// Returns the span of a head: the position hull over the head itself
    /// and both endpoints of every edge it anchors.
    ///
    /// A head without outgoing edges has the degenerate span of its own
    /// position. Incoming edges never extend a span; extending by them
    /// would let a contained head swallow its container's range.
    pub fn span(&self, head: TokenId) -> Option<TokenSpan> {
        let mut span = TokenSpan::point(self.position(head)?);
        for relation in self.outgoing(head) {
            if let Some(position) = self.position(relation.source()) {
                span = span.cover(position);
            }
            if let Some(position) = self.position(relation.controller()) {
                span = span.cover(position);
            }
        }
        Some(span)
    }

    /// Returns the nearest head whose span strictly contains the given
    /// head's span.
    ///
    /// Among the enclosing candidates the one with the shortest span wins;
    /// remaining ties go to the earliest document position. Overlapping
    /// spans where neither contains the other are no containment.
    pub fn enclosing_head(&self, head: TokenId) -> Option<TokenId> {
        let target = self.span(head)?;

        let mut nearest: Option<(usize, usize, TokenId)> = None;
        for &candidate in &self.heads {
            if candidate == head {
                continue;
            }
            let Some(candidate_span) = self.span(candidate) else {
                continue;
            };
            if !candidate_span.encloses(target) {
                continue;
            }
            let Some(position) = self.position(candidate) else {
                continue;
            };

            let key = (candidate_span.len(), position, candidate);
            let closer = match nearest {
                None => true,
                Some((best_len, best_position, _)) => (key.0, key.1) < (best_len, best_position),
            };
            if closer {
                nearest = Some(key);
            }
        }

        nearest.map(|(_, _, id)| id)
    }

    /// Returns the text covered by a span: the token forms of the covered
    /// positions joined by single spaces.
    pub fn span_text(&self, span: TokenSpan) -> String {
        let forms: Vec<&str> = (span.start()..=span.end())
            .filter_map(|position| self.token_at(position))
            .map(Token::form)
            .collect();
        forms.join(" ")
    }
}
