//! Pure assembly of the relation graph description and its DOT rendering.
//!
//! [`RelationGraph`] holds the node/edge description derived from a
//! [`RelationIndex`]: one labeled node per head, one labeled edge per
//! relation instance, and synthetic dashed `CONTAINS` edges for heads that
//! anchor nothing themselves but sit inside another head's span. No I/O
//! happens here; [`RelationGraph::to_dot`] serializes the description
//! deterministically, so repeated builds over the same division are
//! byte-identical and can be snapshot-tested without a renderer.

use std::fmt::Write;

use log::debug;

use stemma_core::{
    division::SourceDivision,
    identifier::{RelationType, TokenId},
};

use crate::relation::RelationIndex;

/// A graph node: one head token and its computed label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    head: TokenId,
    label: String,
}

impl GraphNode {
    /// Returns the head token this node stands for; node identity in the
    /// description is the token identifier.
    pub fn head(&self) -> TokenId {
        self.head
    }

    /// Returns the node label: the head's span text under the requested
    /// relation type.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The kind of a graph edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphEdgeKind {
    /// A relation instance, labeled with the relation's tag.
    Relation { tag: String },
    /// A synthetic containment edge from an enclosing head to a nested
    /// head that anchors no edges itself. Drawn dashed.
    Contains,
}

/// A directed edge of the graph description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    source: TokenId,
    target: TokenId,
    kind: GraphEdgeKind,
}

impl GraphEdge {
    /// Returns the origin of the edge.
    pub fn source(&self) -> TokenId {
        self.source
    }

    /// Returns the destination of the edge.
    pub fn target(&self) -> TokenId {
        self.target
    }

    /// Returns the kind of the edge.
    pub fn kind(&self) -> &GraphEdgeKind {
        &self.kind
    }
}

/// The directed graph description of one division's relations of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationGraph {
    relation_type: RelationType,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl RelationGraph {
    /// Assembles the description from a built index.
    ///
    /// Nodes follow head document order. For every head: a labeled node;
    /// a dashed `CONTAINS` edge from its enclosing head when the head
    /// anchors no edges itself; and one labeled edge per anchored relation,
    /// directed source to controller.
    pub fn from_index(index: &RelationIndex<'_>) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for &head in index.heads() {
            let Some(span) = index.span(head) else {
                continue;
            };
            nodes.push(GraphNode {
                head,
                label: index.span_text(span),
            });

            if !index.has_outgoing(head) {
                if let Some(container) = index.enclosing_head(head) {
                    edges.push(GraphEdge {
                        source: container,
                        target: head,
                        kind: GraphEdgeKind::Contains,
                    });
                }
            }

            for relation in index.outgoing(head) {
                edges.push(GraphEdge {
                    source: relation.source(),
                    target: relation.controller(),
                    kind: GraphEdgeKind::Relation {
                        tag: relation.tag().to_string(),
                    },
                });
            }
        }

        debug!(
            relation_type:% = index.relation_type(),
            nodes = nodes.len(),
            edges = edges.len();
            "Assembled relation graph"
        );

        Self {
            relation_type: index.relation_type(),
            nodes,
            edges,
        }
    }

    /// Builds the index for a division and assembles the description in one
    /// step.
    pub fn from_division(division: &SourceDivision, relation_type: RelationType) -> Self {
        Self::from_index(&RelationIndex::build(division, relation_type))
    }

    /// Returns the relation type the description was built for.
    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    /// Borrows the nodes in head document order.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Borrows the edges in assembly order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Returns whether the description has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serializes the description to the DOT language.
    ///
    /// Output is deterministic. Each node is emitted together with an
    /// invisible zero-label anchor node (`H<id>`) and an invisible edge to
    /// it; Graphviz spreads nodes by width, and the anchor keeps narrow
    /// nodes from collapsing the layout. The anchors are a rendering aid,
    /// not part of the graph content.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph discourse {{");
        let _ = writeln!(out, "\trankdir=TD;");
        let _ = writeln!(out, "\tnode [shape = ellipse];");

        for node in &self.nodes {
            let _ = writeln!(
                out,
                "\t{} [label = \"{}\"];",
                node.head,
                escape_label(node.label())
            );
            let _ = writeln!(out, "\tH{} [label = \"\", shape = none];", node.head);
            let _ = writeln!(out, "\t{} -> H{} [style = invis];", node.head, node.head);
        }

        for edge in &self.edges {
            match edge.kind() {
                GraphEdgeKind::Relation { tag } => {
                    let _ = writeln!(
                        out,
                        "\t{} -> {} [label = \"{}\"];",
                        edge.source,
                        edge.target,
                        escape_label(tag)
                    );
                }
                GraphEdgeKind::Contains => {
                    let _ = writeln!(
                        out,
                        "\t{} -> {} [label = \"CONTAINS\", style = dashed];",
                        edge.source, edge.target
                    );
                }
            }
        }

        let _ = writeln!(out, "}}");
        out
    }
}

/// Escapes a string for use inside a double-quoted DOT label.
fn escape_label(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stemma_core::{
        identifier::{DivisionId, SentenceId},
        relation::SemanticRelation,
        sentence::Sentence,
        token::Token,
    };

    fn discourse() -> RelationType {
        RelationType::new("Discourse")
    }

    fn division_with_forms(forms: &[&str]) -> SourceDivision {
        let tokens = forms
            .iter()
            .enumerate()
            .map(|(i, form)| Token::new(TokenId::new(i as u32 + 1), i as u32 + 1, *form))
            .collect();
        SourceDivision::new(DivisionId::new(1), 1, "Liber I", "Cit. 1")
            .with_sentences(vec![Sentence::new(SentenceId::new(1), 1, tokens)])
    }

    fn edge(source: u32, controller: u32, tag: &str) -> SemanticRelation {
        SemanticRelation::new(discourse(), tag, TokenId::new(source), TokenId::new(controller))
    }

    #[test]
    fn test_empty_graph_is_valid_dot() {
        let division = division_with_forms(&["dixit", "autem"]);
        let graph = RelationGraph::from_division(&division, discourse());

        assert!(graph.is_empty());
        assert_eq!(
            graph.to_dot(),
            "digraph discourse {\n\trankdir=TD;\n\tnode [shape = ellipse];\n}\n"
        );
    }

    #[test]
    fn test_single_relation_dot_output() {
        let division =
            division_with_forms(&["dixit", "autem", "dominus"]).with_relations(vec![edge(
                1, 3, "RESTAT",
            )]);
        let graph = RelationGraph::from_division(&division, discourse());

        let expected = concat!(
            "digraph discourse {\n",
            "\trankdir=TD;\n",
            "\tnode [shape = ellipse];\n",
            "\t1 [label = \"dixit autem dominus\"];\n",
            "\tH1 [label = \"\", shape = none];\n",
            "\t1 -> H1 [style = invis];\n",
            "\t3 [label = \"dominus\"];\n",
            "\tH3 [label = \"\", shape = none];\n",
            "\t3 -> H3 [style = invis];\n",
            "\t1 -> 3 [label = \"RESTAT\"];\n",
            "\t1 -> 3 [label = \"CONTAINS\", style = dashed];\n",
            "}\n"
        );
        assert_eq!(graph.to_dot(), expected);
    }

    #[test]
    fn test_contains_edge_for_nested_anchorless_head() {
        // Token 1 reaches tokens 6 and 3; tokens 3 and 6 anchor nothing and
        // sit inside token 1's span, so each gets exactly one dashed edge.
        let division = division_with_forms(&["a", "b", "c", "d", "e", "f"])
            .with_relations(vec![edge(1, 6, "REL"), edge(1, 3, "REL")]);
        let graph = RelationGraph::from_division(&division, discourse());

        let contains: Vec<(TokenId, TokenId)> = graph
            .edges()
            .iter()
            .filter(|e| *e.kind() == GraphEdgeKind::Contains)
            .map(|e| (e.source(), e.target()))
            .collect();
        assert_eq!(
            contains,
            vec![
                (TokenId::new(1), TokenId::new(3)),
                (TokenId::new(1), TokenId::new(6)),
            ]
        );
    }

    #[test]
    fn test_no_contains_edge_for_head_with_outgoing_edges() {
        // Token 4 is nested inside token 1's span but anchors an edge of
        // its own, so it never becomes the target of a containment edge.
        let division = division_with_forms(&["a", "b", "c", "d", "e", "f"])
            .with_relations(vec![edge(1, 6, "REL"), edge(4, 5, "REL")]);
        let graph = RelationGraph::from_division(&division, discourse());

        let contains_targets: Vec<TokenId> = graph
            .edges()
            .iter()
            .filter(|e| *e.kind() == GraphEdgeKind::Contains)
            .map(GraphEdge::target)
            .collect();
        assert!(!contains_targets.contains(&TokenId::new(4)));
        // Its controlled token and the outermost reach still get one each.
        assert_eq!(contains_targets, vec![TokenId::new(5), TokenId::new(6)]);
    }

    #[test]
    fn test_contains_edges_come_from_the_nearest_container() {
        // Token 3 anchors nothing and is enclosed by both token 1 (span
        // 0..=5) and token 4 (span 2..=3); the tighter container wins.
        // Token 6 anchors nothing and only token 1 encloses it.
        let division = division_with_forms(&["a", "b", "c", "d", "e", "f"])
            .with_relations(vec![edge(1, 6, "REL"), edge(4, 3, "REL")]);
        let graph = RelationGraph::from_division(&division, discourse());

        let contains: Vec<(TokenId, TokenId)> = graph
            .edges()
            .iter()
            .filter(|e| *e.kind() == GraphEdgeKind::Contains)
            .map(|e| (e.source(), e.target()))
            .collect();
        assert_eq!(
            contains,
            vec![
                (TokenId::new(4), TokenId::new(3)),
                (TokenId::new(1), TokenId::new(6)),
            ]
        );
    }

    #[test]
    fn test_node_labels_are_span_texts() {
        let division = division_with_forms(&["dixit", "autem", "dominus"])
            .with_relations(vec![edge(2, 3, "REL")]);
        let graph = RelationGraph::from_division(&division, discourse());

        let labels: Vec<&str> = graph.nodes().iter().map(GraphNode::label).collect();
        assert_eq!(labels, vec!["autem dominus", "dominus"]);
    }

    #[test]
    fn test_determinism_byte_identical_descriptions() {
        let division = division_with_forms(&["a", "b", "c", "d", "e", "f"]).with_relations(vec![
            edge(1, 6, "REL"),
            edge(1, 3, "SUB"),
            edge(4, 5, "REL"),
        ]);

        let first = RelationGraph::from_division(&division, discourse()).to_dot();
        let second = RelationGraph::from_division(&division, discourse()).to_dot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cyclic_relations_do_not_recurse() {
        let division = division_with_forms(&["a", "b"])
            .with_relations(vec![edge(1, 2, "FWD"), edge(2, 1, "BCK")]);
        let graph = RelationGraph::from_division(&division, discourse());

        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("plain"), "plain");
        assert_eq!(escape_label("a \"quote\""), "a \\\"quote\\\"");
        assert_eq!(escape_label("back\\slash"), "back\\\\slash");
    }
}
