//! Stemma - Relation graphs and sentence alignment for annotated corpora.
//!
//! Discourse-structure rendering and parallel-text alignment for the corpus
//! model defined in `stemma-core`. A division's semantic relations are
//! indexed, described as a deterministic DOT graph, and laid out through an
//! external Graphviz process; the sentences of parallel divisions are
//! aligned by combining stored links with content-based sequence diffing.

pub mod align;
pub mod config;
pub mod graph;
pub mod relation;
pub mod render;

mod error;

pub use error::StemmaError;

use log::{debug, info};

use stemma_core::{corpus::Corpus, division::SourceDivision, identifier::RelationType};

use align::AlignedPair;
use config::AppConfig;
use graph::RelationGraph;
use render::GraphvizRenderer;

/// Entry point for analyzing and rendering corpus divisions.
///
/// This provides an API for processing divisions through the relation
/// indexing, graph description, and rendering stages, and for computing
/// sentence alignments between parallel divisions.
///
/// # Examples
///
/// ```rust,no_run
/// use stemma::{DivisionAnalyzer, config::AppConfig};
/// use stemma_core::{division::SourceDivision, identifier::{DivisionId, RelationType}};
///
/// let division = SourceDivision::new(DivisionId::new(1), 1, "Liber I", "1");
///
/// // With custom config
/// let config = AppConfig::default();
/// let analyzer = DivisionAnalyzer::new(config);
///
/// // Describe the relation structure as a graph
/// let graph = analyzer.relation_graph(&division, RelationType::new("Discourse"));
///
/// // Lay it out through the external process
/// let image = analyzer.render_graph(&graph)
///     .expect("Failed to render");
///
/// // Or use default config
/// let analyzer = DivisionAnalyzer::default();
/// ```
#[derive(Default)]
pub struct DivisionAnalyzer {
    config: AppConfig,
}

impl DivisionAnalyzer {
    /// Create a new division analyzer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including renderer and annotation settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Describe the relation structure of a division as a graph.
    ///
    /// This indexes the division's relations of the requested type,
    /// resolves heads and their token spans, and produces the node/edge
    /// description. The stage is pure: no external process is involved.
    ///
    /// # Arguments
    ///
    /// * `division` - The division whose relations are described
    /// * `relation_type` - The annotation layer to describe
    pub fn relation_graph(
        &self,
        division: &SourceDivision,
        relation_type: RelationType,
    ) -> RelationGraph {
        info!(
            division = division.id().value(),
            relation_type:% = relation_type;
            "Building relation graph"
        );

        let graph = RelationGraph::from_division(division, relation_type);

        debug!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len();
            "Relation graph built"
        );

        graph
    }

    /// Render a graph description to image bytes.
    ///
    /// This serializes the description to DOT and pipes it through the
    /// configured external layout process.
    ///
    /// # Errors
    ///
    /// Returns `StemmaError` when the layout process cannot be spawned,
    /// reports diagnostics, exits non-zero, or exceeds its time budget.
    pub fn render_graph(&self, graph: &RelationGraph) -> Result<Vec<u8>, StemmaError> {
        let renderer = GraphvizRenderer::new(self.config.renderer().clone());
        let rendered = renderer.render(&graph.to_dot())?;

        info!(rendered_bytes = rendered.len(); "Relation graph rendered");
        Ok(rendered)
    }

    /// Describe and render a division's relation structure in one step.
    ///
    /// # Arguments
    ///
    /// * `division` - The division whose relations are rendered
    /// * `relation_type` - The annotation layer to render
    ///
    /// # Errors
    ///
    /// Returns `StemmaError` for rendering errors; an empty graph is not an
    /// error and renders as an empty image.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use stemma::{DivisionAnalyzer, config::AppConfig};
    /// use stemma_core::{division::SourceDivision, identifier::{DivisionId, RelationType}};
    ///
    /// let division = SourceDivision::new(DivisionId::new(1), 1, "Liber I", "1");
    /// let analyzer = DivisionAnalyzer::new(AppConfig::default());
    ///
    /// let image = analyzer.render_relation_graph(&division, RelationType::new("Discourse"))
    ///     .expect("Failed to render division");
    /// ```
    pub fn render_relation_graph(
        &self,
        division: &SourceDivision,
        relation_type: RelationType,
    ) -> Result<Vec<u8>, StemmaError> {
        let graph = self.relation_graph(division, relation_type);
        self.render_graph(&graph)
    }

    /// Align a division's sentences with its configured aligned division.
    ///
    /// Stored sentence links are kept as matched pairs; `automatic`
    /// controls whether the stretches between them are filled in by content
    /// diffing or reported one-sided. Returns an empty sequence when the
    /// division has no resolvable aligned division.
    pub fn sentence_alignments<'a>(
        &self,
        corpus: &'a Corpus,
        division: &'a SourceDivision,
        automatic: bool,
    ) -> Vec<AlignedPair<'a>> {
        align::sentence_alignments(corpus, division, automatic)
    }
}
