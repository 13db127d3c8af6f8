//! Sources and the corpus snapshot.
//!
//! A [`Corpus`] is an immutable in-memory snapshot of the storage layer:
//! ordered sources, each holding ordered divisions. Lookups by division id
//! and alignment-link resolution go through the corpus so that callers never
//! chase raw identifiers themselves.

use serde::{Deserialize, Serialize};

use crate::{
    division::SourceDivision,
    identifier::{DivisionId, SourceId},
};

/// A source text: the root of the division hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    id: SourceId,
    title: String,
    /// BCP 47 language tag of the text, e.g. `"la"` or `"grc"`.
    language_tag: String,
    citation_part: String,
    #[serde(default)]
    divisions: Vec<SourceDivision>,
}

impl Source {
    /// Creates a new source without divisions.
    pub fn new(
        id: SourceId,
        title: impl Into<String>,
        language_tag: impl Into<String>,
        citation_part: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            language_tag: language_tag.into(),
            citation_part: citation_part.into(),
            divisions: Vec::new(),
        }
    }

    /// Sets the ordered divisions of this source.
    pub fn with_divisions(mut self, divisions: Vec<SourceDivision>) -> Self {
        self.divisions = divisions;
        self
    }

    /// Returns the source identifier.
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Returns the title of the source.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the language tag of the source.
    pub fn language_tag(&self) -> &str {
        &self.language_tag
    }

    /// Returns the citation fragment of the source.
    pub fn citation_part(&self) -> &str {
        &self.citation_part
    }

    /// Borrows the divisions of this source.
    pub fn divisions(&self) -> &[SourceDivision] {
        &self.divisions
    }

    /// Looks up a division of this source by id.
    pub fn division(&self, id: DivisionId) -> Option<&SourceDivision> {
        self.divisions.iter().find(|division| division.id() == id)
    }

    /// Returns the division preceding the given one in this source, by
    /// position.
    pub fn previous_division(&self, division: &SourceDivision) -> Option<&SourceDivision> {
        self.divisions
            .iter()
            .filter(|candidate| candidate.position() < division.position())
            .max_by_key(|candidate| candidate.position())
    }

    /// Returns the division following the given one in this source, by
    /// position.
    pub fn next_division(&self, division: &SourceDivision) -> Option<&SourceDivision> {
        self.divisions
            .iter()
            .filter(|candidate| candidate.position() > division.position())
            .min_by_key(|candidate| candidate.position())
    }
}

/// An immutable snapshot of the corpus: the ordered sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    sources: Vec<Source>,
}

impl Corpus {
    /// Creates a corpus from its sources.
    pub fn new(sources: Vec<Source>) -> Self {
        Self { sources }
    }

    /// Borrows the sources of the corpus.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Looks up a division anywhere in the corpus by id.
    pub fn division(&self, id: DivisionId) -> Option<&SourceDivision> {
        self.sources.iter().find_map(|source| source.division(id))
    }

    /// Looks up a division mutably, for the contrast-group deletion path.
    pub fn division_mut(&mut self, id: DivisionId) -> Option<&mut SourceDivision> {
        self.sources.iter_mut().find_map(|source| {
            source
                .divisions
                .iter_mut()
                .find(|division| division.id() == id)
        })
    }

    /// Returns the source a division belongs to.
    pub fn source_of(&self, id: DivisionId) -> Option<&Source> {
        self.sources
            .iter()
            .find(|source| source.division(id).is_some())
    }

    /// Returns the language tag of the source a division belongs to.
    pub fn language_tag_of(&self, id: DivisionId) -> Option<&str> {
        self.source_of(id).map(Source::language_tag)
    }

    /// Resolves the stored alignment link of a division.
    ///
    /// A missing link, or a link pointing at a division the corpus does not
    /// contain, both resolve to `None`; dangling links are an expected
    /// storage state, not an error.
    pub fn aligned_division(&self, division: &SourceDivision) -> Option<&SourceDivision> {
        division
            .aligned_division()
            .and_then(|aligned| self.division(aligned))
    }

    /// Returns the divisions that are candidates for alignment with the
    /// given division: every division belonging to a different source.
    pub fn alignment_candidates(&self, division: &SourceDivision) -> Vec<&SourceDivision> {
        let owner = self.source_of(division.id()).map(Source::id);
        self.sources
            .iter()
            .filter(|source| Some(source.id()) != owner)
            .flat_map(|source| source.divisions())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn division(id: u32, position: u32) -> SourceDivision {
        SourceDivision::new(DivisionId::new(id), position, format!("Liber {id}"), "Cit.")
    }

    fn two_source_corpus() -> Corpus {
        let latin = Source::new(SourceId::new(1), "Opus Latinum", "la", "Lat.").with_divisions(
            vec![division(10, 1), division(11, 2), division(12, 3)],
        );
        let greek = Source::new(SourceId::new(2), "Ergon Hellenikon", "grc", "Gr.")
            .with_divisions(vec![division(20, 1), division(21, 2)]);
        Corpus::new(vec![latin, greek])
    }

    #[test]
    fn test_division_lookup_across_sources() {
        let corpus = two_source_corpus();
        assert_eq!(
            corpus.division(DivisionId::new(21)).map(|d| d.position()),
            Some(2)
        );
        assert!(corpus.division(DivisionId::new(99)).is_none());
    }

    #[test]
    fn test_previous_and_next_division() {
        let corpus = two_source_corpus();
        let source = corpus.source_of(DivisionId::new(11)).unwrap();
        let middle = source.division(DivisionId::new(11)).unwrap();

        assert_eq!(
            source.previous_division(middle).map(|d| d.id()),
            Some(DivisionId::new(10))
        );
        assert_eq!(
            source.next_division(middle).map(|d| d.id()),
            Some(DivisionId::new(12))
        );

        let first = source.division(DivisionId::new(10)).unwrap();
        assert!(source.previous_division(first).is_none());
        let last = source.division(DivisionId::new(12)).unwrap();
        assert!(source.next_division(last).is_none());
    }

    #[test]
    fn test_language_tag_delegation() {
        let corpus = two_source_corpus();
        assert_eq!(corpus.language_tag_of(DivisionId::new(10)), Some("la"));
        assert_eq!(corpus.language_tag_of(DivisionId::new(20)), Some("grc"));
        assert_eq!(corpus.language_tag_of(DivisionId::new(99)), None);
    }

    #[test]
    fn test_aligned_division_resolution() {
        let latin = Source::new(SourceId::new(1), "Opus", "la", "Lat.").with_divisions(vec![
            division(10, 1).with_aligned_division(DivisionId::new(20)),
            division(11, 2).with_aligned_division(DivisionId::new(404)),
            division(12, 3),
        ]);
        let greek = Source::new(SourceId::new(2), "Ergon", "grc", "Gr.")
            .with_divisions(vec![division(20, 1)]);
        let corpus = Corpus::new(vec![latin, greek]);

        let linked = corpus.division(DivisionId::new(10)).unwrap();
        assert_eq!(
            corpus.aligned_division(linked).map(|d| d.id()),
            Some(DivisionId::new(20))
        );

        // Dangling links behave like absent links.
        let dangling = corpus.division(DivisionId::new(11)).unwrap();
        assert!(corpus.aligned_division(dangling).is_none());

        let unlinked = corpus.division(DivisionId::new(12)).unwrap();
        assert!(corpus.aligned_division(unlinked).is_none());
    }

    #[test]
    fn test_alignment_candidates_exclude_own_source() {
        let corpus = two_source_corpus();
        let division = corpus.division(DivisionId::new(10)).unwrap();
        let candidates: Vec<DivisionId> = corpus
            .alignment_candidates(division)
            .iter()
            .map(|d| d.id())
            .collect();
        assert_eq!(candidates, vec![DivisionId::new(20), DivisionId::new(21)]);
    }

    #[test]
    fn test_division_mut_reaches_nested_division() {
        let mut corpus = two_source_corpus();
        assert!(corpus.division_mut(DivisionId::new(21)).is_some());
        assert!(corpus.division_mut(DivisionId::new(99)).is_none());
    }
}
