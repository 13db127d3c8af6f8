//! CLI logic for the Stemma corpus tool.
//!
//! This module contains the core CLI logic for the Stemma corpus tool. The
//! subcommands operate on a JSON corpus snapshot: `render` exports the
//! semantic-relation graph of a division, `align` prints sentence
//! alignments between parallel divisions, and `status` reports annotation
//! state.

mod args;
mod config;

pub use args::{AlignArgs, Args, Command, RenderArgs, StatusArgs};

use std::{fmt::Write as _, fs};

use log::info;

use stemma::{DivisionAnalyzer, StemmaError, align::AlignedPair, config::AppConfig};
use stemma_core::{
    corpus::Corpus,
    division::SourceDivision,
    identifier::{DivisionId, RelationType},
    sentence::Sentence,
};

/// Run the Stemma CLI application
///
/// This function loads the configuration and the corpus snapshot, then
/// dispatches to the selected subcommand.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StemmaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed corpus snapshots
/// - Unknown division identifiers
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), StemmaError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Render(render_args) => render(render_args, app_config),
        Command::Align(align_args) => align(align_args, app_config),
        Command::Status(status_args) => status(status_args, app_config),
    }
}

fn render(args: &RenderArgs, app_config: AppConfig) -> Result<(), StemmaError> {
    info!(
        corpus = args.corpus,
        division = args.division,
        output_path = args.output;
        "Rendering relation graph"
    );

    let corpus = load_corpus(&args.corpus)?;
    let division = find_division(&corpus, args.division)?;

    let tag = args
        .relation_type
        .as_deref()
        .unwrap_or(app_config.annotation().relation_type());
    let relation_type = RelationType::new(tag);

    let analyzer = DivisionAnalyzer::new(app_config);
    let rendered = analyzer.render_relation_graph(division, relation_type)?;
    fs::write(&args.output, rendered)?;

    info!(output_file = args.output; "Relation graph exported successfully");

    Ok(())
}

fn align(args: &AlignArgs, app_config: AppConfig) -> Result<(), StemmaError> {
    info!(
        corpus = args.corpus,
        division = args.division,
        automatic = args.automatic;
        "Aligning sentences"
    );

    let corpus = load_corpus(&args.corpus)?;
    let division = find_division(&corpus, args.division)?;

    let analyzer = DivisionAnalyzer::new(app_config);
    let pairs = analyzer.sentence_alignments(&corpus, division, args.automatic);
    print!("{}", format_alignments(&pairs));

    info!(pairs = pairs.len(); "Sentence alignments computed");

    Ok(())
}

fn status(args: &StatusArgs, app_config: AppConfig) -> Result<(), StemmaError> {
    info!(corpus = args.corpus; "Reporting annotation status");

    let corpus = load_corpus(&args.corpus)?;
    let relation_type = RelationType::new(app_config.annotation().relation_type());

    match args.division {
        Some(id) => {
            let division = find_division(&corpus, id)?;
            print!("{}", format_status(&corpus, division, relation_type));
        }
        None => {
            for source in corpus.sources() {
                for division in source.divisions() {
                    print!("{}", format_status(&corpus, division, relation_type));
                }
            }
        }
    }

    Ok(())
}

/// Load and deserialize a corpus snapshot
fn load_corpus(path: &str) -> Result<Corpus, StemmaError> {
    info!(corpus = path; "Loading corpus snapshot");

    let content = fs::read_to_string(path)?;
    let corpus = serde_json::from_str(&content)
        .map_err(|err| StemmaError::Corpus(err.to_string()))?;

    Ok(corpus)
}

fn find_division(corpus: &Corpus, id: u32) -> Result<&SourceDivision, StemmaError> {
    let id = DivisionId::new(id);
    corpus
        .division(id)
        .ok_or(StemmaError::DivisionNotFound(id))
}

/// Formats alignment pairs as tab-separated lines: base and aligned
/// sentence numbers (`-` for an absent side) followed by the two texts.
fn format_alignments(pairs: &[AlignedPair<'_>]) -> String {
    let mut out = String::new();
    for pair in pairs {
        let base_number = pair
            .base()
            .map_or("-".to_string(), |s| s.number().to_string());
        let aligned_number = pair
            .aligned()
            .map_or("-".to_string(), |s| s.number().to_string());
        let base_text = pair.base().map(Sentence::text).unwrap_or_default();
        let aligned_text = pair.aligned().map(Sentence::text).unwrap_or_default();
        let _ = writeln!(
            out,
            "{base_number}\t{aligned_number}\t{base_text}\t{aligned_text}"
        );
    }
    out
}

/// Formats one division's annotation status block.
fn format_status(
    corpus: &Corpus,
    division: &SourceDivision,
    relation_type: RelationType,
) -> String {
    let groups: Vec<String> = division
        .contrast_groups()
        .iter()
        .map(u32::to_string)
        .collect();
    let groups = if groups.is_empty() {
        "none".to_string()
    } else {
        groups.join(", ")
    };
    let annotated = if division.has_relation_type(relation_type) {
        "yes"
    } else {
        "no"
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} (division {})", division.title(), division.id());
    let _ = writeln!(
        out,
        "  language:        {}",
        corpus.language_tag_of(division.id()).unwrap_or("unknown")
    );
    let _ = writeln!(out, "  citation:        {}", division.citation());
    let _ = writeln!(out, "  completion:      {}", division.completion());
    let _ = writeln!(out, "  contrast groups: {groups}");
    let _ = writeln!(out, "  {relation_type} annotation: {annotated}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use stemma_core::{
        corpus::Source,
        identifier::{SentenceId, SourceId, TokenId},
        relation::SemanticRelation,
        token::Token,
    };

    fn sentence(id: u32, number: u32, text: &str) -> Sentence {
        let tokens = text
            .split_whitespace()
            .enumerate()
            .map(|(offset, form)| {
                Token::new(TokenId::new(id * 100 + offset as u32), offset as u32 + 1, form)
            })
            .collect();
        Sentence::new(SentenceId::new(id), number, tokens)
    }

    fn fixture_corpus() -> Corpus {
        let base = SourceDivision::new(DivisionId::new(1), 1, "Liber I", "1")
            .with_aligned_division(DivisionId::new(2))
            .with_sentences(vec![
                sentence(10, 1, "arma virumque cano").with_annotated_by("mlj"),
                sentence(11, 2, "Troiae qui primus"),
            ])
            .with_relations(vec![SemanticRelation::new(
                RelationType::new("Discourse"),
                "RESTAT",
                TokenId::new(1000),
                TokenId::new(1002),
            )]);
        let aligned = SourceDivision::new(DivisionId::new(2), 1, "Book I", "1").with_sentences(
            vec![
                sentence(20, 1, "arma virumque cano"),
                sentence(21, 2, "Troiae qui primus"),
            ],
        );

        Corpus::new(vec![
            Source::new(SourceId::new(1), "Aeneis", "la", "Verg. Aen.")
                .with_divisions(vec![base]),
            Source::new(SourceId::new(2), "Aeneid", "en", "Aen. transl.")
                .with_divisions(vec![aligned]),
        ])
    }

    #[test]
    fn test_find_division_reports_unknown_id() {
        let corpus = fixture_corpus();

        assert!(find_division(&corpus, 1).is_ok());
        let err = find_division(&corpus, 99).unwrap_err();
        assert!(matches!(
            err,
            StemmaError::DivisionNotFound(id) if id == DivisionId::new(99)
        ));
    }

    #[test]
    fn test_format_alignments_tabulates_pairs() {
        let corpus = fixture_corpus();
        let division = corpus.division(DivisionId::new(1)).unwrap();
        let analyzer = DivisionAnalyzer::default();

        let pairs = analyzer.sentence_alignments(&corpus, division, true);
        let formatted = format_alignments(&pairs);

        let lines: Vec<&str> = formatted.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "1\t1\tarma virumque cano\tarma virumque cano");
        assert_eq!(lines[1], "2\t2\tTroiae qui primus\tTroiae qui primus");
    }

    #[test]
    fn test_format_alignments_marks_one_sided_pairs() {
        let corpus = fixture_corpus();
        let division = corpus.division(DivisionId::new(1)).unwrap();
        let analyzer = DivisionAnalyzer::default();

        let pairs = analyzer.sentence_alignments(&corpus, division, false);
        let formatted = format_alignments(&pairs);

        assert!(formatted.contains("1\t-\tarma virumque cano\t"));
        assert!(formatted.contains("-\t1\t\tarma virumque cano"));
    }

    #[test]
    fn test_format_status_reports_division_state() {
        let corpus = fixture_corpus();
        let division = corpus.division(DivisionId::new(1)).unwrap();

        let formatted = format_status(&corpus, division, RelationType::new("Discourse"));

        assert!(formatted.starts_with("Liber I (division 1)"));
        assert!(formatted.contains("  language:        la"));
        assert!(formatted.contains("  completion:      unannotated"));
        assert!(formatted.contains("  contrast groups: none"));
        assert!(formatted.contains("  Discourse annotation: yes"));
    }

    #[test]
    fn test_format_status_for_unannotated_layer() {
        let corpus = fixture_corpus();
        let division = corpus.division(DivisionId::new(2)).unwrap();

        let formatted = format_status(&corpus, division, RelationType::new("Discourse"));

        assert!(formatted.contains("  Discourse annotation: no"));
    }
}
