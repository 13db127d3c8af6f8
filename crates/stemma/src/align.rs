//! Sentence alignment across parallel divisions.
//!
//! The aligner combines two signals. Stored per-sentence alignment links
//! are trusted unconditionally and pin their sentences together as matched
//! pairs. The stretches between links are either aligned by a content-based
//! sequence diff (automatic mode) or reported one-sided (manual mode).
//!
//! [`align_indices`] is the pure diff primitive over arbitrary comparable
//! keys; [`sentence_alignments`] applies it to a division and its
//! configured aligned division.

use std::{collections::HashMap, hash::Hash};

use log::{debug, warn};
use similar::{Algorithm, DiffOp, capture_diff_slices};

use stemma_core::{
    corpus::Corpus, division::SourceDivision, identifier::SentenceId, sentence::Sentence,
};

/// One correspondence produced by the aligner: a base sentence, an aligned
/// sentence, or a matched pair of both. At least one side is always
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair<'a> {
    base: Option<&'a Sentence>,
    aligned: Option<&'a Sentence>,
}

impl<'a> AlignedPair<'a> {
    fn matched(base: &'a Sentence, aligned: &'a Sentence) -> Self {
        Self {
            base: Some(base),
            aligned: Some(aligned),
        }
    }

    fn base_only(base: &'a Sentence) -> Self {
        Self {
            base: Some(base),
            aligned: None,
        }
    }

    fn aligned_only(aligned: &'a Sentence) -> Self {
        Self {
            base: None,
            aligned: Some(aligned),
        }
    }

    /// Returns the base-side sentence, if this pair has one.
    pub fn base(&self) -> Option<&'a Sentence> {
        self.base
    }

    /// Returns the aligned-side sentence, if this pair has one.
    pub fn aligned(&self) -> Option<&'a Sentence> {
        self.aligned
    }

    /// Returns whether both sides are present.
    pub fn is_matched(&self) -> bool {
        self.base.is_some() && self.aligned.is_some()
    }
}

/// One step of a computed index alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentStep {
    /// The sequences hold equal keys at these positions.
    Match { base: usize, aligned: usize },
    /// The base key at this position has no counterpart.
    BaseOnly { base: usize },
    /// The aligned key at this position has no counterpart.
    AlignedOnly { aligned: usize },
}

/// Computes a minimal-edit alignment between two key sequences.
///
/// Runs a Myers diff over the keys. Every input index of both sequences
/// appears in exactly one step, in original order on each side; matched
/// steps pair equal keys. Differing stretches stay unmatched on both sides
/// rather than being paired speculatively. The result depends only on the
/// key sequences, so repeated runs agree.
pub fn align_indices<K>(base: &[K], aligned: &[K]) -> Vec<AlignmentStep>
where
    K: Eq + Hash + Ord,
{
    let mut steps = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, base, aligned) {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                for offset in 0..len {
                    steps.push(AlignmentStep::Match {
                        base: old_index + offset,
                        aligned: new_index + offset,
                    });
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                steps.extend(
                    (old_index..old_index + old_len).map(|base| AlignmentStep::BaseOnly { base }),
                );
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                steps.extend(
                    (new_index..new_index + new_len)
                        .map(|aligned| AlignmentStep::AlignedOnly { aligned }),
                );
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                steps.extend(
                    (old_index..old_index + old_len).map(|base| AlignmentStep::BaseOnly { base }),
                );
                steps.extend(
                    (new_index..new_index + new_len)
                        .map(|aligned| AlignmentStep::AlignedOnly { aligned }),
                );
            }
        }
    }
    steps
}

/// Aligns a division's sentences with its configured aligned division.
///
/// Stored per-sentence links become matched pairs unconditionally, even
/// when the sentence texts differ. When `automatic` is set, the stretches
/// between links are aligned by diffing sentence texts; otherwise every
/// unlinked sentence is reported one-sided. With no aligned division
/// configured, or a dangling division link, the result is empty.
///
/// Links that point outside the aligned division, or that would step
/// backwards on the aligned side, are skipped so both sides stay in
/// original order.
pub fn sentence_alignments<'a>(
    corpus: &'a Corpus,
    division: &'a SourceDivision,
    automatic: bool,
) -> Vec<AlignedPair<'a>> {
    let Some(aligned_division) = corpus.aligned_division(division) else {
        debug!(division = division.id().value(); "No aligned division to align against");
        return Vec::new();
    };

    let base = division.sentences();
    let aligned = aligned_division.sentences();

    let aligned_positions: HashMap<SentenceId, usize> = aligned
        .iter()
        .enumerate()
        .map(|(position, sentence)| (sentence.id(), position))
        .collect();

    let mut anchors: Vec<(usize, usize)> = Vec::new();
    for (base_position, sentence) in base.iter().enumerate() {
        let Some(link) = sentence.aligned_sentence() else {
            continue;
        };
        let Some(&aligned_position) = aligned_positions.get(&link) else {
            warn!(
                sentence = sentence.id().value(),
                link = link.value();
                "Alignment link points outside the aligned division"
            );
            continue;
        };
        if anchors
            .last()
            .is_some_and(|&(_, previous)| aligned_position <= previous)
        {
            warn!(
                sentence = sentence.id().value(),
                link = link.value();
                "Alignment link crosses an earlier link"
            );
            continue;
        }
        anchors.push((base_position, aligned_position));
    }

    let mut pairs = Vec::new();
    let mut base_from = 0;
    let mut aligned_from = 0;
    for &(base_anchor, aligned_anchor) in &anchors {
        align_segment(
            &base[base_from..base_anchor],
            &aligned[aligned_from..aligned_anchor],
            automatic,
            &mut pairs,
        );
        pairs.push(AlignedPair::matched(
            &base[base_anchor],
            &aligned[aligned_anchor],
        ));
        base_from = base_anchor + 1;
        aligned_from = aligned_anchor + 1;
    }
    align_segment(
        &base[base_from..],
        &aligned[aligned_from..],
        automatic,
        &mut pairs,
    );

    debug!(
        division = division.id().value(),
        anchors = anchors.len(),
        pairs = pairs.len(),
        automatic = automatic;
        "Computed sentence alignments"
    );

    pairs
}

/// Aligns one stretch between anchors.
fn align_segment<'a>(
    base: &'a [Sentence],
    aligned: &'a [Sentence],
    automatic: bool,
    pairs: &mut Vec<AlignedPair<'a>>,
) {
    if !automatic {
        pairs.extend(base.iter().map(AlignedPair::base_only));
        pairs.extend(aligned.iter().map(AlignedPair::aligned_only));
        return;
    }

    let base_keys: Vec<String> = base.iter().map(Sentence::text).collect();
    let aligned_keys: Vec<String> = aligned.iter().map(Sentence::text).collect();
    for step in align_indices(&base_keys, &aligned_keys) {
        pairs.push(match step {
            AlignmentStep::Match {
                base: base_index,
                aligned: aligned_index,
            } => AlignedPair::matched(&base[base_index], &aligned[aligned_index]),
            AlignmentStep::BaseOnly { base: base_index } => {
                AlignedPair::base_only(&base[base_index])
            }
            AlignmentStep::AlignedOnly {
                aligned: aligned_index,
            } => AlignedPair::aligned_only(&aligned[aligned_index]),
        });
    }
}
