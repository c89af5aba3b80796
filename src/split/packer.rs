//! Paragraph packing
//!
//! Partitions an ordered paragraph sequence into numbered parts whose word
//! totals stay within the policy limit, or decides the document is already
//! small enough to leave alone. Paragraph order is preserved exactly;
//! nothing is reordered, duplicated, or dropped.

use crate::config::SplitPolicy;
use crate::document::Paragraph;
use crate::split::counter::count_words;
use crate::split::progress::{ProgressSink, ProgressStage};

/// A contiguous group of paragraphs destined for one output document.
#[derive(Debug, Clone)]
pub struct Part {
    /// 1-based sequence number, contiguous across the document.
    pub number: usize,
    pub paragraphs: Vec<Paragraph>,
    /// Sum of the word counts of `paragraphs`.
    pub word_count: usize,
}

/// Outcome of packing one document.
#[derive(Debug)]
pub enum SplitOutcome {
    /// The whole document fits within the limit and the policy says to
    /// leave such documents untouched.
    Skipped { total_words: usize },
    /// Ordered parts that partition the input paragraphs exactly.
    Split {
        parts: Vec<Part>,
        total_words: usize,
    },
}

/// The part currently being filled. Swapped out wholesale when it closes so
/// the finished `Part` keeps its paragraphs without a copy.
#[derive(Debug)]
struct PartAccumulator {
    number: usize,
    paragraphs: Vec<Paragraph>,
    word_count: usize,
}

impl PartAccumulator {
    fn new(number: usize) -> Self {
        PartAccumulator {
            number,
            paragraphs: Vec::new(),
            word_count: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    fn push(&mut self, paragraph: Paragraph, words: usize) {
        self.paragraphs.push(paragraph);
        self.word_count += words;
    }

    fn close(self) -> Part {
        Part {
            number: self.number,
            paragraphs: self.paragraphs,
            word_count: self.word_count,
        }
    }
}

/// Partition `paragraphs` into parts according to `policy`. Assumes the
/// limit is at least 1, which [`SplitPolicy::new`] enforces.
///
/// Greedy first-fit in input order: a paragraph that would push the current
/// non-empty part past `max_words` closes that part and opens the next one.
/// A paragraph whose own count exceeds the limit is placed alone in an
/// over-limit part rather than divided. The skip decision compares the
/// whole-document total against the limit before any packing happens.
///
/// Progress is emitted per paragraph as whole percentages, only when the
/// percentage actually increases.
pub fn split_document(
    paragraphs: Vec<Paragraph>,
    policy: &SplitPolicy,
    progress: &mut dyn ProgressSink,
) -> SplitOutcome {
    let counts: Vec<usize> = paragraphs
        .iter()
        .map(|paragraph| count_words(&paragraph.text))
        .collect();
    let total_words: usize = counts.iter().sum();

    if policy.skip_under_limit && total_words <= policy.max_words {
        return SplitOutcome::Skipped { total_words };
    }

    let total_paragraphs = paragraphs.len();
    let mut parts: Vec<Part> = Vec::new();
    let mut current = PartAccumulator::new(1);
    let mut last_percent: u8 = 0;

    for (index, (paragraph, words)) in paragraphs.into_iter().zip(counts).enumerate() {
        // Overflow check only fires once the part has content, so an
        // oversized paragraph lands alone in its own part instead of
        // looping forever on an empty one.
        if !current.is_empty() && current.word_count + words > policy.max_words {
            let next = PartAccumulator::new(current.number + 1);
            parts.push(std::mem::replace(&mut current, next).close());
        }
        current.push(paragraph, words);

        let percent = (((index + 1) * 100) / total_paragraphs).min(100) as u8;
        if percent > last_percent {
            last_percent = percent;
            progress.report(
                ProgressStage::Processing,
                percent,
                &format!("Processing paragraph {} of {total_paragraphs}...", index + 1),
            );
        }
    }

    if !current.is_empty() {
        parts.push(current.close());
    }

    SplitOutcome::Split { parts, total_words }
}
