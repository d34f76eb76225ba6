//! Reading words and alignments into a validated sentence tuple.

use crate::error::ExtractError;

/// A `(source index, target index)` alignment link.
pub type Link = (usize, usize);

pub fn parse_words(line: &str) -> Vec<String> {
    line.split_whitespace().map(|w| w.to_string()).collect()
}

/// Parses `i-j` tokens; anything after the second integer (`0-1-P`) is ignored.
pub fn parse_align(line: &str) -> Result<Vec<Link>, ExtractError> {
    line.split_whitespace().map(parse_link).collect()
}

fn parse_link(token: &str) -> Result<Link, ExtractError> {
    let malformed = || ExtractError::MalformedAlignment {
        token: token.to_string(),
    };
    let mut parts = token.split('-');
    let i = parts.next().and_then(|x| x.parse().ok()).ok_or_else(malformed)?;
    let j = parts.next().and_then(|x| x.parse().ok()).ok_or_else(malformed)?;
    Ok((i, j))
}

/// One source sentence with N target sentences and their alignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceTuple {
    words: Vec<Vec<String>>,
    aligns: Vec<Vec<Link>>,
}

impl SentenceTuple {
    /// `words[0]` is the source; `aligns[k]` links the source to `words[k + 1]`.
    pub fn new(words: Vec<Vec<String>>, aligns: Vec<Vec<Link>>) -> Result<Self, ExtractError> {
        if words.is_empty() || words.len() != aligns.len() + 1 {
            return Err(ExtractError::StreamCountMismatch {
                expected: aligns.len(),
                found: words.len().saturating_sub(1),
            });
        }
        let source_len = words[0].len();
        for (k, links) in aligns.iter().enumerate() {
            let target_len = words[k + 1].len();
            if let Some(&(i, j)) = links.iter().find(|&&(i, j)| i >= source_len || j >= target_len) {
                return Err(ExtractError::AlignmentOutOfRange {
                    stream: k + 1,
                    source_idx: i,
                    target_idx: j,
                    source_len,
                    target_len,
                });
            }
        }
        Ok(SentenceTuple { words, aligns })
    }

    /// Builds a tuple from raw text: the source line, then a `(target, alignment)`
    /// pair of lines per target stream.
    pub fn from_lines(source: &str, targets: &[(&str, &str)]) -> Result<Self, ExtractError> {
        let mut words = vec![parse_words(source)];
        let mut aligns = Vec::with_capacity(targets.len());
        for &(target, align) in targets {
            words.push(parse_words(target));
            aligns.push(parse_align(align)?);
        }
        SentenceTuple::new(words, aligns)
    }

    pub fn words(&self) -> &[Vec<String>] {
        &self.words
    }

    pub fn aligns(&self) -> &[Vec<Link>] {
        &self.aligns
    }

    pub fn num_trgs(&self) -> usize {
        self.aligns.len()
    }

    pub fn stream_lens(&self) -> Vec<usize> {
        self.words.iter().map(|w| w.len()).collect()
    }
}
