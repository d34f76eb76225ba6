use std::io;

use thiserror::Error;

/// Everything that can go wrong while reading or extracting a sentence tuple.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// An alignment token was not of the form `i-j`
    #[error("malformed alignment token: {token:?}")]
    MalformedAlignment { token: String },

    /// An alignment link points past the end of one of its sentences
    #[error(
        "alignment {source_idx}-{target_idx} in stream {stream} is out of range \
         (source length {source_len}, target length {target_len})"
    )]
    AlignmentOutOfRange {
        stream: usize,
        source_idx: usize,
        target_idx: usize,
        source_len: usize,
        target_len: usize,
    },

    /// The tuple carries a different number of targets than configured
    #[error("expected {expected} target streams, found {found}")]
    StreamCountMismatch { expected: usize, found: usize },

    /// A line of the given stream is not valid UTF-8
    #[error("stream {stream} is not valid UTF-8")]
    InvalidUtf8 { stream: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A failure inside one sentence tuple, tagged with where it happened
    #[error("sentence {index}: {source} (input: {content:?})")]
    Sentence {
        index: usize,
        content: String,
        source: Box<ExtractError>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ExtractError {
    pub fn in_sentence(self, index: usize, content: impl Into<String>) -> Self {
        ExtractError::Sentence {
            index,
            content: content.into(),
            source: Box::new(self),
        }
    }
}
