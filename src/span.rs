use std::fmt;
use std::ops::Range;

/// Half-open interval `[left, right)` of token positions in one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    left: usize,
    right: usize,
}

impl Span {
    /// Returns `None` for an empty span, which never names a phrase.
    pub fn new(left: usize, right: usize) -> Option<Span> {
        if left < right {
            Some(Span { left, right })
        } else {
            None
        }
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn positions(&self) -> Range<usize> {
        self.left..self.right
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.left <= other.left && other.right <= self.right
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.left < other.right && other.left < self.right
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.left, self.right)
    }
}

/// One span per stream: index 0 is the source, 1..=N the targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase {
    spans: Vec<Span>,
}

impl Phrase {
    pub fn from_source(source: Span) -> Phrase {
        Phrase { spans: vec![source] }
    }

    pub fn from_spans(spans: Vec<Span>) -> Phrase {
        Phrase { spans }
    }

    pub fn source(&self) -> Span {
        self.spans[0]
    }

    pub fn span(&self, stream: usize) -> Span {
        self.spans[stream]
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn num_streams(&self) -> usize {
        self.spans.len()
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// True if `other` sits inside this phrase on every stream.
    pub fn contains(&self, other: &Phrase) -> bool {
        self.spans.len() == other.spans.len()
            && self.spans.iter().zip(&other.spans).all(|(a, b)| a.contains(b))
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let spans: Vec<String> = self.spans.iter().map(|s| s.to_string()).collect();
        write!(f, "[{}]", spans.join(", "))
    }
}
