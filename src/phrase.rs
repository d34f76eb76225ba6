//! Minimal phrase discovery, projection onto targets, and null expansion.

use std::collections::BTreeSet;

use crate::align::AlignmentIndex;
use crate::span::{Phrase, Span};

/// Source spans whose first and last words are both aligned.
pub fn create_minimal_srcs(nonnull: &BTreeSet<usize>, len: usize, max_span: usize) -> Vec<Phrase> {
    let mut phrases = Vec::new();
    for i in (0..len).filter(|i| nonnull.contains(i)) {
        let end = i.saturating_add(max_span).min(len + 1);
        for j in (i + 1)..end {
            if !nonnull.contains(&(j - 1)) {
                continue;
            }
            if let Some(span) = Span::new(i, j) {
                phrases.push(Phrase::from_source(span));
            }
        }
    }
    phrases
}

/// Appends the target span of the next stream to every phrase that has a
/// consistent translation there, and drops the rest.
///
/// The target span is the envelope of everything the source span aligns to.
/// It is rejected if any word inside it is aligned outside the source span.
pub fn extract_phrases(phrases: Vec<Phrase>, index: &AlignmentIndex) -> Vec<Phrase> {
    phrases
        .into_iter()
        .filter_map(|mut phrase| {
            let source = phrase.source();
            let mut envelope: Option<(usize, usize)> = None;
            for i in source.positions() {
                for &j in index.targets_of(i) {
                    envelope = Some(match envelope {
                        Some((lo, hi)) => (lo.min(j), hi.max(j + 1)),
                        None => (j, j + 1),
                    });
                }
            }
            let target = envelope.and_then(|(lo, hi)| Span::new(lo, hi))?;
            let consistent = target.positions().all(|j| match index.closure(j) {
                Some((lo, hi)) => lo >= source.left() && hi < source.right(),
                None => true,
            });
            if consistent {
                phrase.push(target);
                Some(phrase)
            } else {
                None
            }
        })
        .collect()
}

/// Every way of widening `span` over adjacent unaligned positions, ordered by
/// left boundary (widest first) and then right boundary (narrowest first).
pub fn extend_range(span: Span, nonnull: &BTreeSet<usize>, len: usize) -> Vec<Span> {
    let mut left = span.left();
    while left > 0 && !nonnull.contains(&(left - 1)) {
        left -= 1;
    }
    let mut right = span.right();
    while right < len && !nonnull.contains(&right) {
        right += 1;
    }
    let mut ranges = Vec::with_capacity((span.left() - left + 1) * (right - span.right() + 1));
    for l in left..=span.left() {
        for r in span.right()..=right {
            ranges.extend(Span::new(l, r));
        }
    }
    ranges
}

/// Expands each minimal phrase into all of its null-widened literal phrases,
/// taking the cross product of the per-stream choices.
pub fn add_nulls(holes: &[Phrase], nonnull: &[BTreeSet<usize>], lens: &[usize]) -> Vec<Phrase> {
    let mut phrases = Vec::new();
    for hole in holes {
        let mut partial: Vec<Vec<Span>> = vec![Vec::with_capacity(hole.num_streams())];
        for (stream, &span) in hole.spans().iter().enumerate() {
            let choices = extend_range(span, &nonnull[stream], lens[stream]);
            partial = partial
                .into_iter()
                .flat_map(|prefix| {
                    choices.iter().map(move |&choice| {
                        let mut spans = prefix.clone();
                        spans.push(choice);
                        spans
                    })
                })
                .collect();
        }
        phrases.extend(partial.into_iter().map(Phrase::from_spans));
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(xs: &[usize]) -> BTreeSet<usize> {
        xs.iter().copied().collect()
    }

    fn phrase(spans: &[(usize, usize)]) -> Phrase {
        Phrase::from_spans(spans.iter().map(|&(l, r)| Span::new(l, r).unwrap()).collect())
    }

    fn taro_a() -> Vec<(usize, usize)> {
        vec![(0, 0), (2, 4), (3, 1), (3, 3), (4, 2), (5, 1), (5, 3)]
    }

    fn taro_holes() -> Vec<Phrase> {
        vec![
            phrase(&[(0, 1), (0, 1)]),
            phrase(&[(0, 6), (0, 5)]),
            phrase(&[(2, 3), (4, 5)]),
            phrase(&[(2, 6), (1, 5)]),
            phrase(&[(3, 6), (1, 4)]),
            phrase(&[(4, 5), (2, 3)]),
        ]
    }

    #[test]
    fn test_minimal_srcs() {
        let expected: Vec<Phrase> = [
            (0, 1), (0, 3), (0, 4), (0, 5), (0, 6),
            (2, 3), (2, 4), (2, 5), (2, 6),
            (3, 4), (3, 5), (3, 6),
            (4, 5), (4, 6),
            (5, 6),
        ]
        .iter()
        .map(|&s| phrase(&[s]))
        .collect();
        assert_eq!(create_minimal_srcs(&set(&[0, 2, 3, 4, 5]), 6, 15), expected);
    }

    #[test]
    fn test_minimal_srcs_max_span() {
        let all = set(&[0, 1, 2, 3]);
        let phrases = create_minimal_srcs(&all, 4, 3);
        assert!(phrases.iter().all(|p| p.source().width() <= 2));
        assert_eq!(phrases.len(), 7);
        assert!(create_minimal_srcs(&all, 4, 1).is_empty());
    }

    #[test]
    fn test_extract_phrases() {
        let candidates = create_minimal_srcs(&set(&[0, 2, 3, 4, 5]), 6, 15);
        let index = AlignmentIndex::new(&taro_a(), 6, 5);
        assert_eq!(extract_phrases(candidates, &index), taro_holes());
    }

    #[test]
    fn test_projection_tolerates_gaps() {
        // source 0 -> {0, 2}; target 1 is unaligned
        let index = AlignmentIndex::new(&[(0, 0), (0, 2), (1, 3)], 2, 4);
        let projected = extract_phrases(vec![phrase(&[(0, 1)])], &index);
        assert_eq!(projected, vec![phrase(&[(0, 1), (0, 3)])]);
    }

    #[test]
    fn test_projection_drops_unaligned_source() {
        let index = AlignmentIndex::new(&[(1, 0)], 2, 1);
        assert!(extract_phrases(vec![phrase(&[(0, 1)])], &index).is_empty());
    }

    #[test]
    fn test_extend_range() {
        let span = Span::new(3, 4).unwrap();
        let expected: Vec<Span> = [(2, 4), (2, 5), (2, 6), (3, 4), (3, 5), (3, 6)]
            .iter()
            .map(|&(l, r)| Span::new(l, r).unwrap())
            .collect();
        assert_eq!(extend_range(span, &set(&[1]), 6), expected);
    }

    #[test]
    fn test_extend_range_maximal() {
        let span = Span::new(1, 3).unwrap();
        assert_eq!(extend_range(span, &set(&[0, 1, 2, 3]), 4), vec![span]);
        assert_eq!(extend_range(span, &set(&[1, 2]), 3), vec![
            Span::new(0, 3).unwrap(),
            Span::new(1, 3).unwrap(),
        ]);
    }

    #[test]
    fn test_add_nulls() {
        let expected = vec![
            phrase(&[(0, 1), (0, 1)]),
            phrase(&[(0, 2), (0, 1)]),
            phrase(&[(0, 6), (0, 5)]),
            phrase(&[(1, 3), (4, 5)]),
            phrase(&[(2, 3), (4, 5)]),
            phrase(&[(1, 6), (1, 5)]),
            phrase(&[(2, 6), (1, 5)]),
            phrase(&[(3, 6), (1, 4)]),
            phrase(&[(4, 5), (2, 3)]),
        ];
        let nonnull = vec![set(&[0, 2, 3, 4, 5]), set(&[0, 1, 2, 3, 4])];
        assert_eq!(add_nulls(&taro_holes(), &nonnull, &[6, 5]), expected);
    }

    #[test]
    fn test_add_nulls_cross_product() {
        // both streams can absorb one null on the right
        let nonnull = vec![set(&[0]), set(&[0])];
        let literals = add_nulls(&[phrase(&[(0, 1), (0, 1)])], &nonnull, &[2, 2]);
        assert_eq!(literals, vec![
            phrase(&[(0, 1), (0, 1)]),
            phrase(&[(0, 1), (0, 2)]),
            phrase(&[(0, 2), (0, 1)]),
            phrase(&[(0, 2), (0, 2)]),
        ]);
    }
}
