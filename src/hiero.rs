//! Hierarchical rules: nonterminal abstraction over literal phrases.

use std::collections::VecDeque;

use crate::config::ExtractorConfig;
use crate::span::Phrase;

/// A literal base phrase with holes ordered left to right on the source side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub base: Phrase,
    pub holes: Vec<Phrase>,
}

impl Rule {
    /// Terminals left on each stream once the holes are taken out.
    pub fn terminal_counts(&self) -> Vec<usize> {
        (0..self.base.num_streams())
            .map(|stream| {
                let covered: usize = self.holes.iter().map(|h| h.span(stream).width()).sum();
                self.base.span(stream).width().saturating_sub(covered)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRule {
    pub rule: Rule,
    pub count: f64,
}

/// Enumerates rules over a fixed set of hole sites.
pub struct HieroAbstractor<'a> {
    holes: &'a [Phrase],
    /// `(source right, hole id)` for every hole, keyed by source left
    by_left: Vec<Vec<(usize, usize)>>,
    max_nonterm: usize,
    min_src_interceding: usize,
}

impl<'a> HieroAbstractor<'a> {
    pub fn new(holes: &'a [Phrase], config: &ExtractorConfig) -> Self {
        let width = holes.iter().map(|h| h.source().right()).max().unwrap_or(0);
        let mut by_left: Vec<Vec<(usize, usize)>> = vec![Vec::new(); width];
        for (id, hole) in holes.iter().enumerate() {
            let source = hole.source();
            by_left[source.left()].push((source.right(), id));
        }
        HieroAbstractor {
            holes,
            by_left,
            max_nonterm: config.max_nonterm,
            min_src_interceding: config.min_src_interceding,
        }
    }

    /// All rules built on `base`, breadth first from the hole-free rule. The
    /// unit count is shared evenly between them.
    pub fn abstract_phrase(&self, base: &Phrase) -> Vec<WeightedRule> {
        let base_src = base.source();
        let mut queue: VecDeque<Vec<usize>> = VecDeque::new();
        queue.push_back(Vec::new());
        let mut produced: Vec<Vec<usize>> = Vec::new();
        while let Some(chosen) = queue.pop_front() {
            if chosen.len() < self.max_nonterm {
                let start = match chosen.last() {
                    Some(&last) => self.holes[last]
                        .source()
                        .right()
                        .saturating_add(self.min_src_interceding),
                    None => base_src.left(),
                };
                for left in start..base_src.right().min(self.by_left.len()) {
                    for &(right, id) in &self.by_left[left] {
                        if right <= base_src.right() && self.holes[id].source() != base_src {
                            let mut next = chosen.clone();
                            next.push(id);
                            queue.push_back(next);
                        }
                    }
                }
            }
            produced.push(chosen);
        }
        let count = 1.0 / produced.len() as f64;
        produced
            .into_iter()
            .map(|ids| WeightedRule {
                rule: Rule {
                    base: base.clone(),
                    holes: ids.into_iter().map(|id| self.holes[id].clone()).collect(),
                },
                count,
            })
            .collect()
    }

    pub fn abstract_phrases(&self, bases: &[Phrase]) -> Vec<WeightedRule> {
        bases.iter().flat_map(|base| self.abstract_phrase(base)).collect()
    }
}

/// Whether every stream stays within its terminal cap. Dropped rules keep
/// their share of the count; siblings are not renormalised.
pub fn rule_filter(rule: &Rule, config: &ExtractorConfig) -> bool {
    rule.terminal_counts()
        .iter()
        .enumerate()
        .all(|(stream, &syms)| syms <= config.symbol_cap(stream))
}
