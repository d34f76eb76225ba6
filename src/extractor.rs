use log::debug;

use crate::align::{nonnull_sets, AlignmentIndex};
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::hiero::{rule_filter, HieroAbstractor, WeightedRule};
use crate::parse::SentenceTuple;
use crate::phrase::{add_nulls, create_minimal_srcs, extract_phrases};
use crate::render::create_rule_string;
use crate::span::Phrase;

/// Extracts hierarchical rules from one sentence tuple at a time. Holds no
/// state between tuples, so one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct RuleExtractor {
    config: ExtractorConfig,
}

impl RuleExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        config.validate()?;
        Ok(RuleExtractor { config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn check_streams(&self, tuple: &SentenceTuple) -> Result<(), ExtractError> {
        if tuple.num_trgs() != self.config.num_trgs {
            return Err(ExtractError::StreamCountMismatch {
                expected: self.config.num_trgs,
                found: tuple.num_trgs(),
            });
        }
        Ok(())
    }

    /// Phrases consistent on every stream; these are the legal hole sites.
    pub fn minimal_phrases(&self, tuple: &SentenceTuple) -> Result<Vec<Phrase>, ExtractError> {
        self.check_streams(tuple)?;
        let nonnull = nonnull_sets(tuple.aligns());
        let source_len = tuple.words()[0].len();
        let mut phrases = create_minimal_srcs(&nonnull[0], source_len, self.config.max_span);
        for (k, links) in tuple.aligns().iter().enumerate() {
            let index = AlignmentIndex::new(links, source_len, tuple.words()[k + 1].len());
            phrases = extract_phrases(phrases, &index);
        }
        Ok(phrases)
    }

    /// Rules for one tuple with their fractional counts, after filtering.
    pub fn create_hiero_rules(&self, tuple: &SentenceTuple) -> Result<Vec<WeightedRule>, ExtractError> {
        let holes = self.minimal_phrases(tuple)?;
        let nonnull = nonnull_sets(tuple.aligns());
        let literals = add_nulls(&holes, &nonnull, &tuple.stream_lens());
        let abstractor = HieroAbstractor::new(&holes, &self.config);
        let rules = abstractor.abstract_phrases(&literals);
        let produced = rules.len();
        let kept: Vec<WeightedRule> = rules
            .into_iter()
            .filter(|r| rule_filter(&r.rule, &self.config))
            .collect();
        debug!(
            "{} minimal phrases, {} literal phrases, {} rules ({} filtered)",
            holes.len(),
            literals.len(),
            kept.len(),
            produced - kept.len()
        );
        Ok(kept)
    }

    pub fn rule_string(&self, tuple: &SentenceTuple, rule: &WeightedRule) -> String {
        create_rule_string(tuple.words(), rule, &self.config.nonterm_style)
    }

    /// Every output line for one tuple, in extraction order.
    pub fn extract_lines(&self, tuple: &SentenceTuple) -> Result<Vec<String>, ExtractError> {
        Ok(self
            .create_hiero_rules(tuple)?
            .iter()
            .map(|rule| self.rule_string(tuple, rule))
            .collect())
    }
}
