use crate::error::ExtractError;

/// How nonterminals are written out in a rendered rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NontermStyle {
    /// `x0`, `x1`, ...
    #[default]
    Bare,
    /// `x0:X`, `x1:X`, ... with a generic category label
    Labeled(String),
}

impl NontermStyle {
    pub fn marker(&self, index: usize) -> String {
        match self {
            NontermStyle::Bare => format!("x{}", index),
            NontermStyle::Labeled(label) => format!("x{}:{}", index, label),
        }
    }
}

/// Limits applied by a `RuleExtractor`. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Maximum number of terminals on the source side of a rule
    pub max_sym_src: usize,
    /// Maximum number of terminals on each target side of a rule
    pub max_sym_trg: usize,
    pub num_trgs: usize,
    pub max_nonterm: usize,
    /// Minimum number of source terminals between two nonterminals
    pub min_src_interceding: usize,
    /// Candidate source spans are strictly narrower than this
    pub max_span: usize,
    pub nonterm_style: NontermStyle,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            max_sym_src: 5,
            max_sym_trg: 999,
            num_trgs: 1,
            max_nonterm: 2,
            min_src_interceding: 1,
            max_span: 15,
            nonterm_style: NontermStyle::Bare,
        }
    }
}

impl ExtractorConfig {
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.num_trgs == 0 {
            return Err(ExtractError::InvalidConfig(
                "at least one target stream is required".to_string(),
            ));
        }
        if self.max_span == 0 {
            return Err(ExtractError::InvalidConfig(
                "max_span must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Terminal cap for `stream` (0 is the source).
    pub fn symbol_cap(&self, stream: usize) -> usize {
        if stream == 0 {
            self.max_sym_src
        } else {
            self.max_sym_trg
        }
    }
}
