//! Text serialisation of rules.

use crate::config::NontermStyle;
use crate::hiero::WeightedRule;
use crate::span::Span;

pub const COLUMN_SEPARATOR: &str = " |COL| ";
pub const FIELD_SEPARATOR: &str = " ||| ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol<'a> {
    Literal(&'a str),
    /// Nonterminal, numbered by its position in the rule's hole list
    Hole(usize),
}

/// The symbols of `span` with every hole collapsed to a single nonterminal.
pub fn phrase_symbols<'a>(words: &'a [String], span: Span, holes: &[Span]) -> Vec<Symbol<'a>> {
    let mut prelim: Vec<Symbol> = words[span.positions()]
        .iter()
        .map(|w| Symbol::Literal(w.as_str()))
        .collect();
    for (idx, hole) in holes.iter().enumerate() {
        for i in hole.positions() {
            prelim[i - span.left()] = Symbol::Hole(idx);
        }
    }
    let mut done = vec![false; holes.len()];
    prelim
        .into_iter()
        .filter(|symbol| match *symbol {
            Symbol::Literal(_) => true,
            Symbol::Hole(idx) => !std::mem::replace(&mut done[idx], true),
        })
        .collect()
}

pub fn create_phrase_string(words: &[String], span: Span, holes: &[Span], style: &NontermStyle) -> String {
    phrase_symbols(words, span, holes)
        .iter()
        .map(|symbol| match *symbol {
            Symbol::Literal(w) => format!("\"{}\"", w),
            Symbol::Hole(idx) => style.marker(idx),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `source ||| target1 |COL| target2 ... ||| count`
pub fn create_rule_string(words: &[Vec<String>], weighted: &WeightedRule, style: &NontermStyle) -> String {
    let rule = &weighted.rule;
    let strs: Vec<String> = words
        .iter()
        .enumerate()
        .map(|(stream, tokens)| {
            let holes: Vec<Span> = rule.holes.iter().map(|h| h.span(stream)).collect();
            create_phrase_string(tokens, rule.base.span(stream), &holes, style)
        })
        .collect();
    format!(
        "{}{}{}{}{:.6}",
        strs[0],
        FIELD_SEPARATOR,
        strs[1..].join(COLUMN_SEPARATOR),
        FIELD_SEPARATOR,
        weighted.count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hiero::Rule;
    use crate::parse::parse_words;
    use crate::span::Phrase;

    fn span(l: usize, r: usize) -> Span {
        Span::new(l, r).unwrap()
    }

    #[test]
    fn test_phrase_string() {
        let taro_e = parse_words("he is also called taro");
        let holes = [span(2, 4), span(1, 2)];
        assert_eq!(
            create_phrase_string(&taro_e, span(0, 5), &holes, &NontermStyle::Bare),
            "\"he\" x1 x0 \"taro\""
        );
    }

    #[test]
    fn test_no_holes_round_trip() {
        let taro_f = parse_words("kare wa taro to mo iwareru");
        let rendered = create_phrase_string(&taro_f, span(1, 4), &[], &NontermStyle::Bare);
        assert_eq!(rendered, "\"wa\" \"taro\" \"to\"");
        let stripped: Vec<&str> = rendered.split(' ').map(|w| w.trim_matches('"')).collect();
        assert_eq!(stripped, &taro_f[1..4]);
    }

    #[test]
    fn test_labeled_style() {
        let taro_e = parse_words("he is also called taro");
        let style = NontermStyle::Labeled("X".to_string());
        assert_eq!(
            create_phrase_string(&taro_e, span(1, 5), &[span(4, 5)], &style),
            "\"is\" \"also\" \"called\" x0:X"
        );
    }

    #[test]
    fn test_rule_string() {
        let words = vec![
            parse_words("kare wa taro to mo iwareru"),
            parse_words("he is also called taro"),
            parse_words("er heisst auch taro"),
        ];
        let rule = Rule {
            base: Phrase::from_spans(vec![span(0, 3), span(0, 5), span(0, 4)]),
            holes: vec![Phrase::from_spans(vec![span(2, 3), span(4, 5), span(3, 4)])],
        };
        let weighted = WeightedRule { rule, count: 0.25 };
        assert_eq!(
            create_rule_string(&words, &weighted, &NontermStyle::Bare),
            "\"kare\" \"wa\" x0 ||| \"he\" \"is\" \"also\" \"called\" x0 |COL| \"er\" \"heisst\" \"auch\" x0 ||| 0.250000"
        );
    }
}
