//! Batch driver: reads aligned corpora line by line, extracts rules on the
//! rayon pool and writes them back in input order.

use std::io::{BufRead, Split, Write};

use log::{info, warn};
use rayon::prelude::*;

use crate::error::ExtractError;
use crate::extractor::RuleExtractor;
use crate::parse::SentenceTuple;

/// Number of sentence tuples processed in one parallel batch
pub const DEFAULT_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverStats {
    pub tuples: usize,
    pub skipped: usize,
    pub rules: usize,
}

/// Extracts the output lines for one tuple of raw lines: the source, then
/// target and alignment lines alternating.
pub fn extract_tuple(extractor: &RuleExtractor, index: usize, lines: &[Vec<u8>]) -> Result<Vec<String>, ExtractError> {
    decode_lines(lines)
        .and_then(|text| {
            let targets: Vec<(&str, &str)> = text[1..]
                .chunks(2)
                .map(|pair| (pair[0], pair.get(1).copied().unwrap_or("")))
                .collect();
            SentenceTuple::from_lines(text[0], &targets)
        })
        .and_then(|tuple| extractor.extract_lines(&tuple))
        .map_err(|e| {
            let content: Vec<String> = lines.iter().map(|l| String::from_utf8_lossy(l).into_owned()).collect();
            e.in_sentence(index, content.join("\t"))
        })
}

fn decode_lines(lines: &[Vec<u8>]) -> Result<Vec<&str>, ExtractError> {
    lines
        .iter()
        .enumerate()
        .map(|(stream, line)| std::str::from_utf8(line).map_err(|_| ExtractError::InvalidUtf8 { stream }))
        .collect()
}

struct TupleReader<R> {
    streams: Vec<Split<R>>,
    next_index: usize,
}

impl<R: BufRead> TupleReader<R> {
    /// Next raw line from every stream, or `None` once any stream runs out.
    /// Only I/O failures are errors; decoding happens per tuple.
    fn next_tuple(&mut self) -> Result<Option<(usize, Vec<Vec<u8>>)>, ExtractError> {
        let mut lines = Vec::with_capacity(self.streams.len());
        let mut exhausted = false;
        for stream in self.streams.iter_mut() {
            match stream.next() {
                Some(line) => {
                    let mut line = line?;
                    if line.last() == Some(&b'\r') {
                        line.pop();
                    }
                    lines.push(line);
                }
                None => exhausted = true,
            }
        }
        if exhausted {
            if !lines.is_empty() {
                warn!(
                    "input files differ in length; stopping after {} sentences",
                    self.next_index
                );
            }
            return Ok(None);
        }
        let index = self.next_index;
        self.next_index += 1;
        Ok(Some((index, lines)))
    }
}

fn write_batch<W: Write>(
    extractor: &RuleExtractor,
    batch: &[(usize, Vec<Vec<u8>>)],
    output: &mut W,
    stats: &mut DriverStats,
) -> Result<(), ExtractError> {
    let results: Vec<Result<Vec<String>, ExtractError>> = batch
        .par_iter()
        .map(|(index, lines)| extract_tuple(extractor, *index, lines))
        .collect();
    for result in results {
        stats.tuples += 1;
        match result {
            Ok(rules) => {
                for rule in &rules {
                    writeln!(output, "{}", rule)?;
                }
                stats.rules += rules.len();
            }
            Err(e) => {
                warn!("skipping {}", e);
                stats.skipped += 1;
            }
        }
        if stats.tuples % 10000 == 0 {
            info!("processed sentences: {}", stats.tuples);
        }
    }
    Ok(())
}

/// Runs the extractor over a source reader and one `(words, alignment)`
/// reader pair per target stream.
pub fn process_lines<R, W>(
    extractor: &RuleExtractor,
    source: R,
    targets: Vec<(R, R)>,
    output: &mut W,
    batch_size: usize,
) -> Result<DriverStats, ExtractError>
where
    R: BufRead,
    W: Write,
{
    if targets.len() != extractor.config().num_trgs {
        return Err(ExtractError::StreamCountMismatch {
            expected: extractor.config().num_trgs,
            found: targets.len(),
        });
    }
    let mut streams = vec![source.split(b'\n')];
    for (words, align) in targets {
        streams.push(words.split(b'\n'));
        streams.push(align.split(b'\n'));
    }
    let mut reader = TupleReader {
        streams,
        next_index: 0,
    };

    let batch_size = batch_size.max(1);
    let mut stats = DriverStats::default();
    let mut batch = Vec::with_capacity(batch_size);
    while let Some(tuple) = reader.next_tuple()? {
        batch.push(tuple);
        if batch.len() == batch_size {
            write_batch(extractor, &batch, output, &mut stats)?;
            batch.clear();
        }
    }
    write_batch(extractor, &batch, output, &mut stats)?;
    info!(
        "{} sentences, {} skipped, {} rules written",
        stats.tuples, stats.skipped, stats.rules
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use std::io::Cursor;

    #[test]
    fn test_extract_tuple_reports_index() {
        let extractor = RuleExtractor::new(ExtractorConfig::default()).unwrap();
        let lines = vec![b"a b".to_vec(), b"x y".to_vec(), b"0-0 1-q".to_vec()];
        match extract_tuple(&extractor, 7, &lines) {
            Err(ExtractError::Sentence { index, content, source }) => {
                assert_eq!(index, 7);
                assert_eq!(content, "a b\tx y\t0-0 1-q");
                assert!(matches!(*source, ExtractError::MalformedAlignment { .. }));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_extract_tuple_rejects_invalid_utf8() {
        let extractor = RuleExtractor::new(ExtractorConfig::default()).unwrap();
        let lines = vec![b"a".to_vec(), b"x\xff".to_vec(), b"0-0".to_vec()];
        match extract_tuple(&extractor, 3, &lines) {
            Err(ExtractError::Sentence { index, source, .. }) => {
                assert_eq!(index, 3);
                assert!(matches!(*source, ExtractError::InvalidUtf8 { stream: 1 }));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_crlf_line_endings() {
        let extractor = RuleExtractor::new(ExtractorConfig::default()).unwrap();
        let mut output = Vec::new();
        let stats = process_lines(
            &extractor,
            Cursor::new("a\r\n"),
            vec![(Cursor::new("x\r\n"), Cursor::new("0-0\r\n"))],
            &mut output,
            4,
        )
        .unwrap();
        assert_eq!(stats.rules, 1);
        assert_eq!(String::from_utf8(output).unwrap(), "\"a\" ||| \"x\" ||| 1.000000\n");
    }

    #[test]
    fn test_short_source_still_stops() {
        let extractor = RuleExtractor::new(ExtractorConfig::default()).unwrap();
        let mut reader = TupleReader {
            streams: vec![
                Cursor::new("a\n").split(b'\n'),
                Cursor::new("x\ny\n").split(b'\n'),
                Cursor::new("0-0\n0-0\n").split(b'\n'),
            ],
            next_index: 0,
        };
        assert!(reader.next_tuple().unwrap().is_some());
        assert!(reader.next_tuple().unwrap().is_none());
        let mut output = Vec::new();
        let source = Cursor::new("a\n");
        let targets = vec![(Cursor::new("x\ny\n"), Cursor::new("0-0\n0-0\n"))];
        let stats = process_lines(&extractor, source, targets, &mut output, 1).unwrap();
        assert_eq!(stats, DriverStats { tuples: 1, skipped: 0, rules: 1 });
    }

    #[test]
    fn test_stops_at_shortest_input() {
        let extractor = RuleExtractor::new(ExtractorConfig::default()).unwrap();
        let source = Cursor::new("a\nb\nc\n");
        let words = Cursor::new("x\ny\n");
        let align = Cursor::new("0-0\n0-0\n");
        let mut output = Vec::new();
        let stats = process_lines(&extractor, source, vec![(words, align)], &mut output, 1).unwrap();
        assert_eq!(stats, DriverStats { tuples: 2, skipped: 0, rules: 2 });
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "\"a\" ||| \"x\" ||| 1.000000\n\"b\" ||| \"y\" ||| 1.000000\n"
        );
    }
}
