extern crate env_logger;
extern crate log;

use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::info;

use hiero_extract::driver::DEFAULT_BATCH_SIZE;
use hiero_extract::{process_lines, ExtractError, ExtractorConfig, NontermStyle, RuleExtractor};

#[derive(Debug, Parser)]
#[command(name = "hiero-extract")]
#[command(about = "Extract a synchronous grammar with one or more outputs", long_about = None)]
struct Cli {
    /// The source sentences
    src: PathBuf,

    /// Target sentences and alignments, one pair of files per target
    #[arg(required = true)]
    trgs: Vec<PathBuf>,

    /// The maximum overall span to extract
    #[arg(long, alias = "max_span", default_value_t = 15)]
    max_span: usize,

    /// The maximum number of source words
    #[arg(long, alias = "max_sym_src", default_value_t = 5)]
    max_sym_src: usize,

    /// The maximum number of target words
    #[arg(long, alias = "max_sym_trg", default_value_t = 999)]
    max_sym_trg: usize,

    /// The maximum number of non-terms
    #[arg(long, alias = "max_nonterm", default_value_t = 2)]
    max_nonterm: usize,

    /// Minimum number of terminals between non-terms in the source
    #[arg(long, alias = "min_src_interceding", default_value_t = 1)]
    min_src_interceding: usize,

    /// Write non-terms as x0:LABEL instead of x0
    #[arg(long)]
    nonterm_label: Option<String>,

    /// Worker threads (0 lets rayon decide)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Sentences per parallel batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    info!("{:?}", cli);

    if cli.trgs.len() % 2 != 0 {
        return Err(ExtractError::InvalidConfig(
            "must have even number of target files, one sentence and alignment for each target"
                .to_string(),
        )
        .into());
    }

    let config = ExtractorConfig {
        max_sym_src: cli.max_sym_src,
        max_sym_trg: cli.max_sym_trg,
        num_trgs: cli.trgs.len() / 2,
        max_nonterm: cli.max_nonterm,
        min_src_interceding: cli.min_src_interceding,
        max_span: cli.max_span,
        nonterm_style: match cli.nonterm_label {
            Some(label) => NontermStyle::Labeled(label),
            None => NontermStyle::Bare,
        },
    };
    let extractor = RuleExtractor::new(config)?;

    let source = BufReader::new(File::open(&cli.src)?);
    let targets = cli
        .trgs
        .chunks(2)
        .map(|pair| -> io::Result<_> {
            let words = BufReader::new(File::open(&pair[0])?);
            let align = BufReader::new(File::open(&pair[1])?);
            Ok((words, align))
        })
        .collect::<io::Result<Vec<_>>>()?;

    let output: Box<dyn Write + Send> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut output = BufWriter::new(output);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build()?;
    let batch_size = cli.batch_size;
    let stats = pool.install(|| process_lines(&extractor, source, targets, &mut output, batch_size))?;
    output.flush()?;

    if let Some(path) = &cli.output {
        info!("Output written to: {}", path.display());
    }
    info!(
        "{} sentences processed, {} skipped",
        stats.tuples - stats.skipped,
        stats.skipped
    );
    Ok(())
}
