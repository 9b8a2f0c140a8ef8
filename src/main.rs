use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colloc::colloc::{CollocationOptions, Collocations};
use colloc::corpus::{
    verify_token_range, Corpus, CorpusArray, CorpusMeta, MemoryMappedCorpus, Vocabulary,
    FORMAT_VERSION,
};
use colloc::output;
use colloc::phrase::{ExtractOptions, FrequentPhrases, RankMap};
use colloc::suffix::{
    verify_permutation, LcpTable, MemoryMappedSuffixArray, SuffixArray, SuffixArrayWriter,
    Suffixes,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

#[derive(Parser)]
#[command(name = "colloc")]
#[command(about = "Frequent phrase discovery and collocation engine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// One plain-text corpus path, or three binary paths
    /// (vocab.bin corpus.bin suffixes.bin)
    #[arg(value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Minimum phrase frequency (0 is treated as 1)
    #[arg(long, default_value = "0")]
    min_frequency: u32,

    /// Maximum number of frequent phrases to keep
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..=32767))]
    max_phrases: u32,

    /// Maximum phrase length in tokens
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..=256))]
    max_phrase_length: u32,

    /// Maximum distance between the start positions of collocated phrases
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    window_size: u32,

    /// Minimum nonterminal span recorded on the collocation stream
    #[arg(long, default_value = "2", value_parser = clap::value_parser!(u32).range(1..))]
    min_nonterminal_span: u32,

    /// Print the frequent-phrase table only, skipping the collocation pass
    #[arg(long)]
    phrases_only: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a plain-text corpus into binary vocab/corpus/suffix-array files
    Compile {
        /// Plain-text corpus, one sentence per line
        input: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Show metadata for a compiled corpus directory
    Stats {
        /// Directory holding meta.json
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

struct RunOptions {
    extract: ExtractOptions,
    colloc: CollocationOptions,
    phrases_only: bool,
}

impl RunOptions {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            extract: ExtractOptions {
                min_frequency: cli.min_frequency,
                max_phrases: cli.max_phrases as usize,
                max_phrase_length: cli.max_phrase_length as usize,
            },
            colloc: CollocationOptions {
                max_phrase_length: cli.max_phrase_length as usize,
                window_size: cli.window_size as usize,
                min_nonterminal_span: cli.min_nonterminal_span as usize,
            },
            phrases_only: cli.phrases_only,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Compile { ref input, ref out }) => compile(input, out),
        Some(Commands::Stats { ref dir }) => stats(dir),
        None => {
            let options = RunOptions::from_cli(&cli);
            match cli.inputs.len() {
                1 => run_text(&cli.inputs[0], &options),
                3 => run_binary(&cli.inputs[0], &cli.inputs[1], &cli.inputs[2], &options),
                _ => {
                    eprintln!(
                        "error: expected one plain-text corpus path, or three paths \
                         (vocab.bin corpus.bin suffixes.bin)"
                    );
                    std::process::exit(2);
                }
            }
        }
    }
}

/// Build everything in memory from a plain-text corpus
fn run_text(path: &Path, options: &RunOptions) -> Result<()> {
    eprintln!("Building vocabulary and corpus from {}", path.display());
    let (corpus, vocab) = CorpusArray::from_text_file(path)?;

    eprintln!("Sorting {} suffixes", corpus.len());
    let suffixes = SuffixArray::build(&corpus);

    run_engine(&corpus, &suffixes, &vocab, options)
}

/// Memory-map pre-built binary inputs
fn run_binary(
    vocab_path: &Path,
    corpus_path: &Path,
    suffixes_path: &Path,
    options: &RunOptions,
) -> Result<()> {
    eprintln!("Loading vocabulary from {}", vocab_path.display());
    let vocab = Vocabulary::open_binary(vocab_path)?;

    eprintln!("Mapping corpus from {}", corpus_path.display());
    let corpus = MemoryMappedCorpus::open(corpus_path)?;
    verify_token_range(&corpus, vocab.len())?;

    eprintln!("Mapping suffix array from {}", suffixes_path.display());
    let suffixes = MemoryMappedSuffixArray::open(suffixes_path)?;
    verify_permutation(&suffixes, corpus.len())?;

    run_engine(&corpus, &suffixes, &vocab, options)
}

/// The extraction and collocation passes over any corpus representation
fn run_engine<C: Corpus, S: Suffixes>(
    corpus: &C,
    suffixes: &S,
    vocab: &Vocabulary,
    options: &RunOptions,
) -> Result<()> {
    let lcp = LcpTable::build(corpus, suffixes);

    let phrases = FrequentPhrases::extract(corpus, suffixes, &lcp, &options.extract)?;
    eprintln!("Kept {} frequent phrases", phrases.len());

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    output::write_phrase_table(&mut out, &phrases, vocab)?;

    if !options.phrases_only {
        let ranks = RankMap::new(&phrases);
        let records = Collocations::new(corpus, &ranks, options.colloc.clone());
        let count = output::write_collocations(&mut out, records, &options.colloc)?;
        eprintln!("Emitted {} collocations", count);
    }

    out.flush()?;
    Ok(())
}

/// Compile the binary form consumed by the three-path input mode
fn compile(input: &Path, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    eprintln!("Building vocabulary and corpus from {}", input.display());
    let (corpus, vocab) = CorpusArray::from_text_file(input)?;

    eprintln!("Sorting {} suffixes", corpus.len());
    let suffixes = SuffixArray::build(&corpus);

    vocab.write_binary(&out_dir.join("vocab.bin"))?;
    corpus.write_binary(&out_dir.join("corpus.bin"))?;
    SuffixArrayWriter::write(&out_dir.join("suffixes.bin"), &suffixes)?;

    let meta = CorpusMeta {
        version: FORMAT_VERSION,
        token_count: corpus.len() as u64,
        sentence_count: corpus.sentence_count() as u64,
        vocab_size: vocab.len() as u64,
        created_at: UNIX_EPOCH.elapsed().map(|d| d.as_secs()).unwrap_or(0),
    };
    std::fs::write(
        out_dir.join("meta.json"),
        serde_json::to_string_pretty(&meta)?,
    )?;

    println!(
        "Compiled {} tokens, {} sentences, {} vocabulary entries into {}",
        meta.token_count,
        meta.sentence_count,
        meta.vocab_size,
        out_dir.display()
    );
    Ok(())
}

/// Print the metadata sidecar of a compiled corpus
fn stats(dir: &Path) -> Result<()> {
    let path = dir.join("meta.json");
    let data = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let meta: CorpusMeta = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    println!("Compiled corpus");
    println!("===============");
    println!("Location:        {}", dir.display());
    println!("Format version:  {}", meta.version);
    println!("Tokens:          {}", meta.token_count);
    println!("Sentences:       {}", meta.sentence_count);
    println!("Vocabulary:      {}", meta.vocab_size);
    println!("Compiled at:     {}", meta.created_at);
    Ok(())
}
