use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use stree::output::{SearchHit, format_size, print_hits, print_stats};
use stree::tree::{SuffixTree, SuffixTreeBuilder};
use stree::utils::{AppConfig, TextSource, get_config_path, suffix_progress};
use termcolor::{ColorChoice, StandardStream};

#[derive(Parser)]
#[command(name = "stree")]
#[command(about = "In-memory suffix tree index for fast substring lookups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Index inputs larger than the configured size limit
    #[arg(long, global = true)]
    force: bool,
}

/// Where the text to index comes from
#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// File to index
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Literal text to index
    #[arg(short, long)]
    text: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find an occurrence of each pattern
    Search {
        #[command(flatten)]
        input: InputArgs,

        /// Patterns to look up
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Print the tree, one edge label per line
    Dump {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Show tree statistics and check its structure
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the configuration file location and effective settings
    Config {
        /// Write the effective settings to the configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let Cli {
        command,
        verbose,
        force,
    } = Cli::parse();
    let config = load_config(verbose);

    match command {
        Commands::Search {
            input,
            patterns,
            no_color,
        } => {
            let (source, label) = load_input(&input)?;
            let tree = build_tree(source.as_bytes(), &config, force, verbose)?;

            let found = run_search(&tree, &patterns, &label, config.color && !no_color, verbose)?;
            if !found {
                std::process::exit(1);
            }
        }
        Commands::Dump { input } => {
            let (source, _) = load_input(&input)?;
            let tree = build_tree(source.as_bytes(), &config, force, verbose)?;

            let mut out = BufWriter::new(io::stdout().lock());
            tree.dump(&mut out)?;
            out.flush()?;
        }
        Commands::Stats { input, json } => {
            let (source, label) = load_input(&input)?;
            let tree = build_tree(source.as_bytes(), &config, force, verbose)?;
            tree.verify()?;

            let stats = tree.stats();
            let mut out = io::stdout().lock();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
            } else {
                print_stats(&mut out, &label, &stats)?;
            }
        }
        Commands::Config { init } => {
            if init {
                let path = config.save()?;
                println!("Wrote {}", path.display());
                return Ok(());
            }
            match get_config_path() {
                Ok(path) => println!("Config file:      {}", path.display()),
                Err(e) => println!("Config file:      unavailable ({})", e),
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Load the config file, falling back to defaults when it cannot be read
fn load_config(verbose: bool) -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if verbose {
                eprintln!("stree: using default config: {:#}", e);
            }
            AppConfig::default()
        }
    }
}

/// Load the text to index and a label to print it as
fn load_input(input: &InputArgs) -> Result<(TextSource, String)> {
    match (&input.file, &input.text) {
        (Some(path), _) => Ok((TextSource::open(path)?, path.display().to_string())),
        (None, Some(text)) => Ok((TextSource::from_text(text), "<text>".to_string())),
        (None, None) => bail!("either --file or --text is required"),
    }
}

/// Insert every suffix of `text`, with a progress bar for large inputs
fn build_tree<'t>(
    text: &'t [u8],
    config: &AppConfig,
    force: bool,
    verbose: bool,
) -> Result<SuffixTree<'t>> {
    if !config.allows(text.len()) && !force {
        bail!(
            "input is {} but the configured limit is {}; pass --force to index it anyway",
            format_size(text.len() as u64),
            format_size(config.max_text_size)
        );
    }

    let start = Instant::now();
    let mut builder = SuffixTreeBuilder::new(text)?;

    let pb = suffix_progress(text.len() as u64, config.shows_progress(text.len()));
    while builder.insert_next()?.is_some() {
        pb.inc(1);
    }
    pb.finish_and_clear();

    let tree = builder.finish();
    if verbose {
        eprintln!(
            "stree: indexed {} in {:.2?} ({} nodes)",
            format_size(text.len() as u64),
            start.elapsed(),
            tree.node_count()
        );
    }

    Ok(tree)
}

/// Search every pattern in parallel and print the hits in pattern order
///
/// Returns whether any pattern matched.
fn run_search(
    tree: &SuffixTree<'_>,
    patterns: &[String],
    label: &str,
    color: bool,
    verbose: bool,
) -> Result<bool> {
    let offsets: Vec<Option<usize>> = patterns
        .par_iter()
        .map(|p| tree.search(p.as_bytes()))
        .collect();

    let mut hits = Vec::new();
    for (pattern, offset) in patterns.iter().zip(offsets) {
        match offset {
            Some(offset) => hits.push(SearchHit::locate(tree.text(), pattern, offset, pattern.len())),
            None => {
                if verbose {
                    eprintln!("stree: no match for {:?}", pattern);
                }
            }
        }
    }

    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    print_hits(&mut stdout, label, &hits)?;

    Ok(!hits.is_empty())
}
