//! huffpack CLI - Huffman text compression tool
//!
//! Compresses text files into `.huff` containers and restores them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use huffpack::container::Container;
use huffpack::stats::{self, format_bits, format_size};
use huffpack::{integrity, Compressed, Limits, PackOptions, Verification};

const CONTAINER_EXTENSION: &str = "huff";

/// Lossless text compression with Huffman coding.
#[derive(Parser, Debug)]
#[command(name = "huffpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Show verbose output (also enables debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a text file into a container
    Compress(CompressArgs),
    /// Restore the original text from a container
    Decompress(DecompressArgs),
    /// Describe a container without writing anything
    Inspect {
        /// Container file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print the decoding tree
        #[arg(long)]
        tree: bool,
    },
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Input text file (UTF-8)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (defaults to INPUT with a .huff extension)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Filename to record in the container (defaults to the input's name)
    #[arg(long)]
    name: Option<String>,

    /// Do not embed a SHA-256 digest
    #[arg(long)]
    no_digest: bool,

    /// Largest accepted input in bytes
    #[arg(long, value_name = "BYTES")]
    max_input: Option<usize>,

    /// Print frequency and code tables with a frequency chart
    #[arg(long)]
    report: bool,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Container file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file path (defaults to the recorded filename)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Compress(args) => compress(args, cli.verbose),
        Command::Decompress(args) => decompress(args, cli.verbose),
        Command::Inspect { input, tree } => inspect(&input, tree),
    }
}

/// Install the log subscriber. `HUFFPACK_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "huffpack=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("HUFFPACK_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn compress(args: CompressArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let limits = match args.max_input {
        Some(max_input_bytes) => Limits { max_input_bytes },
        None => Limits::default(),
    };

    let input_size = fs::metadata(&args.input)?.len();
    if !limits.allows(input_size as usize) {
        return Err(format!(
            "{:?} is {}; the limit is {}",
            args.input,
            format_size(input_size),
            format_size(limits.max_input_bytes as u64)
        )
        .into());
    }
    let text = fs::read_to_string(&args.input)?;

    let filename = args.name.clone().unwrap_or_else(|| file_name(&args.input));
    let options = if args.no_digest {
        PackOptions::minimal()
    } else {
        PackOptions::default()
    };

    let start = Instant::now();
    let compressed = huffpack::compress(&text)?;
    let stats = compressed.stats();
    if args.report {
        print_report(&compressed);
    }

    let mut container = compressed.into_container(filename.as_str());
    if options.include_digest {
        container = container.with_digest(integrity::sha256(&text));
    }
    let output_data = container.to_bytes()?;
    let encode_time = start.elapsed();

    let output_path = args.output.unwrap_or_else(|| {
        let mut path = args.input.clone();
        path.set_extension(CONTAINER_EXTENSION);
        path
    });
    fs::write(&output_path, &output_data)?;

    let output_size = output_data.len() as u64;
    let ratio = if input_size > 0 {
        (output_size as f64 / input_size as f64) * 100.0
    } else {
        0.0
    };

    if verbose {
        eprintln!("Input: {:?}", args.input);
        eprintln!("  Characters: {}", stats.chars);
        eprintln!("  Unique symbols: {}", stats.unique_symbols);
        eprintln!("Output: {:?}", output_path);
        eprintln!("  Recorded name: {}", filename);
        eprintln!("  Digest: {}", options.include_digest);
        eprintln!("  Encode time: {:.2?}", encode_time);
        eprintln!(
            "  Payload: {} -> {} ({:.2}% saved, {:.2} bits/char)",
            format_bits(stats.original_bits),
            format_bits(stats.compressed_bits),
            stats.saved_percent(),
            stats.bits_per_symbol()
        );
        eprintln!(
            "  Size: {} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    } else {
        println!(
            "{} -> {} ({:.1}%)",
            format_size(input_size),
            format_size(output_size),
            ratio
        );
    }

    Ok(())
}

fn decompress(args: DecompressArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let input = fs::read(&args.input)?;

    let start = Instant::now();
    let out = huffpack::decompress_container(&input)?;
    let decode_time = start.elapsed();

    match out.verify() {
        Verification::Mismatch => {
            return Err("digest mismatch: decoded text does not match the recorded SHA-256".into())
        }
        Verification::Absent => tracing::warn!("container has no digest; output is unverified"),
        Verification::Match => {}
    }

    let output_path = args.output.unwrap_or_else(|| {
        let dir = args.input.parent().unwrap_or_else(|| Path::new(""));
        // Only the final component of the recorded name is trusted.
        let name = Path::new(out.output_name())
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(huffpack::DEFAULT_OUTPUT_NAME));
        dir.join(name)
    });
    fs::write(&output_path, &out.text)?;

    if verbose {
        eprintln!("Input: {:?}", args.input);
        eprintln!("  Payload: {}", format_bits(out.bit_len as u64));
        eprintln!("  Verification: {:?}", out.verify());
        eprintln!("  Decode time: {:.2?}", decode_time);
        eprintln!("Output: {:?}", output_path);
        eprintln!("  Characters: {}", out.text.chars().count());
    } else {
        println!(
            "{} -> {:?} ({})",
            format_size(input.len() as u64),
            output_path,
            format_size(out.text.len() as u64)
        );
    }

    Ok(())
}

fn inspect(input: &Path, show_tree: bool) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let container = Container::from_bytes(&bytes)?;

    println!("Container: {:?} ({})", input, format_size(bytes.len() as u64));
    println!("  Filename: {:?}", container.filename);
    println!("  Payload: {}", format_bits(container.bits.len() as u64));
    match &container.tree {
        Some(tree) => {
            println!("  Symbols: {}", tree.leaf_count());
            println!("  Tree depth: {}", tree.depth());
            if show_tree {
                tree.print_structure();
            }
        }
        None => println!("  Symbols: 0 (empty text)"),
    }
    match &container.digest {
        Some(digest) => println!("  SHA-256: {}", integrity::to_hex(digest)),
        None => println!("  SHA-256: none"),
    }

    Ok(())
}

fn print_report(compressed: &Compressed) {
    println!("Frequency table:");
    println!("  {:>8}  {:>10}  {:>8}", "Char", "Count", "Share");
    for row in stats::frequency_rows(&compressed.frequencies) {
        println!(
            "  {:>8}  {:>10}  {:>7.2}%",
            stats::display_symbol(row.symbol),
            row.count,
            row.percent
        );
    }

    println!();
    println!("Code table:");
    println!("  {:>8}  {:>10}  {:>6}  Code", "Char", "Count", "Bits");
    for row in stats::code_rows(&compressed.codes, &compressed.frequencies) {
        println!(
            "  {:>8}  {:>10}  {:>6}  {}",
            stats::display_symbol(row.symbol),
            row.count,
            row.code.len(),
            row.code
        );
    }

    println!();
    println!("Top {} symbols:", stats::CHART_ROWS);
    print!("{}", stats::frequency_chart(&compressed.frequencies));
    println!();
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
