//! pdf-outliner CLI - infer document outlines from PDF layout

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use pdf_outliner::{
    build_outline, to_json, CommandTranslator, JsonFormat, NoopTranslator, PdfLineSource,
    Translate,
};

#[derive(Parser)]
#[command(name = "pdf-outliner")]
#[command(version)]
#[command(about = "Infer document titles and leveled outlines from PDF layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the outline for a single PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Pipe heading text through a translation command (e.g. "apertium ja-en")
        #[arg(long, value_name = "CMD")]
        translate_cmd: Option<String>,
    },

    /// Build outlines for every PDF in a directory
    Batch {
        /// Directory containing input PDFs
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Directory for output JSON files (created if missing)
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Process documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Pipe heading text through a translation command (e.g. "apertium ja-en")
        #[arg(long, value_name = "CMD")]
        translate_cmd: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
            translate_cmd,
        } => cmd_outline(&input, output.as_deref(), compact, translate_cmd.as_deref()),
        Commands::Batch {
            input_dir,
            output_dir,
            sequential,
            translate_cmd,
        } => cmd_batch(&input_dir, &output_dir, sequential, translate_cmd.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    translate_cmd: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let translator = build_translator(translate_cmd)?;

    let source = PdfLineSource::open(input)?;
    let outline = build_outline(&source, translator.as_ref())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    sequential: bool,
    translate_cmd: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let translator = build_translator(translate_cmd)?;

    let paths = collect_pdf_paths(input_dir)?;
    if paths.is_empty() {
        println!("{} {}", "No PDFs found in".yellow(), input_dir.display());
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let process = |path: &PathBuf| {
        let result = outline_to_file(path, output_dir, translator.as_ref());
        pb.inc(1);
        (path.clone(), result)
    };

    // One document's failure is recorded and never aborts the batch.
    let results: Vec<(PathBuf, pdf_outliner::Result<()>)> = if sequential {
        paths.iter().map(process).collect()
    } else {
        paths.par_iter().map(process).collect()
    };

    pb.finish_and_clear();

    let mut failed = 0;
    for (path, result) in &results {
        if let Err(e) = result {
            failed += 1;
            eprintln!("{} {}: {}", "Failed".red().bold(), path.display(), e);
        }
    }

    println!(
        "{} {} processed, {} failed",
        "Done!".green().bold(),
        results.len() - failed,
        failed
    );

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdf-outliner".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Document outline inference from PDF layout");
}

/// Build one document's outline and write `<stem>.json` into `output_dir`.
fn outline_to_file(
    input: &Path,
    output_dir: &Path,
    translator: &dyn Translate,
) -> pdf_outliner::Result<()> {
    let source = PdfLineSource::open(input)?;
    let outline = build_outline(&source, translator)?;
    let json = to_json(&outline, JsonFormat::Pretty)?;
    fs::write(output_path_for(input, output_dir), json)?;
    Ok(())
}

/// `input.pdf` in `output_dir` becomes `output_dir/input.json`.
fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.json", stem))
}

/// All `*.pdf` files (case-insensitive) directly inside `dir`, sorted by
/// path for deterministic processing order.
fn collect_pdf_paths(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if path.is_file() && is_pdf {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Split a translation command line into a translator; identity when absent.
fn build_translator(cmd: Option<&str>) -> Result<Box<dyn Translate>, String> {
    match cmd {
        None => Ok(Box::new(NoopTranslator)),
        Some(cmd) => {
            let mut parts = cmd.split_whitespace();
            let program = parts
                .next()
                .ok_or_else(|| "empty translation command".to_string())?;
            let args: Vec<String> = parts.map(str::to_string).collect();
            Ok(Box::new(CommandTranslator::new(program, args)))
        }
    }
}
