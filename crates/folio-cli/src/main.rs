use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tabwriter::TabWriter;
use tracing::{debug, error};

use folio_io::hashing::journal_digest;
use folio_io::markup::parse_document_with_report;
use folio_io::prelude::*;
use folio_io::snapshot::parse_registry_snapshot_str;

mod config;
mod logging;

use config::CliConfig;

/// Maximum preview width (in chars) in `inspect` output.
const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Parser)]
#[command(name = "folio", version, about = "Page-indexed document markup toolkit")]
struct Cli {
    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// JSON config with optional `build` and `render` sections. Flags win
    /// over file values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse markup and print a page summary.
    Parse {
        input: PathBuf,
        /// Print the full document as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Re-serialize markup.
    Roundtrip {
        input: PathBuf,
        /// Verify that the output parses back to the same document instead of printing it.
        #[arg(long)]
        check: bool,
        /// Emit markup without indentation.
        #[arg(long)]
        compact: bool,
    },
    /// Build the heading hierarchy and print a journal snapshot.
    Flatten {
        input: PathBuf,
        /// Keep content found outside any container.
        #[arg(long)]
        collect_orphans: bool,
        /// Output minified JSON
        #[arg(long)]
        min: bool,
    },
    /// List containers and content of the built journal.
    Inspect {
        input: PathBuf,
        #[arg(long)]
        collect_orphans: bool,
    },
    /// List image registry entries.
    Images {
        input: PathBuf,
        /// Registry snapshot JSON replacing the extracted registry.
        #[arg(long)]
        registry: Option<PathBuf>,
    },
    /// Render the journal with media spliced in.
    Render {
        input: PathBuf,
        /// JSON object mapping image keys to references.
        #[arg(long)]
        media: Option<PathBuf>,
        /// Registry snapshot JSON replacing the extracted registry.
        #[arg(long)]
        registry: Option<PathBuf>,
        /// Emit tables, lists and stat blocks as structured markup.
        #[arg(long)]
        structured: bool,
        #[arg(long)]
        collect_orphans: bool,
    },
}

/// Failure classes mapped to process exit codes.
#[derive(Debug)]
enum Outcome {
    Ok,
    /// The input was readable but not acceptable: malformed markup or a
    /// failed round-trip check.
    Rejected,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match CliConfig::load(cli.config.as_deref()).and_then(|config| run(cli.cmd, &config)) {
        Ok(Outcome::Ok) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(2),
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.downcast_ref::<MarkupError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn run(cmd: Command, config: &CliConfig) -> Result<Outcome> {
    match cmd {
        Command::Parse { input, json } => {
            let outcome = parse_document_with_report(&read_input(&input)?)?;
            let doc = &outcome.document;
            if json {
                println!("{}", serde_json::to_string_pretty(doc)?);
                return Ok(Outcome::Ok);
            }

            println!(
                "{}: {} pages, {} elements",
                doc.title,
                doc.pages.len(),
                doc.content_count()
            );
            for page in &doc.pages {
                println!("page {}: {} elements", page.number, page.content.len());
            }
            for tag in &outcome.unrecognised {
                println!("unrecognised: page {} {} <{}>", tag.page, tag.content_id, tag.tag);
            }
        }
        Command::Roundtrip {
            input,
            check,
            compact,
        } => {
            let doc = parse_document(&read_input(&input)?)?;
            let out = if compact {
                to_string_compact(&doc)
            } else {
                to_string(&doc)
            };

            if !check {
                print!("{out}");
                return Ok(Outcome::Ok);
            }

            let reparsed = parse_document(&out)?;
            if reparsed != doc {
                error!(title = %doc.title, "serialized markup does not parse back to the same document");
                eprintln!("roundtrip mismatch");
                return Ok(Outcome::Rejected);
            }
            println!("OK");
        }
        Command::Flatten {
            input,
            collect_orphans,
            min,
        } => {
            let journal = load(&input, config.build_options(collect_orphans))?;
            let snapshot = JournalSnapshot::of(&journal);
            let out = if min {
                canonical_json::to_canonical_json_string(&snapshot)?
            } else {
                serde_json::to_string_pretty(&snapshot)?
            };
            debug!(digest = %journal_digest(&journal)?, "journal digest");
            println!("{out}");
        }
        Command::Inspect {
            input,
            collect_orphans,
        } => {
            let journal = load(&input, config.build_options(collect_orphans))?;
            let mut tw = TabWriter::new(io::stdout());
            writeln!(tw, "id\tkind\tpreview")?;
            for element in journal.unassigned() {
                write_content_row(&mut tw, element)?;
            }
            for container in journal.containers() {
                writeln!(
                    tw,
                    "{}\t{}\t{}",
                    container.id(),
                    container_kind(container.depth()),
                    preview(container.heading())
                )?;
                for element in container.content() {
                    write_content_row(&mut tw, element)?;
                }
            }
            tw.flush()?;
        }
        Command::Images { input, registry } => {
            let mut journal = load(&input, config.build_options(false))?;
            if let Some(path) = registry {
                restore_registry(&mut journal, &path)?;
            }

            let mut tw = TabWriter::new(io::stdout());
            writeln!(tw, "key\tpage\tposition\ttype\tanchor\tsource")?;
            for (key, meta) in journal.image_registry().iter() {
                writeln!(
                    tw,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    key,
                    meta.page_num.map_or_else(|| "-".to_string(), |n| n.to_string()),
                    meta.position,
                    meta.image_type,
                    meta.insert_before_content_id.as_deref().unwrap_or("-"),
                    meta.source
                )?;
            }
            tw.flush()?;
        }
        Command::Render {
            input,
            media,
            registry,
            structured,
            collect_orphans,
        } => {
            let mut journal = load(&input, config.build_options(collect_orphans))?;
            if let Some(path) = registry {
                restore_registry(&mut journal, &path)?;
            }

            let media: HashMap<String, String> = match media {
                Some(path) => serde_json::from_str(&read_input(&path)?)
                    .with_context(|| format!("invalid media map {}", path.display()))?,
                None => HashMap::new(),
            };
            let opts = config.render_options(structured);

            print!("{}", render_journal_with(&journal, &media, &opts));
        }
    }

    Ok(Outcome::Ok)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load(path: &Path, opts: BuildOptions) -> Result<Journal> {
    let (journal, report) = load_journal(&read_input(path)?, opts)?;
    debug!(
        placed = report.placed_content,
        dropped = report.dropped_count(),
        "journal built"
    );
    Ok(journal)
}

fn restore_registry(journal: &mut Journal, path: &Path) -> Result<()> {
    let snapshot = parse_registry_snapshot_str(&read_input(path)?)
        .with_context(|| format!("invalid registry snapshot {}", path.display()))?;
    snapshot.apply_to(journal);
    Ok(())
}

fn write_content_row(out: &mut impl Write, element: &ContentElement) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}",
        element.id,
        element.content_type,
        preview(&element.data.plain_text())
    )
}

fn container_kind(depth: u8) -> &'static str {
    match depth {
        1 => "chapter",
        2 => "section",
        3 => "subsection",
        _ => "subsubsection",
    }
}

/// Single-line preview, at most `PREVIEW_CHARS` chars including the ellipsis.
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let mut cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    cut.push('…');
    cut
}
