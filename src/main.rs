use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use imagepath::{config, folders, output, variant};
use imagepath::{RepositoryLocator, RingBuffer};
use rayon::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imagepath")]
#[command(about = "Image server path grammar tools")]
#[command(long_about = "\
Image server path grammar tools

Encode resize/variant/format requests into variant filenames, decode them
back, and work with repository locator keys.

The grammar:

  img.jpg            original
  img_400x.jpg       width 400
  img_x600.jpg       height 600
  img_400x600.jpg    400x600
  img_400x600_1.jpg  400x600, crop variant 1
  img_400x600_1.png  same, delivered as PNG

Locator keys:

  default:test-file.txt                repository + file
  amazon-s3:2014/15/06:123-456-798     repository + folder + file

Run 'imagepath gen-config' to generate a documented imagepath.toml.")]
#[command(version)]
struct Cli {
    /// Tool configuration file
    #[arg(long, default_value = "imagepath.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a transformation request into a variant path
    Encode(EncodeArgs),
    /// Decode variant paths back into their components
    Decode(DecodeArgs),
    /// Parse and build repository locator keys
    Locator {
        #[command(subcommand)]
        command: LocatorCommand,
    },
    /// Print a stock imagepath.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct EncodeArgs {
    /// Path of the original image
    path: String,

    /// Requested width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Requested height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Crop variant counter
    #[arg(long)]
    variant: Option<u32>,

    /// Output format (extension) overriding the original's
    #[arg(long)]
    format: Option<String>,

    /// Repository root prefixed to the result (overrides config root_path)
    #[arg(long)]
    root: Option<String>,
}

#[derive(clap::Args)]
struct DecodeArgs {
    /// Paths to decode
    #[arg(required_unless_present = "list")]
    paths: Vec<String>,

    /// Read newline-separated paths from a file and decode them in parallel
    #[arg(long)]
    list: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum LocatorCommand {
    /// Parse a colon-delimited locator key into its components
    Parse {
        key: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build a locator key from its parts
    Format {
        /// Repository id
        repository: String,

        /// File id within the repository or folder
        file: String,

        /// Folder id within the repository
        #[arg(long, conflicts_with = "date")]
        folder: Option<String>,

        /// Use a yyyy-mm-dd date partition as the folder id
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::ToolConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Encode(args) => {
            let mut reference = variant::ImageReference::original(&args.path);
            reference.width = args.width;
            reference.height = args.height;
            reference.variant = args.variant;
            reference.output_extension = args.format;

            let encoded = variant::encode_path(&reference);
            let root = args.root.unwrap_or(config.root_path);
            println!("{}", join_root(&root, &encoded));
        }
        Command::Decode(args) => {
            if let Some(list) = &args.list {
                decode_list(list, &config)?;
            } else {
                for path in &args.paths {
                    let reference = variant::decode_path(path);
                    if args.json {
                        println!("{}", serde_json::to_string_pretty(&reference)?);
                    } else {
                        output::print_reference(path, &reference);
                    }
                }
            }
        }
        Command::Locator { command } => match command {
            LocatorCommand::Parse { key, json } => {
                let locator = RepositoryLocator::parse_key(&key)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&locator)?);
                } else {
                    output::print_locator(&locator);
                }
            }
            LocatorCommand::Format {
                repository,
                file,
                folder,
                date,
            } => {
                let folder = folder.or_else(|| date.map(folders::date_folder));
                let locator = RepositoryLocator::new(&repository, folder.as_deref(), &file)?;
                println!("{locator}");
            }
        },
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// One decoded path from a batch run. Carries its input position so the
/// drained report can be shown in input order.
struct DecodeEvent {
    index: usize,
    path: String,
    reference: variant::ImageReference,
}

/// Decode a newline-separated list of paths in parallel.
///
/// Workers push one event per path into a report buffer sized from config;
/// when the list is longer than the buffer, only the newest events are
/// retained for display. The summary counts always cover the full list.
fn decode_list(
    list: &std::path::Path,
    config: &config::ToolConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(list)?;
    let paths: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let reports = RingBuffer::new(config.report_capacity)?;
    let modified: usize = paths
        .par_iter()
        .enumerate()
        .map(|(index, path)| {
            let reference = variant::decode_path(path);
            let is_modified = reference.is_modified();
            reports.push(DecodeEvent {
                index,
                path: path.to_string(),
                reference,
            });
            usize::from(is_modified)
        })
        .sum();

    let mut events = reports.pop_all();
    events.sort_by_key(|event| event.index);
    for event in &events {
        println!(
            "{}",
            output::format_decode_line(&event.path, &event.reference)
        );
    }
    println!(
        "{}",
        output::format_list_summary(paths.len(), modified, events.len(), reports.capacity())
    );
    Ok(())
}

/// Join the configured repository root in front of an encoded path.
fn join_root(root: &str, path: &str) -> String {
    if root.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", root.trim_end_matches('/'), path)
    }
}
