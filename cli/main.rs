use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use encoding_rs::Encoding;
use filex::{compare, config, gzip, hash, owner, path_search, replace, text_io, util};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// filex - file utility toolbox: hashing, comparison, gzip, text I/O
#[derive(Parser)]
#[command(name = "filex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a file's content digest
    Hash {
        /// File to hash
        file: PathBuf,

        /// Digest algorithm (defaults to the configured algorithm)
        #[arg(short, long)]
        algorithm: Option<hash::HashAlgorithm>,
    },

    /// Compare two files by content digest
    Compare {
        /// First file
        file1: PathBuf,

        /// Second file
        file2: PathBuf,

        /// Digest algorithm (defaults to the configured algorithm)
        #[arg(short, long)]
        algorithm: Option<hash::HashAlgorithm>,
    },

    /// Create a gzip-compressed copy of a file
    Compress {
        /// Input file
        input: PathBuf,

        /// Output file (defaults to input path with .gz appended)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decompress a gzip-compressed file
    Decompress {
        /// Compressed input file
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },

    /// Find and replace literal text in a file
    Replace {
        /// File to edit
        file: PathBuf,

        /// Text to search for
        old: String,

        /// Replacement text
        new: String,

        /// Match case-insensitively
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// Search PATH directories for a filename
    Which {
        /// Filename to search for
        name: String,
    },

    /// Show the owner of a file
    Owner {
        /// File to inspect
        file: PathBuf,
    },

    /// Print a file's text content under an explicit encoding
    Read {
        /// File to read
        file: PathBuf,

        /// Character encoding label (e.g. utf-8, windows-1252)
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,
    },

    /// Write text to a file under an explicit encoding
    Write {
        /// File to write
        file: PathBuf,

        /// Text content
        text: String,

        /// Character encoding label
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,

        /// Append instead of truncating
        #[arg(short, long)]
        append: bool,
    },

    /// Print a fresh unique temporary file path
    Tempfile,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging
    // Use RUST_LOG environment variable to control log level (e.g., RUST_LOG=info,filex=debug)
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    info!(command = ?cli.command, "filex starting");

    let cfg = config::Config::load_with_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Hash { file, algorithm } => {
            cmd_hash(&file, algorithm.unwrap_or(cfg.default_algorithm)).await
        }

        Commands::Compare {
            file1,
            file2,
            algorithm,
        } => cmd_compare(&file1, &file2, algorithm.unwrap_or(cfg.default_algorithm)).await,

        Commands::Compress { input, output } => cmd_compress(&input, output).await,

        Commands::Decompress { input, output } => cmd_decompress(&input, &output).await,

        Commands::Replace {
            file,
            old,
            new,
            ignore_case,
        } => cmd_replace(&file, &old, &new, ignore_case).await,

        Commands::Which { name } => cmd_which(&name),

        Commands::Owner { file } => cmd_owner(&file),

        Commands::Read { file, encoding } => cmd_read(&file, &encoding).await,

        Commands::Write {
            file,
            text,
            encoding,
            append,
        } => cmd_write(&file, &text, &encoding, append).await,

        Commands::Tempfile => {
            let dir = cfg.temp_dir.map(PathBuf::from);
            let path = match dir {
                Some(d) => util::temp_file_in(d),
                None => util::temp_file(),
            };
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes())
        .with_context(|| format!("unknown encoding label '{}'", label))
}

async fn cmd_hash(file: &PathBuf, algorithm: hash::HashAlgorithm) -> Result<()> {
    let digest = hash::compute_hash(file, algorithm).await?;
    println!("{}  {}", digest, file.display());
    Ok(())
}

async fn cmd_compare(
    file1: &PathBuf,
    file2: &PathBuf,
    algorithm: hash::HashAlgorithm,
) -> Result<()> {
    let equal = compare::files_equal(file1, file2, algorithm).await?;
    if equal {
        println!("Files are identical ({})", algorithm);
        Ok(())
    } else {
        println!("Files differ ({})", algorithm);
        std::process::exit(1);
    }
}

async fn cmd_compress(input: &PathBuf, output: Option<PathBuf>) -> Result<()> {
    let output = output.unwrap_or_else(|| {
        let mut p = input.as_os_str().to_owned();
        p.push(".gz");
        PathBuf::from(p)
    });

    let input_size = fs::metadata(input)
        .await
        .with_context(|| format!("reading metadata for {:?}", input))?
        .len();

    let spinner = create_spinner(&format!("Compressing {}...", input.display()));
    let bytes = gzip::compress_gzip(input, &output).await?;
    spinner.finish_with_message(format!(
        "Compressed {} of {} bytes -> {}",
        bytes,
        input_size,
        output.display()
    ));
    Ok(())
}

async fn cmd_decompress(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let spinner = create_spinner(&format!("Decompressing {}...", input.display()));
    let bytes = gzip::decompress_gzip(input, output).await?;
    spinner.finish_with_message(format!("Decompressed {} bytes -> {}", bytes, output.display()));
    Ok(())
}

async fn cmd_replace(file: &PathBuf, old: &str, new: &str, ignore_case: bool) -> Result<()> {
    let case = if ignore_case {
        replace::MatchCase::Insensitive
    } else {
        replace::MatchCase::Sensitive
    };

    let changed = replace::find_and_replace(file, old, new, case).await?;
    if changed {
        println!("Replaced '{}' with '{}' in {}", old, new, file.display());
    } else {
        println!("No occurrences of '{}' in {}", old, file.display());
    }
    Ok(())
}

fn cmd_which(name: &str) -> Result<()> {
    match path_search::find_in_path(name)? {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => {
            println!("No match for '{}' in PATH", name);
            std::process::exit(1);
        }
    }
}

fn cmd_owner(file: &PathBuf) -> Result<()> {
    let owner = owner::file_owner(file)?;
    println!("{}", owner);
    Ok(())
}

async fn cmd_read(file: &PathBuf, encoding: &str) -> Result<()> {
    let encoding = lookup_encoding(encoding)?;
    let cancel = CancellationToken::new();
    let text = text_io::read_text(file, encoding, &cancel).await?;
    print!("{}", text);
    Ok(())
}

async fn cmd_write(file: &PathBuf, text: &str, encoding: &str, append: bool) -> Result<()> {
    let encoding = lookup_encoding(encoding)?;
    let mode = if append {
        text_io::WriteMode::Append
    } else {
        text_io::WriteMode::Truncate
    };

    let cancel = CancellationToken::new();
    text_io::write_text(file, text, encoding, mode, &cancel).await?;
    println!("Wrote {}", file.display());
    Ok(())
}
