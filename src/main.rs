// CLI binary entry point for lyrix
//
// This is the main entry point for the lyrix command-line tool.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::process;

use lyrix::{render_lrc, Lyrics, LyricsFile};

/// Lyrix - embedded lyrics CLI tool
#[derive(Parser, Debug)]
#[command(name = "lyrix")]
#[command(about = "Extract embedded ID3v2 lyrics from audio files", long_about = None)]
#[command(version)]
struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract lyrics from audio file(s)
    Extract {
        /// Audio file path(s)
        files: Vec<String>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Report tag version and lyric frames present
    Detect {
        /// Audio file path(s)
        files: Vec<String>,
    },
    /// Write .lrc sidecar files for every matching audio file
    Batch {
        /// Directory to scan
        directory: String,

        /// File name pattern
        #[arg(short, long, default_value = "*.mp3")]
        pattern: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Lrc,
}

fn main() {
    let config = Config::parse();

    let result = match &config.command {
        Commands::Extract { files, output } => {
            command_extract(files, output.as_deref(), &config)
        }
        Commands::Detect { files } => command_detect(files, &config),
        Commands::Batch { directory, pattern } => command_batch(directory, pattern, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn command_extract(files: &[String], output: Option<&str>, config: &Config) -> Result<()> {
    if files.is_empty() {
        bail!("No files specified");
    }

    let mut out = String::new();
    for file_path in files {
        let file = LyricsFile::new(file_path.clone());
        let lyrics = match file.lyrics() {
            Some(l) => l,
            None => {
                eprintln!("✗ {}: no embedded lyrics", file_path);
                continue;
            }
        };

        match config.format {
            OutputFormat::Pretty => {
                out.push_str(&format!("{}:\n", file_path));
                match &lyrics {
                    Lyrics::Synced(lines) => out.push_str(&render_lrc(lines)),
                    Lyrics::Unsynced(text) => {
                        out.push_str(text);
                        out.push('\n');
                    }
                }
            }
            OutputFormat::Json => {
                out.push_str(&serde_json::to_string_pretty(&lyrics)?);
                out.push('\n');
            }
            OutputFormat::Lrc => match &lyrics {
                Lyrics::Synced(lines) => out.push_str(&render_lrc(lines)),
                Lyrics::Unsynced(_) => {
                    eprintln!("✗ {}: no synchronised lyrics", file_path);
                }
            },
        }
    }

    match output {
        Some(path) => fs::write(path, out).with_context(|| format!("writing {}", path))?,
        None => print!("{}", out),
    }

    Ok(())
}

fn command_detect(files: &[String], config: &Config) -> Result<()> {
    if files.is_empty() {
        bail!("No files specified");
    }

    for file_path in files {
        let file = LyricsFile::new(file_path.clone());
        match file.probe() {
            Some(probe) => {
                if config.format == OutputFormat::Json {
                    println!("{}", serde_json::to_string(&probe)?);
                } else if !config.quiet {
                    println!(
                        "  {}: ID3v2.{} (USLT: {}, SYLT: {})",
                        file_path, probe.version, probe.has_unsync_lyrics, probe.has_sync_lyrics
                    );
                }
            }
            None => {
                eprintln!("✗ {}: no ID3v2 tag", file_path);
            }
        }
    }

    Ok(())
}

fn command_batch(directory: &str, pattern: &str, config: &Config) -> Result<()> {
    use glob::glob;

    // Build glob pattern
    let glob_pattern = if pattern.contains('*') || pattern.contains('?') {
        format!("{}/{}", directory, pattern)
    } else {
        format!("{}/**/{}", directory, pattern)
    };

    let mut files = Vec::new();
    for entry in glob(&glob_pattern).context("Invalid glob pattern")? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => eprintln!("✗ Error reading path: {}", e),
        }
    }

    if files.is_empty() {
        if !config.quiet {
            println!("No files found matching pattern");
        }
        return Ok(());
    }

    let mut written = 0;
    let mut skipped = 0;
    for path in &files {
        let file = LyricsFile::new(path.to_string_lossy());
        match file.to_lrc() {
            Some(lrc) => {
                let sidecar = path.with_extension("lrc");
                fs::write(&sidecar, lrc)
                    .with_context(|| format!("writing {}", sidecar.display()))?;
                if !config.quiet {
                    println!("✓ {}", sidecar.display());
                }
                written += 1;
            }
            None => {
                skipped += 1;
            }
        }
    }

    if !config.quiet {
        println!(
            "Completed: {} written, {} without synchronised lyrics",
            written, skipped
        );
    }

    Ok(())
}
