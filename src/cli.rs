use clap::Parser;
use std::path::PathBuf;

use stamplist::segment::SeparatorAssignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Preview,
    Json,
}

#[derive(Parser)]
#[command(
    name = "stamplist",
    about = "Turn a timestamped setlist into a spreadsheet-ready CSV",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL (watch, youtu.be or shorts)
    pub url: String,

    /// Read the setlist from a file (reads from stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output format: csv (default), preview, json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long, conflicts_with = "auto_name")]
    pub output: Option<PathBuf>,

    /// Write output to a file named after the video title
    #[arg(long)]
    pub auto_name: bool,

    /// Which side of a separator is the artist
    #[arg(short, long, value_enum)]
    pub assignment: Option<SeparatorAssignment>,

    /// Treat the left side as the artist (fixed-with-flip only)
    #[arg(long)]
    pub flip: bool,

    /// Treat a free-standing ー as a separator
    #[arg(long)]
    pub long_vowel_separator: bool,

    /// Stream date to prefix the title with, e.g. 2024/5/3
    #[arg(short, long)]
    pub date: Option<String>,

    /// Write bare URLs instead of HYPERLINK formulas
    #[arg(long)]
    pub plain_links: bool,

    /// Build a single row from the video title instead of a setlist
    #[arg(long, conflicts_with = "input")]
    pub title_only: bool,

    /// Skip title and date lookups
    #[arg(long)]
    pub no_metadata: bool,

    /// Bypass the metadata cache
    #[arg(long)]
    pub no_cache: bool,

    /// Show parse statistics and metadata
    #[arg(short, long)]
    pub verbose: bool,
}
