use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, WrapErr, bail};
use log::{debug, info};

mod cli;

use cli::{Cli, OutputFormat};
use stamplist::cache::{self, Cache};
use stamplist::config::{self, Config};
use stamplist::dates::DEFAULT_UTC_OFFSET_HOURS;
use stamplist::generate::{GenerateRequest, Generated, generate, generate_from_title};
use stamplist::metadata::{FixedTitle, NoDates};
use stamplist::output::{self, LinkStyle};
use stamplist::segment::SegmentPolicy;
use stamplist::youtube::YouTube;

const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("stamplist.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stamplist")
        .join("logs")
}

fn build_after_help() -> String {
    let api_key_line = if std::env::var(API_KEY_ENV).is_ok() {
        format!("  \x1b[32m✅\x1b[0m {API_KEY_ENV}  (stream dates are looked up)")
    } else {
        format!("  \x1b[31m❌\x1b[0m {API_KEY_ENV}  (not set; use --date for dates)")
    };

    format!(
        "\nDATE LOOKUP:\n{api_key_line}\n\nConfig is read from: {}\nLogs are written to: {}",
        config::config_path().display(),
        log_dir().join("stamplist.log").display()
    )
}

fn read_setlist(cli: &Cli) -> Result<String> {
    match &cli.input {
        Some(path) => {
            std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read setlist from {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn write_output(cli: &Cli, generated: &Generated, bytes: &[u8]) -> Result<()> {
    let path = if cli.auto_name {
        let extension = match cli.format {
            OutputFormat::Csv => "csv",
            OutputFormat::Preview => "txt",
            OutputFormat::Json => "json",
        };
        Some(PathBuf::from(format!(
            "{}.{extension}",
            output::sanitize_filename(&generated.label)
        )))
    } else {
        cli.output.clone()
    };

    match path {
        Some(path) => {
            std::fs::write(&path, bytes)?;
            if cli.verbose {
                eprintln!("Output written to: {}", path.display());
            }
        }
        None => io::stdout().write_all(bytes)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let setlist = if cli.title_only { String::new() } else { read_setlist(&cli)? };
    if !cli.title_only && setlist.trim().is_empty() {
        bail!("no setlist provided\n\nUsage: stamplist <URL> -i setlist.txt\n       cat setlist.txt | stamplist <URL>");
    }

    // CLI flags take priority over config
    let policy = SegmentPolicy {
        separator_assignment: cli.assignment.or(config.assignment).unwrap_or_default(),
        treat_long_vowel_as_separator: cli.long_vowel_separator || config.long_vowel_separator.unwrap_or(false),
    };
    debug!("Segment policy: {policy:?}");

    let request = GenerateRequest {
        url: &cli.url,
        setlist: &setlist,
        policy,
        flip: cli.flip,
        manual_date: cli.date.as_deref(),
    };

    let generated = if cli.no_metadata {
        if cli.title_only {
            bail!("--title-only needs the title lookup; drop --no-metadata");
        }
        generate(&request, &FixedTitle::default(), &NoDates).await?
    } else {
        let ttl = config.cache_ttl_secs.map_or(cache::DEFAULT_TTL, Duration::from_secs);
        let cache = (!cli.no_cache).then(|| Cache::new(cache::cache_dir(), ttl));
        let api_key = std::env::var(API_KEY_ENV).ok().or(config.youtube_api_key.clone());
        let youtube = YouTube::new(
            reqwest::Client::new(),
            api_key,
            config.utc_offset_hours.unwrap_or(DEFAULT_UTC_OFFSET_HOURS),
            cache,
        );
        if cli.title_only {
            generate_from_title(&request, &youtube, &youtube).await?
        } else {
            generate(&request, &youtube, &youtube).await?
        }
    };

    if cli.verbose {
        eprintln!(
            "Video: {} ({})\nDate: {}\nParsed: {}\nUnparsed: {}",
            generated.title,
            generated.video_id,
            generated
                .date
                .as_ref()
                .map_or_else(|| "unknown".to_string(), |d| format!("{} ({})", d.yyyymmdd, d.source)),
            generated.batch.records.len(),
            generated.batch.invalid_lines.len(),
        );
    }

    match cli.format {
        OutputFormat::Csv => {
            let style = if cli.plain_links || config.plain_links.unwrap_or(false) {
                LinkStyle::Plain
            } else {
                LinkStyle::Hyperlink
            };
            let bytes = output::to_csv(&generated.rows, style)?;
            write_output(&cli, &generated, &bytes)?;
            if !generated.batch.invalid_lines.is_empty() {
                eprintln!(
                    "{} unparsed line(s); check the input format (use -f preview to list them)",
                    generated.batch.invalid_lines.len()
                );
            }
        }
        OutputFormat::Preview => {
            let rendered = output::render_preview(&generated.batch, &generated.rows);
            write_output(&cli, &generated, format!("{rendered}\n").as_bytes())?;
        }
        OutputFormat::Json => {
            let rendered = output::render_json(&generated.batch, &generated.rows);
            write_output(&cli, &generated, format!("{rendered}\n").as_bytes())?;
        }
    }

    Ok(())
}
