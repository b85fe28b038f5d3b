use anyhow::{Context, Result};
use clap::Parser;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use yttext::clipboard::copy_to_clipboard;
use yttext::format::readable::ReadableFormatter;
use yttext::transcript::CaptionTrack;
use yttext::{
    create_formatter, Config, ExtractionRequest, OutputFormat, TranscriptClient, TranscriptFormatter,
};

#[derive(Parser)]
#[command(name = "yttext")]
#[command(version, about = "Get the transcript of a YouTube video and print it to stdout")]
#[command(
    after_help = "Note: put quotes around the YouTube URL to avoid shell interpretation issues"
)]
struct Cli {
    /// YouTube URL (youtube.com/watch?v=... or youtu.be/...) or bare video ID
    input: String,

    /// Caption language code (e.g., en, es, fr)
    #[arg(short, long)]
    lang: Option<String>,

    /// Output format: text, json, srt, readable
    #[arg(short, long)]
    format: Option<String>,

    /// Use readable format (same as --format readable)
    #[arg(short, long)]
    readable: bool,

    /// Maximum line length for the readable format
    #[arg(short, long)]
    width: Option<usize>,

    /// Copy output to the clipboard in addition to stdout
    #[arg(short, long)]
    copy: bool,

    /// List available caption tracks instead of printing a transcript
    #[arg(long)]
    list_languages: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn spinner(message: &str) -> Option<ProgressBar> {
    if !Term::stderr().is_term() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

fn print_hints(verbose: bool) {
    eprintln!("\n{}", style("Possible solutions:").bold());
    eprintln!("1. Make sure the video exists and is publicly accessible");
    eprintln!("2. Verify that the video has captions/transcripts available");
    eprintln!("3. Try a different video to confirm the tool is working");
    if !verbose {
        eprintln!("4. Run with --verbose for more detailed error information");
    }
}

fn print_tracks(tracks: &[CaptionTrack]) {
    for track in tracks {
        let name = track.display_name().unwrap_or_default();
        let kind = if track.is_auto_generated() {
            " (auto-generated)"
        } else {
            ""
        };
        println!("{}\t{}{}", track.language_code, name, kind);
    }
}

/// Resolve the output format from flags, falling back to the config default.
fn resolve_format(cli: &Cli, config: &Config) -> Result<OutputFormat> {
    if cli.readable {
        return Ok(OutputFormat::Readable);
    }
    match cli.format {
        Some(ref name) => Ok(name.parse::<OutputFormat>()?),
        None => Ok(config.default_format),
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(ref lang) = cli.lang {
        config.language = lang.clone();
    }
    if let Some(width) = cli.width {
        config.line_length = width;
    }
    config.validate().context("Configuration validation failed")?;

    let format = resolve_format(cli, &config)?;
    let request = ExtractionRequest::from_input(&cli.input);
    let client = TranscriptClient::from_config(&config)?;

    info!("Input:    {}", cli.input);
    info!("Language: {}", config.language);
    info!("Format:   {}", format);

    if cli.list_languages {
        let pb = spinner("Looking up caption tracks...");
        let tracks = client.list_tracks(&request).await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }
        print_tracks(&tracks?);
        return Ok(());
    }

    let pb = spinner("Fetching transcript...");
    let segments = client.fetch(&request, &config.language).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    let segments = segments?;

    if segments.is_empty() {
        anyhow::bail!("No transcript content found");
    }

    let formatter: Box<dyn TranscriptFormatter> = match format {
        OutputFormat::Readable => Box::new(ReadableFormatter::with_line_length(config.line_length)),
        other => create_formatter(other),
    };
    let output = formatter.format(&segments)?;

    if cli.copy {
        match copy_to_clipboard(&output) {
            Ok(()) => eprintln!("{}", style("Copied to clipboard!").green()),
            Err(e) => warn!("Failed to copy to clipboard: {}", e),
        }
    }

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            print_hints(cli.verbose);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("yttext").chain(args.iter().copied()))
    }

    #[test]
    fn test_readable_flag_wins() {
        let cli = parse(&["--readable", "--format", "json", "dQw4w9WgXcQ"]);
        let format = resolve_format(&cli, &Config::default()).unwrap();
        assert_eq!(format, OutputFormat::Readable);
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let cli = parse(&["dQw4w9WgXcQ"]);
        let mut config = Config::default();
        config.default_format = OutputFormat::Srt;
        assert_eq!(resolve_format(&cli, &config).unwrap(), OutputFormat::Srt);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let cli = parse(&["--format", "xml", "dQw4w9WgXcQ"]);
        assert!(resolve_format(&cli, &Config::default()).is_err());
    }

    #[test]
    fn test_cli_flags() {
        let cli = parse(&["-l", "es", "-w", "60", "-c", "https://youtu.be/dQw4w9WgXcQ"]);
        assert_eq!(cli.lang.as_deref(), Some("es"));
        assert_eq!(cli.width, Some(60));
        assert!(cli.copy);
        assert!(!cli.list_languages);
    }
}
