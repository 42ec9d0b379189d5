use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use mp3splice::report::Status;
use mp3splice::{join_all, AudioBuffer, Config, StreamReport, Summary};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "mp3splice", version, about = "Scan, trim, tag and splice MP3 files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print frame count and duration for each file
    Info {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Also write a report (.json or .csv)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
    /// Copy out a time range
    Extract {
        input: PathBuf,
        /// Start time in seconds
        #[arg(short, long, default_value_t = 0.0)]
        start: f64,
        /// Length in seconds
        #[arg(short, long)]
        length: f64,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Remove leading data before the first frame and any ID3v1 trailer
    Strip {
        input: PathBuf,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Prepend an ID3v2 tag built from the [tag] table of a TOML file
    Tag {
        input: PathBuf,
        #[arg(short, long)]
        config: PathBuf,
        /// Write here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Strip each source and splice it in front of the destination
    Join {
        destination: PathBuf,
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> mp3splice::Result<ExitCode> {
    match command {
        Command::Info { files, report } => {
            let reports: Vec<StreamReport> = files.iter().map(StreamReport::from_path).collect();
            for r in &reports {
                print_report(r);
            }

            let summary = Summary::from_reports(&reports);
            if reports.len() > 1 {
                println!(
                    "\n{} files, {} ok, {} corrupt, {} unreadable, {:.2}s total",
                    summary.total, summary.ok, summary.corrupt, summary.error, summary.duration_secs
                );
            }

            if let Some(path) = report {
                mp3splice::report::generate(&path, &reports)?;
                info!(path = %path.display(), "report written");
            }

            if summary.ok == summary.total {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Extract {
            input,
            start,
            length,
            output,
        } => {
            let segment = AudioBuffer::load(&input)?.extract(start, length);
            if segment.is_empty() {
                info!(start, "nothing to extract, start is past the end of the stream");
            }
            segment.save(&output)?;
            info!(bytes = segment.len(), output = %output.display(), "segment written");
            Ok(ExitCode::SUCCESS)
        }
        Command::Strip { input, output } => {
            let mut buffer = AudioBuffer::load(&input)?;
            let stripped = buffer.strip_tags();
            let output = output.unwrap_or(input);
            buffer.save(&output)?;
            info!(
                leading = stripped.leading,
                trailing = stripped.trailing,
                output = %output.display(),
                "tags stripped"
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Tag {
            input,
            config,
            output,
        } => {
            let config = Config::load(&config)?;
            let mut buffer = AudioBuffer::load(&input)?;
            buffer.prepend_tag(&config.tag);
            let output = output.unwrap_or(input);
            buffer.save(&output)?;
            info!(output = %output.display(), "tag written");
            Ok(ExitCode::SUCCESS)
        }
        Command::Join {
            destination,
            sources,
        } => {
            join_all(&destination, &sources)?;
            info!(sources = sources.len(), destination = %destination.display(), "joined");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_report(r: &StreamReport) {
    let status = match r.status {
        Status::Ok => r.status.to_string().green(),
        Status::Corrupt => r.status.to_string().yellow(),
        Status::Error => r.status.to_string().red(),
    };

    match &r.error {
        None => println!(
            "{:<8} {:>9.2}s {:>7} frames {:>4} kbps{}  {}",
            status,
            r.duration_secs,
            r.frame_count,
            r.avg_bitrate,
            if r.is_vbr { " (VBR)" } else { "" },
            r.file_path
        ),
        Some(error) => println!("{:<8} {}  {}", status, r.file_path, error.dimmed()),
    }
}
