use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use colored::Colorize;
use framesplit::{
    ExtractOptions, FfmpegLogLevel, ImageFormat, RunReport, RunStatus, SegmentStatus,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framesplit input.mp4 --out frames --jobs 8 --every 10\n  framesplit input.mp4 --out frames --every 30 --ext jpg --overwrite\n  framesplit input.mp4 --out frames --jobs 4 --json\n\nExit codes:\n  0  all segments completed\n  2  some segments failed or stopped early\n  1  total failure or fatal error";

#[derive(Debug, Parser)]
#[command(
    name = "framesplit",
    version,
    about = "Split a video into segments and extract every Nth frame in parallel",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input video path.
    input: PathBuf,

    /// Output directory for extracted frame images.
    #[arg(long)]
    out: PathBuf,

    /// Number of parallel segment workers.
    #[arg(long, default_value_t = 4)]
    jobs: usize,

    /// Extract every Nth frame.
    #[arg(long, default_value_t = 30)]
    every: u64,

    /// Output image extension (png, jpg, bmp, tiff).
    #[arg(long, default_value = "png")]
    ext: String,

    /// Allow writing into an existing output directory.
    #[arg(long)]
    overwrite: bool,

    /// Per-worker wall-clock budget, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Desired worker thread count for the rayon pool.
    #[arg(long)]
    threads: Option<usize>,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the run report as machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// Show per-segment detail.
    #[arg(long)]
    verbose: bool,
}

fn parse_log_level(value: &str) -> Option<FfmpegLogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "quiet" => Some(FfmpegLogLevel::Quiet),
        "panic" => Some(FfmpegLogLevel::Panic),
        "fatal" => Some(FfmpegLogLevel::Fatal),
        "error" => Some(FfmpegLogLevel::Error),
        "warning" | "warn" => Some(FfmpegLogLevel::Warning),
        "info" => Some(FfmpegLogLevel::Info),
        "verbose" => Some(FfmpegLogLevel::Verbose),
        "debug" => Some(FfmpegLogLevel::Debug),
        "trace" => Some(FfmpegLogLevel::Trace),
        _ => None,
    }
}

fn segment_status_label(status: SegmentStatus) -> &'static str {
    match status {
        SegmentStatus::Completed => "completed",
        SegmentStatus::Partial => "partial",
        SegmentStatus::Failed => "failed",
    }
}

fn exit_code_for(status: RunStatus) -> u8 {
    match status {
        RunStatus::Success => 0,
        RunStatus::PartialFailure => 2,
        RunStatus::TotalFailure => 1,
    }
}

fn print_json_report(report: &RunReport) -> Result<(), Box<dyn std::error::Error>> {
    let payload = json!({
        "status": match report.status() {
            RunStatus::Success => "success",
            RunStatus::PartialFailure => "partial_failure",
            RunStatus::TotalFailure => "total_failure",
        },
        "frames_written": report.frames_written(),
        "segments": report.segments().iter().map(|segment| json!({
            "segment_id": segment.segment_id,
            "start_frame": segment.start_frame,
            "end_frame": segment.end_frame,
            "frames_written": segment.frames_written,
            "status": segment_status_label(segment.status),
            "error": segment.error.as_ref().map(|error| error.to_string()),
        })).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn execute(cli: &Cli) -> Result<RunReport, Box<dyn std::error::Error>> {
    if let Some(level) = &cli.log_level {
        let parsed = parse_log_level(level).ok_or(format!("unsupported --log-level: {level}"))?;
        framesplit::set_ffmpeg_log_level(parsed);
    }

    if let Some(threads) = cli.threads {
        if threads > 0 {
            unsafe {
                std::env::set_var("RAYON_NUM_THREADS", threads.to_string());
            }
        }
    }

    let image_format = ImageFormat::from_extension(&cli.ext)
        .ok_or(format!("unsupported --ext: {}", cli.ext))?;

    let mut options = ExtractOptions::new()
        .with_overwrite(cli.overwrite)
        .with_image_format(image_format);

    if let Some(seconds) = cli.timeout_secs {
        options = options.with_worker_budget(Duration::from_secs(seconds));
    }

    let report = framesplit::run(&cli.input, cli.jobs, cli.every, &cli.out, &options)?;
    Ok(report)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let report = match execute(&cli) {
        Ok(report) => report,
        Err(error) => {
            eprintln!("{} {error}", "error:".red().bold());
            return ExitCode::from(1);
        }
    };

    if cli.json {
        if let Err(error) = print_json_report(&report) {
            eprintln!("{} {error}", "error:".red().bold());
            return ExitCode::from(1);
        }
        return ExitCode::from(exit_code_for(report.status()));
    }

    if cli.verbose {
        for segment in report.segments() {
            let line = format!(
                "segment {} [{}, {}): {} ({} frame(s))",
                segment.segment_id,
                segment.start_frame,
                segment.end_frame,
                segment_status_label(segment.status),
                segment.frames_written,
            );
            match segment.status {
                SegmentStatus::Completed => eprintln!("{}", line.green()),
                SegmentStatus::Partial => eprintln!("{}", line.yellow()),
                SegmentStatus::Failed => eprintln!("{}", line.red()),
            }
            if let Some(error) = &segment.error {
                eprintln!("  {}", error.to_string().dimmed());
            }
        }
    }

    match report.status() {
        RunStatus::Success => println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "wrote {} frame(s) to {}",
                report.frames_written(),
                cli.out.display(),
            )
            .green(),
        ),
        RunStatus::PartialFailure => println!(
            "{} {}",
            "partial:".yellow().bold(),
            format!(
                "wrote {} frame(s); incomplete segments: {}",
                report.frames_written(),
                report.failed_segment_ids().join(", "),
            )
            .yellow(),
        ),
        RunStatus::TotalFailure => println!(
            "{} {}",
            "failure:".red().bold(),
            "no segment produced any frames".red(),
        ),
    }

    ExitCode::from(exit_code_for(report.status()))
}

#[cfg(test)]
mod tests {
    use super::{exit_code_for, parse_log_level, segment_status_label};
    use framesplit::{RunStatus, SegmentStatus};

    #[test]
    fn parse_log_level_aliases() {
        assert!(parse_log_level("quiet").is_some());
        assert!(parse_log_level("WARN").is_some());
        assert!(parse_log_level("warning").is_some());
        assert!(parse_log_level("loud").is_none());
    }

    #[test]
    fn exit_codes_are_distinguishable() {
        assert_eq!(exit_code_for(RunStatus::Success), 0);
        assert_eq!(exit_code_for(RunStatus::PartialFailure), 2);
        assert_eq!(exit_code_for(RunStatus::TotalFailure), 1);
    }

    #[test]
    fn segment_status_labels() {
        assert_eq!(segment_status_label(SegmentStatus::Completed), "completed");
        assert_eq!(segment_status_label(SegmentStatus::Partial), "partial");
        assert_eq!(segment_status_label(SegmentStatus::Failed), "failed");
    }
}
