//! Framecheck CLI - Temporal error detection for raw video streams.

mod raw;

use clap::Parser;
use console::style;
use framecheck_classify::{
    ClassifierConfig, DEFAULT_GAP_RATIO, DEFAULT_MOTION_THRESHOLD, DEFAULT_SHARPNESS_THRESHOLD,
};
use framecheck_core::{Frame, FrameRate, FrameSource, Result as CoreResult};
use framecheck_pipeline::{Analyzer, AnalyzerConfig};
use framecheck_report::Report;
use indicatif::{ProgressBar, ProgressStyle};
use raw::{RawFormat, RawFrameSink, RawFrameSource};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    /// Normal output with progress bar and styled summary.
    Normal,
    /// JSON report on stdout for programmatic parsing.
    Json,
    /// Quiet mode with minimal output.
    Quiet,
    /// Verbose mode with per-frame detail.
    Verbose,
}

/// Command-line arguments for the framecheck tool.
#[derive(Parser, Debug)]
#[command(name = "framecheck")]
#[command(version)]
#[command(about = "Detect dropped and merged frames in raw video streams")]
#[command(long_about = "Framecheck scans a decoded frame sequence for temporal errors:\n\
    dropped frames (timestamp gaps and motion discontinuities) and merged\n\
    frames (blended duplicates with collapsed sharpness).\n\n\
    The input is a headerless packed frame dump; geometry and pixel format\n\
    must be supplied on the command line.\n\n\
    EXAMPLES:\n    \
    framecheck -i capture.raw --width 1280 --height 720 --format rgb24\n    \
    framecheck -i capture.raw --width 640 --height 480 --fps 25 --report out.json\n    \
    framecheck -i capture.raw --width 640 --height 480 -o annotated.raw\n    \
    framecheck -i capture.raw --width 640 --height 480 --json")]
struct Args {
    /// Input raw frame file
    #[arg(short, long)]
    input: PathBuf,

    /// Frame width in pixels
    #[arg(long)]
    width: u32,

    /// Frame height in pixels
    #[arg(long)]
    height: u32,

    /// Pixel format of the input frames
    #[arg(long, value_enum, default_value_t = RawFormat::Rgb24)]
    format: RawFormat,

    /// Nominal frame rate in frames per second
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Write annotated frames to this raw file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the JSON report to this file
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Timestamp gap threshold as a multiple of the expected interval
    #[arg(long, default_value_t = DEFAULT_GAP_RATIO)]
    gap_ratio: f64,

    /// Motion discontinuity threshold as a multiple of recent motion
    #[arg(long, default_value_t = DEFAULT_MOTION_THRESHOLD)]
    motion_threshold: f64,

    /// Laplacian variance below which a frame counts as merged
    #[arg(long, default_value_t = DEFAULT_SHARPNESS_THRESHOLD)]
    sharpness_threshold: f64,

    /// Overwrite output files if they exist
    #[arg(short = 'y', long)]
    overwrite: bool,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbose output (list every flagged frame)
    #[arg(short, long, conflicts_with = "quiet", conflicts_with = "json")]
    verbose: bool,

    /// Quiet mode (only print the drop/merge counts)
    #[arg(short, long, conflicts_with = "verbose", conflicts_with = "json")]
    quiet: bool,

    /// JSON output mode: print the full report to stdout
    #[arg(long, conflicts_with = "verbose", conflicts_with = "quiet")]
    json: bool,
}

impl Args {
    /// Determine the output mode based on flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else if self.verbose {
            OutputMode::Verbose
        } else {
            OutputMode::Normal
        }
    }

    fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            gap_ratio: self.gap_ratio,
            motion_threshold: self.motion_threshold,
            sharpness_threshold: self.sharpness_threshold,
        }
    }
}

/// Frame source wrapper ticking a progress bar as frames are pulled.
struct ProgressSource<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: FrameSource> ProgressSource<S> {
    fn new(inner: S) -> Self {
        let bar = match inner.frame_count() {
            Some(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} frames | ETA: {eta}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
                );
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { inner, bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<S: FrameSource> FrameSource for ProgressSource<S> {
    fn next_frame(&mut self) -> CoreResult<Option<Frame>> {
        let frame = self.inner.next_frame()?;
        if frame.is_some() {
            self.bar.inc(1);
        }
        Ok(frame)
    }

    fn frame_rate(&self) -> FrameRate {
        self.inner.frame_rate()
    }

    fn frame_count(&self) -> Option<u64> {
        self.inner.frame_count()
    }

    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let output_mode = args.output_mode();

    // Initialize logging (not in JSON or quiet mode)
    if output_mode != OutputMode::Json && output_mode != OutputMode::Quiet {
        let default_level = if args.verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    // Validate input file exists
    if !args.input.exists() {
        report_error(
            output_mode,
            "input_not_found",
            &format!("Input file not found: {}", args.input.display()),
        );
        std::process::exit(1);
    }

    // Check output files
    for path in [args.output.as_deref(), args.report.as_deref()].into_iter().flatten() {
        if path.exists() && !args.overwrite {
            report_error(
                output_mode,
                "output_exists",
                &format!("Output file already exists: {} (use -y to overwrite)", path.display()),
            );
            std::process::exit(1);
        }
    }

    // Print configuration (only in normal/verbose mode)
    if output_mode == OutputMode::Normal || output_mode == OutputMode::Verbose {
        println!();
        println!("{}", style("Configuration:").cyan().bold());
        println!("  Input:        {}", style(args.input.display()).white());
        println!(
            "  Geometry:     {}x{} {:?}",
            style(args.width).white(),
            style(args.height).white(),
            args.format
        );
        println!("  Frame rate:   {} fps", style(args.fps).white());
        println!(
            "  Thresholds:   gap {:.2}x | motion {:.2}x | sharpness {:.1}",
            args.gap_ratio, args.motion_threshold, args.sharpness_threshold
        );
        if let Some(ref output) = args.output {
            println!("  Annotated:    {}", style(output.display()).white());
        }
        if let Some(ref report) = args.report {
            println!("  Report:       {}", style(report.display()).white());
        }
        println!();
    }

    let report = match run_analysis(&args, output_mode) {
        Ok(report) => report,
        Err(e) => {
            report_error(output_mode, "analysis_failed", &e.to_string());
            std::process::exit(1);
        }
    };

    // Persist the report if asked
    if let Some(ref path) = args.report {
        let json = report.to_json_pretty()?;
        std::fs::write(path, json)?;
        debug!(path = %path.display(), "report written");
    }

    print_results(&args, output_mode, &report)?;

    info!("Analysis completed successfully");
    Ok(())
}

/// Open the source/sink pair and run the analysis pipeline.
fn run_analysis(args: &Args, output_mode: OutputMode) -> CoreResult<Report> {
    let classifier = args.classifier_config();
    let analyzer = Analyzer::with_config(AnalyzerConfig {
        classifier,
        ..Default::default()
    });

    let source = RawFrameSource::open(
        &args.input,
        args.width,
        args.height,
        args.format.pixel_format(),
        FrameRate::from_fps(args.fps),
    )?;

    let mut sink = match args.output {
        Some(ref path) => Some(RawFrameSink::create(path)?),
        None => None,
    };
    let sink_ref = sink
        .as_mut()
        .map(|s| s as &mut dyn framecheck_core::FrameSink);

    let show_progress = !args.no_progress
        && matches!(output_mode, OutputMode::Normal | OutputMode::Verbose);

    let run = if show_progress {
        let mut progress = ProgressSource::new(source);
        let run = analyzer.run(&mut progress, sink_ref, None)?;
        progress.finish();
        run
    } else {
        let mut source = source;
        analyzer.run(&mut source, sink_ref, None)?
    };

    Ok(run.report)
}

/// Print the final results according to the output mode.
fn print_results(args: &Args, output_mode: OutputMode, report: &Report) -> anyhow::Result<()> {
    let stats = &report.statistics;
    match output_mode {
        OutputMode::Json => {
            let json = report.to_json()?;
            println!("{}", json);
        }
        OutputMode::Quiet => {
            println!("{} drops, {} merges", stats.drops_detected, stats.merges_detected);
        }
        OutputMode::Normal | OutputMode::Verbose => {
            let clean = stats.drops_detected == 0 && stats.merges_detected == 0;
            if clean {
                println!("{}", style("No temporal errors detected").green().bold());
            } else {
                println!("{}", style("Temporal errors detected").red().bold());
            }
            println!();
            println!("{}", style("Statistics:").cyan().bold());
            println!("  Frames analyzed:  {}", stats.total_frames);
            println!("  Normal frames:    {}", style(stats.normal_frames).green());
            println!(
                "  Dropped frames:   {}",
                if stats.drops_detected > 0 {
                    style(stats.drops_detected).red()
                } else {
                    style(stats.drops_detected).dim()
                }
            );
            println!(
                "  Merged frames:    {}",
                if stats.merges_detected > 0 {
                    style(stats.merges_detected).yellow()
                } else {
                    style(stats.merges_detected).dim()
                }
            );
            println!("  Processing time:  {:.2}s", stats.processing_time);

            if output_mode == OutputMode::Verbose {
                let flagged: Vec<_> = report
                    .frames
                    .iter()
                    .filter(|f| f.status != "Normal")
                    .collect();
                if !flagged.is_empty() {
                    println!();
                    println!("{}", style("Flagged frames:").cyan().bold());
                    for frame in flagged {
                        let label = if frame.status == "Drop" {
                            style(frame.status).red()
                        } else {
                            style(frame.status).yellow()
                        };
                        println!(
                            "  #{:<6} {:<6} conf {:.2} | ts {:.1}ms | gap {:.1}ms | sharp {:.1} | motion {:.1}",
                            frame.frame_index,
                            label,
                            frame.confidence,
                            frame.timestamp,
                            frame.ts_gap,
                            frame.sharpness,
                            frame.motion
                        );
                    }
                }
            }

            if let Some(ref output) = args.output {
                println!();
                println!(
                    "{} {}",
                    style("Annotated stream saved to:").white(),
                    style(output.display()).green().bold()
                );
            }
            if let Some(ref path) = args.report {
                println!(
                    "{} {}",
                    style("Report saved to:").white(),
                    style(path.display()).green().bold()
                );
            }
        }
    }
    Ok(())
}

/// Report an error in the style matching the output mode.
fn report_error(output_mode: OutputMode, code: &str, message: &str) {
    if output_mode == OutputMode::Json {
        let error = serde_json::json!({
            "type": "error",
            "error": code,
            "message": message,
        });
        println!("{}", error);
    } else {
        eprintln!("{} {}", style("Error:").red().bold(), message);
    }
}
