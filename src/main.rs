//! Trace replay harness for the reading-lens pipeline.
//!
//! Feeds a JSONL trace of per-frame landmark records through a real
//! [`ReadingSession`] at a simulated camera cadence and prints every
//! committed presentation change. Useful for tuning the smoothing, dead-zone,
//! and threshold parameters against recorded movement without a browser host.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use reading_lens::config::{Config, EXAMPLE_CONFIG};
use reading_lens::landmarks::{Camera, DetectorOptions, Frame, LandmarkSource};
use reading_lens::presentation::color::Rgb;
use reading_lens::presentation::ReadingSurface;
use reading_lens::session::ReadingSession;
use reading_lens::storage::JsonFileStore;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSONL trace of frame records to replay
    #[arg(short, long, required_unless_present = "print_config")]
    trace: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Directory for persisted calibration/settings records
    #[arg(long, default_value = ".reading-lens")]
    state_dir: String,

    /// Simulated camera framerate
    #[arg(long, default_value = "30")]
    fps: u32,

    /// Trigger a calibration after this many frames
    #[arg(long)]
    calibrate_at: Option<usize>,

    /// Font size to calibrate with (px)
    #[arg(long, default_value = "18.0")]
    font_size: f64,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

/// Surface that prints presentation changes to stdout
struct ConsoleSurface;

impl ReadingSurface for ConsoleSurface {
    fn set_font_size(&mut self, px: f64) {
        println!("font-size: {px:.2}px");
    }

    fn set_colors(&mut self, background: Rgb, text: Rgb) {
        println!("colors: background {} text {}", background.to_css_hex(), text.to_css_hex());
    }

    fn show_status(&mut self, status: &str) {
        println!("status: {status}");
    }
}

/// Camera stand-in for trace replay; the trace is always "available"
struct TraceCamera {
    acquired: bool,
}

impl Camera for TraceCamera {
    fn acquire(&mut self) -> reading_lens::Result<()> {
        self.acquired = true;
        Ok(())
    }

    fn release(&mut self) {
        self.acquired = false;
    }
}

/// Landmark source stand-in; frames come from the trace file
struct TraceDetector;

impl LandmarkSource for TraceDetector {
    fn configure(&mut self, options: &DetectorOptions) -> reading_lens::Result<()> {
        info!(
            "Trace detector configured: max_faces={}, detection={:.2}, tracking={:.2}",
            options.max_faces, options.detection_confidence, options.tracking_confidence
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    info!("Reading Lens - trace replay");

    let config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    let trace_path = args.trace.as_deref().context("a trace file is required")?;
    let store = JsonFileStore::new(&args.state_dir)?;

    let mut session = ReadingSession::new(
        config,
        Box::new(TraceCamera { acquired: false }),
        Box::new(TraceDetector),
        Box::new(store),
        Box::new(ConsoleSurface),
    )?;
    session.set_error_callback(Box::new(|e| eprintln!("setup error: {e}")));

    let start = Instant::now();
    session.start(start)?;

    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    let file = File::open(trace_path).with_context(|| format!("open trace {trace_path}"))?;
    let reader = BufReader::new(file);

    let mut processed = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: Frame =
            serde_json::from_str(&line).with_context(|| format!("parse frame record on line {}", index + 1))?;

        let at = start + frame_interval * (processed as u32);
        session.process_frame(&frame, at);
        processed += 1;

        if args.calibrate_at == Some(processed) {
            match session.calibrate(args.font_size) {
                Ok(record) => println!(
                    "calibrated: reference width {:.1}px, base font {:.1}px",
                    record.reference_face_width, record.reference_font_size
                ),
                Err(e) => println!("calibration refused: {e}"),
            }
        }
    }

    let end = start + frame_interval * (processed as u32);
    if let Some(elapsed) = session.reading_time(end) {
        info!("Replayed {processed} frames ({elapsed:?} of simulated reading)");
    }
    session.stop();

    Ok(())
}
