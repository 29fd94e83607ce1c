use clap::Parser;
use image::ImageReader;
use std::path::PathBuf;

use swarascan::{AnalysisPipeline, RawDetection};

#[derive(Parser)]
#[command(name = "swarascan")]
#[command(about = "Resolve and order swara notation detections from scanned images")]
struct Cli {
    /// Path to the scanned notation image
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// JSON file with raw detector output (entries of label, score, bbox)
    #[arg(long, value_name = "FILE")]
    detections: PathBuf,

    /// Write the full analysis result as JSON
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Overlap at or above which two boxes count as duplicates
    #[arg(long, default_value_t = 0.4)]
    iou_threshold: f64,

    /// Minimum detector confidence to keep
    #[arg(long, default_value_t = 0.3)]
    confidence: f32,

    /// Skip the pixel-zone modifier checks (faster, keeps detector labels as-is)
    #[arg(long)]
    no_verify: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    if args.verbose {
        println!("Loading image: {:?}", args.image_path);
    }
    let img = ImageReader::open(&args.image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    if args.verbose {
        println!("Image loaded: {}x{}\n", img.width(), img.height());
    }

    let raw_json = std::fs::read_to_string(&args.detections)?;
    let raw: Vec<RawDetection> = serde_json::from_str(&raw_json)
        .map_err(|e| anyhow::anyhow!("Failed to parse detections file: {}", e))?;
    if args.verbose {
        println!("Loaded {} raw detections\n", raw.len());
    }

    let mut pipeline = AnalysisPipeline::new().with_verbose(args.verbose);
    pipeline.iou_threshold = args.iou_threshold;
    pipeline.confidence_floor = args.confidence;
    pipeline.verify_modifiers = !args.no_verify;

    let result = pipeline.process_detections(raw, &img);

    println!("\n=== Swara Analysis Results ===");
    println!("Total detections: {}", result.detections.len());
    println!(
        "Overall confidence: {:.1}%",
        result.overall_confidence * 100.0
    );

    if result.ordered_labels.is_empty() {
        println!("No swara symbols recognized.");
    } else {
        println!("\nReading order:");
        println!("  {}", result.ordered_labels.join(" "));
        let numeric: Vec<String> = result
            .numeric_sequence
            .iter()
            .map(|n| n.to_string())
            .collect();
        println!("  [{}]", numeric.join(", "));
    }

    if args.verbose && !result.detections.is_empty() {
        println!("\nDetections:");
        for det in &result.detections {
            println!(
                "  {} at ({}, {}) - score {:.2}, numeric {}",
                det.label, det.bbox.x1, det.bbox.y1, det.score, det.numeric
            );
        }
    }

    if let Some(out_path) = args.out {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&out_path, json)?;
        println!("\nResult written to {:?}", out_path);
    }

    Ok(())
}
