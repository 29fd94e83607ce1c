use anyhow::{Context, Result};
use image::DynamicImage;
use log::debug;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;

use super::detector::SwaraDetector;
use crate::models::RawDetection;

/// One scale pass of the sliced sweep: tile size plus fractional overlap
/// between neighbouring tiles.
#[derive(Debug, Clone)]
pub struct SliceConfig {
    pub width: u32,
    pub height: u32,
    /// Fraction of a tile shared with its neighbour, in `[0, 1)`.
    pub overlap: f32,
}

impl SliceConfig {
    pub fn new(width: u32, height: u32, overlap: f32) -> Self {
        Self {
            width,
            height,
            overlap,
        }
    }

    fn step(size: u32, overlap: f32) -> u32 {
        let overlap = overlap.clamp(0.0, 0.99);
        ((size as f32 * (1.0 - overlap)).round() as u32).max(1)
    }
}

impl Default for SliceConfig {
    /// The production sweep settings: 640x640 tiles with 20% overlap.
    fn default() -> Self {
        Self::new(640, 640, 0.2)
    }
}

/// Tile origin and size within the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the overlapping tile grid for one scale pass. The far edge is
/// clamped to the image bound, so the last tile of a row or column may be
/// smaller than the configured slice size; it is never padded. An empty
/// image produces an empty grid.
pub fn tile_grid(img_width: u32, img_height: u32, config: &SliceConfig) -> Vec<Tile> {
    let mut tiles = Vec::new();
    if img_width == 0 || img_height == 0 || config.width == 0 || config.height == 0 {
        return tiles;
    }

    let step_x = SliceConfig::step(config.width, config.overlap);
    let step_y = SliceConfig::step(config.height, config.overlap);

    let mut y = 0;
    while y < img_height {
        let height = config.height.min(img_height - y);
        let mut x = 0;
        while x < img_width {
            let width = config.width.min(img_width - x);
            tiles.push(Tile {
                x,
                y,
                width,
                height,
            });
            x += step_x;
        }
        y += step_y;
    }
    tiles
}

struct TileJob<'a> {
    seq: usize,
    image: &'a DynamicImage,
    tile: Tile,
}

/// Run the detector over every tile of every scale pass and image variant,
/// remapping each region-local box into global coordinates.
///
/// Tiles are independent, so they are dispatched to a worker pool; results
/// are accumulated in deterministic job order only after the whole sweep
/// completes. Any detector failure aborts the call: workers stop picking up
/// jobs and the first error is surfaced to the caller.
pub fn run_sliced_detection(
    detector: &dyn SwaraDetector,
    variants: &[DynamicImage],
    scales: &[SliceConfig],
) -> Result<Vec<RawDetection>> {
    let mut jobs = Vec::new();
    for variant in variants {
        let (img_width, img_height) = (variant.width(), variant.height());
        for scale in scales {
            for tile in tile_grid(img_width, img_height, scale) {
                jobs.push(TileJob {
                    seq: jobs.len(),
                    image: variant,
                    tile,
                });
            }
        }
    }
    if jobs.is_empty() {
        return Ok(Vec::new());
    }
    debug!(
        "sliced sweep: {} tiles across {} variant(s), {} scale(s)",
        jobs.len(),
        variants.len(),
        scales.len()
    );

    let worker_count = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(jobs.len());
    let queue = Mutex::new(jobs.into_iter());
    let failed = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel();

    thread::scope(|s| {
        for _ in 0..worker_count {
            let tx = tx.clone();
            let queue = &queue;
            let failed = &failed;
            s.spawn(move || {
                loop {
                    if failed.load(Ordering::Relaxed) {
                        break;
                    }
                    let job = match queue.lock() {
                        Ok(mut iter) => iter.next(),
                        Err(_) => None,
                    };
                    let Some(job) = job else { break };

                    let result = detect_tile(detector, job.image, job.tile);
                    if result.is_err() {
                        failed.store(true, Ordering::Relaxed);
                    }
                    if tx.send((job.seq, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);
    });

    let mut batches: Vec<(usize, Result<Vec<RawDetection>>)> = rx.into_iter().collect();
    batches.sort_by_key(|(seq, _)| *seq);

    let mut raw = Vec::new();
    for (_, batch) in batches {
        raw.extend(batch?);
    }
    Ok(raw)
}

fn detect_tile(
    detector: &dyn SwaraDetector,
    image: &DynamicImage,
    tile: Tile,
) -> Result<Vec<RawDetection>> {
    let region = image.crop_imm(tile.x, tile.y, tile.width, tile.height);
    let found = detector
        .detect(&region)
        .with_context(|| format!("detector failed on tile at ({}, {})", tile.x, tile.y))?;
    Ok(found
        .into_iter()
        .map(|d| RawDetection::new(d.label, d.score, d.bbox.translate(tile.x, tile.y)))
        .collect())
}
