use log::debug;
use std::cmp::Ordering;

use crate::models::{BoundingBox, RawDetection};

/// Intersection-over-union with the exclusive pixel-area convention
/// (`area = (x2 - x1) * (y2 - y1)`). Disjoint or degenerate boxes give 0.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let ix1 = a.x1.max(b.x1) as i64;
    let iy1 = a.y1.max(b.y1) as i64;
    let ix2 = a.x2.min(b.x2) as i64;
    let iy2 = a.y2.min(b.y2) as i64;

    let inter = (ix2 - ix1).max(0) * (iy2 - iy1).max(0);
    let union = a.area() as i64 + b.area() as i64 - inter;
    if union <= 0 {
        return 0.0;
    }
    inter as f64 / union as f64
}

/// Base filter applied before conflict resolution: drops detections below
/// the confidence floor and boxes too elongated to be a swara glyph
/// (lyrics fragments, bar lines).
pub fn filter_spurious(
    detections: Vec<RawDetection>,
    confidence_floor: f32,
    max_aspect_ratio: f32,
) -> Vec<RawDetection> {
    let before = detections.len();
    let kept: Vec<RawDetection> = detections
        .into_iter()
        .filter(|d| {
            let w = d.bbox.width() as f32;
            let h = d.bbox.height() as f32;
            d.score >= confidence_floor && w <= h * max_aspect_ratio && h <= w * max_aspect_ratio
        })
        .collect();
    debug!("base filter kept {} of {} detections", kept.len(), before);
    kept
}

/// Greedy confidence-ordered suppression: the best remaining detection is
/// kept and every remaining box overlapping it by at least `iou_threshold`
/// is discarded. Equal scores resolve by insertion order, so the output is
/// deterministic for any input.
pub fn resolve_conflicts(detections: Vec<RawDetection>, iou_threshold: f64) -> Vec<RawDetection> {
    let mut indexed: Vec<(usize, RawDetection)> = detections.into_iter().enumerate().collect();
    indexed.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    let mut remaining: Vec<RawDetection> = indexed.into_iter().map(|(_, d)| d).collect();
    let mut kept = Vec::new();
    while !remaining.is_empty() {
        let best = remaining.remove(0);
        remaining.retain(|d| iou(&best.bbox, &d.bbox) < iou_threshold);
        kept.push(best);
    }
    debug!("conflict resolution kept {} detections", kept.len());
    kept
}
