use anyhow::Result;
use image::DynamicImage;

use crate::models::BoundingBox;

/// One symbol found by the detector inside a single region, with the box in
/// region-local coordinates.
#[derive(Debug, Clone)]
pub struct RegionDetection {
    pub label: String,
    pub score: f32,
    pub bbox: BoundingBox,
}

/// The trained symbol detector, injected by the caller.
///
/// The model is loaded once by the surrounding service and reused read-only;
/// implementations must be callable repeatedly and concurrently, one region
/// per call, without mutating their input.
pub trait SwaraDetector: Send + Sync {
    fn detect(&self, region: &DynamicImage) -> Result<Vec<RegionDetection>>;
}
