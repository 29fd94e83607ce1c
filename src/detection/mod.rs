pub mod conflicts;
pub mod detector;
pub mod ink;
pub mod modifiers;
pub mod ordering;
pub mod preprocessing;
pub mod slicing;

use anyhow::Result;
use image::DynamicImage;

use crate::mapping;
use crate::models::{AnalysisResult, RawDetection};
use detector::SwaraDetector;
use modifiers::ModifierConfig;
use slicing::SliceConfig;

/// The post-detection pipeline: tiled sweep, conflict resolution, modifier
/// verification, spatial ordering, notation mapping.
///
/// One call per image, no state between calls. The detector is an injected
/// capability owned by the caller; only the tiled sweep touches it.
pub struct AnalysisPipeline {
    /// Scale passes for the sliced sweep.
    pub scales: Vec<SliceConfig>,
    /// Also sweep a sharpened variant of the input.
    pub sharpen_variant: bool,
    /// Minimum detector confidence kept by the base filter.
    pub confidence_floor: f32,
    /// Boxes more elongated than this in either direction are dropped.
    pub max_aspect_ratio: f32,
    /// Overlap at or above which two detections are duplicates.
    pub iou_threshold: f64,
    /// Pixel-zone modifier check settings.
    pub modifier_config: ModifierConfig,
    /// Run the pixel-zone modifier checks.
    pub verify_modifiers: bool,
    /// Line-membership threshold as a fraction of the median box height.
    pub line_grouping_factor: f32,
    pub verbose: bool,
}

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self {
            scales: vec![SliceConfig::default()],
            sharpen_variant: false,
            confidence_floor: 0.3,
            max_aspect_ratio: 3.0,
            iou_threshold: 0.4,
            modifier_config: ModifierConfig::default(),
            verify_modifiers: true,
            line_grouping_factor: 0.5,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the full pipeline on an image: sliced detector sweep, then the
    /// post-detection stages over the accumulated raw set.
    pub fn analyze(
        &self,
        image: &DynamicImage,
        detector: &dyn SwaraDetector,
    ) -> Result<AnalysisResult> {
        let mut variants = vec![image.clone()];
        if self.sharpen_variant {
            variants.push(preprocessing::sharpen_variant(image));
        }

        if self.verbose {
            println!(
                "Running sliced detection ({} variant(s), {} scale(s))...",
                variants.len(),
                self.scales.len()
            );
        }
        let raw = slicing::run_sliced_detection(detector, &variants, &self.scales)?;
        if self.verbose {
            println!("Raw detections: {}", raw.len());
        }

        Ok(self.process_detections(raw, image))
    }

    /// Run stages 2-5 over an already-collected raw set. The image is still
    /// needed for the pixel-zone modifier checks.
    pub fn process_detections(
        &self,
        raw: Vec<RawDetection>,
        image: &DynamicImage,
    ) -> AnalysisResult {
        let filtered =
            conflicts::filter_spurious(raw, self.confidence_floor, self.max_aspect_ratio);
        let resolved = conflicts::resolve_conflicts(filtered, self.iou_threshold);
        if self.verbose {
            println!("After conflict resolution: {}", resolved.len());
        }

        let verified = if self.verify_modifiers {
            modifiers::verify_modifiers(resolved, image, &self.modifier_config)
        } else {
            resolved
        };

        let ordered = ordering::reading_order(verified, self.line_grouping_factor);
        let finalized = mapping::finalize_all(ordered);
        if self.verbose {
            let recognized = finalized.iter().filter(|d| d.numeric != -1).count();
            println!(
                "Final sequence: {} symbols ({} noise)",
                recognized,
                finalized.len() - recognized
            );
        }

        AnalysisResult::from_detections(finalized)
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}
