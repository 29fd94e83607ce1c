use image::{DynamicImage, GrayImage};
use image::imageops;
use log::debug;

use super::ink;
use super::preprocessing;
use crate::mapping::{DOT_ABOVE_TAG, DOT_BELOW_TAG, NO_DOT_TAG, UNDERLINE_TAG};
use crate::models::{BoundingBox, RawDetection};

/// Tunables for the pixel-zone modifier checks.
#[derive(Debug, Clone)]
pub struct ModifierConfig {
    /// Height in pixels of the strips inspected above and below a box.
    pub zone_pad: u32,
    /// Minimum foreground fraction for a zone to count as inked.
    pub ink_ratio: f32,
    /// Width/height ratio above which a below-zone blob reads as an underline
    /// stroke rather than a dot.
    pub underline_aspect: f32,
    /// Confidence assigned once a modifier is corroborated by pixel evidence.
    pub verified_score: f32,
    /// Ink patches smaller than this are ignored when classifying the below
    /// zone.
    pub min_blob_pixels: u32,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        Self {
            zone_pad: 20,
            ink_ratio: 0.05,
            underline_aspect: 2.5,
            verified_score: 0.95,
            min_blob_pixels: 4,
        }
    }
}

/// Check each detection's surrounding pixel zones for the small octave and
/// komal marks the base detector is unreliable at, extending labels and
/// raising scores where ink corroborates a mark.
///
/// A detection is checked above only while its label carries no "above" tag,
/// and below only while it carries neither a "below" nor an underline tag;
/// each side attaches at most one tag.
pub fn verify_modifiers(
    detections: Vec<RawDetection>,
    image: &DynamicImage,
    config: &ModifierConfig,
) -> Vec<RawDetection> {
    let gray = preprocessing::to_grayscale(image);
    detections
        .into_iter()
        .map(|d| verify_one(d, &gray, config))
        .collect()
}

fn verify_one(det: RawDetection, gray: &GrayImage, config: &ModifierConfig) -> RawDetection {
    let mut label = det.label;
    let mut attached = false;

    if !label.contains(DOT_ABOVE_TAG) {
        if let Some(zone) = zone_above(gray, &det.bbox, config.zone_pad) {
            if ink::ink_fraction(&zone) > config.ink_ratio {
                attach_tag(&mut label, DOT_ABOVE_TAG);
                attached = true;
            }
        }
    }

    if !label.contains(DOT_BELOW_TAG) && !label.contains(UNDERLINE_TAG) {
        if let Some(zone) = zone_below(gray, &det.bbox, config.zone_pad) {
            if ink::ink_fraction(&zone) > config.ink_ratio {
                let tag = if has_underline_stroke(&zone, config) {
                    UNDERLINE_TAG
                } else {
                    DOT_BELOW_TAG
                };
                attach_tag(&mut label, tag);
                attached = true;
            }
        }
    }

    let score = if attached {
        debug!("modifier verified for '{}', score raised", label);
        det.score.max(config.verified_score)
    } else {
        det.score
    };
    RawDetection::new(label, score, det.bbox)
}

/// Strip spanning the box's x-range directly above it, clipped to the image.
fn zone_above(gray: &GrayImage, bbox: &BoundingBox, pad: u32) -> Option<GrayImage> {
    let y0 = bbox.y1.saturating_sub(pad);
    crop_zone(gray, bbox, y0, bbox.y1)
}

/// Strip spanning the box's x-range directly below it, clipped to the image.
fn zone_below(gray: &GrayImage, bbox: &BoundingBox, pad: u32) -> Option<GrayImage> {
    let y0 = (bbox.y2 + 1).min(gray.height());
    let y1 = (bbox.y2 + 1 + pad).min(gray.height());
    crop_zone(gray, bbox, y0, y1)
}

fn crop_zone(gray: &GrayImage, bbox: &BoundingBox, y0: u32, y1: u32) -> Option<GrayImage> {
    let x0 = bbox.x1.min(gray.width());
    let x1 = bbox.x2.min(gray.width());
    if y0 >= y1 || x0 >= x1 {
        return None;
    }
    Some(imageops::crop_imm(gray, x0, y0, x1 - x0, y1 - y0).to_image())
}

fn has_underline_stroke(zone: &GrayImage, config: &ModifierConfig) -> bool {
    ink::ink_blobs(zone, config.min_blob_pixels)
        .iter()
        .any(|b| b.width() as f32 > b.height() as f32 * config.underline_aspect)
}

fn attach_tag(label: &mut String, tag: &str) {
    // A detector-provided "(no dot)" class tag is superseded by real evidence
    if let Some(pos) = label.find(NO_DOT_TAG) {
        label.replace_range(pos..pos + NO_DOT_TAG.len(), "");
    }
    label.push_str(tag);
}
