use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::region_labelling::{Connectivity, connected_components};
use std::collections::HashMap;

/// Zones whose gray levels span less than this are treated as uniform:
/// no mark-versus-background structure, so no ink.
const MIN_ZONE_CONTRAST: u8 = 16;

/// Connected patch of ink pixels inside a verification zone.
#[derive(Debug, Clone, Copy)]
pub struct InkBlob {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    pub pixel_count: u32,
}

impl InkBlob {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

fn contrast_spread(zone: &GrayImage) -> u8 {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for p in zone.pixels() {
        min = min.min(p[0]);
        max = max.max(p[0]);
    }
    max.saturating_sub(min)
}

/// Fraction of zone pixels at or below the zone's Otsu threshold.
/// Zero-area and uniform zones have no ink by definition.
pub fn ink_fraction(zone: &GrayImage) -> f32 {
    let (width, height) = zone.dimensions();
    if width == 0 || height == 0 || contrast_spread(zone) < MIN_ZONE_CONTRAST {
        return 0.0;
    }
    let level = otsu_level(zone);
    let ink = zone.pixels().filter(|p| p[0] <= level).count();
    ink as f32 / (width as u64 * height as u64) as f32
}

/// Binarize a zone so ink becomes foreground (white) on a black background,
/// the orientation the component labeller expects.
fn binarize(zone: &GrayImage) -> GrayImage {
    let level = otsu_level(zone);
    let mut out = GrayImage::new(zone.width(), zone.height());
    for (x, y, p) in zone.enumerate_pixels() {
        if p[0] <= level {
            out.put_pixel(x, y, Luma([255u8]));
        }
    }
    out
}

/// Find connected ink components in a zone, dropping specks below `min_pixels`.
pub fn ink_blobs(zone: &GrayImage, min_pixels: u32) -> Vec<InkBlob> {
    let (width, height) = zone.dimensions();
    if width == 0 || height == 0 || contrast_spread(zone) < MIN_ZONE_CONTRAST {
        return Vec::new();
    }

    let binary = binarize(zone);
    let labeled = connected_components(&binary, Connectivity::Eight, Luma([0]));

    // Accumulate each label's bounding box and pixel count
    let mut regions: HashMap<u32, (u32, u32, u32, u32, u32)> = HashMap::new();
    for (x, y, label) in labeled.enumerate_pixels() {
        let label_val = label[0];
        if label_val == 0 {
            continue; // background
        }
        regions
            .entry(label_val)
            .and_modify(|(min_x, min_y, max_x, max_y, count)| {
                *min_x = (*min_x).min(x);
                *min_y = (*min_y).min(y);
                *max_x = (*max_x).max(x);
                *max_y = (*max_y).max(y);
                *count += 1;
            })
            .or_insert((x, y, x, y, 1));
    }

    regions
        .into_values()
        .map(|(min_x, min_y, max_x, max_y, pixel_count)| InkBlob {
            min_x,
            min_y,
            max_x,
            max_y,
            pixel_count,
        })
        .filter(|b| b.pixel_count >= min_pixels)
        .collect()
}
