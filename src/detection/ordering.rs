use std::cmp::Ordering;

use crate::models::RawDetection;

/// Median box height, the adaptive reference for line membership.
fn median_height(detections: &[RawDetection]) -> f32 {
    let mut heights: Vec<f32> = detections
        .iter()
        .map(|d| d.bbox.height() as f32)
        .collect();
    heights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = heights.len();
    if n % 2 == 1 {
        heights[n / 2]
    } else {
        (heights[n / 2 - 1] + heights[n / 2]) / 2.0
    }
}

/// Reorder detections into natural reading order: lines top-to-bottom, each
/// line left-to-right.
///
/// Detections are walked in ascending vertical-center order; a detection
/// joins the current line while its center is within
/// `line_grouping_factor x median height` of the line's most recent member.
/// Comparing against the previous member rather than a line average lets a
/// line drift vertically across a slightly rotated scan.
pub fn reading_order(detections: Vec<RawDetection>, line_grouping_factor: f32) -> Vec<RawDetection> {
    if detections.is_empty() {
        return detections;
    }

    let threshold = median_height(&detections) * line_grouping_factor;

    let mut sorted = detections;
    sorted.sort_by(|a, b| {
        a.bbox
            .center_y()
            .partial_cmp(&b.bbox.center_y())
            .unwrap_or(Ordering::Equal)
    });

    let mut rows: Vec<Vec<RawDetection>> = Vec::new();
    let mut current: Vec<RawDetection> = Vec::new();
    let mut prev_cy = 0.0f32;
    for det in sorted {
        let cy = det.bbox.center_y();
        if !current.is_empty() && (cy - prev_cy).abs() >= threshold {
            rows.push(current);
            current = Vec::new();
        }
        prev_cy = cy;
        current.push(det);
    }
    rows.push(current);

    for row in &mut rows {
        row.sort_by_key(|d| d.bbox.x1);
    }
    rows.into_iter().flatten().collect()
}
