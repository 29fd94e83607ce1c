mod common;

use common::*;
use swarascan::detection::ordering::reading_order;

#[test]
fn two_bands_emit_top_line_first_sorted_left_to_right() {
    // Two clear horizontal bands: centers near 50 and near 200, height 30
    let input = vec![
        det("b2", 0.9, 80, 185, 110, 215),
        det("a3", 0.9, 200, 35, 230, 65),
        det("b1", 0.9, 10, 185, 40, 215),
        det("a1", 0.9, 50, 35, 80, 65),
        det("a2", 0.9, 120, 35, 150, 65),
    ];
    let ordered = reading_order(input, 0.5);
    let labels: Vec<&str> = ordered.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["a1", "a2", "a3", "b1", "b2"]);
}

#[test]
fn order_is_independent_of_input_order() {
    let make = || {
        vec![
            det("a1", 0.9, 50, 35, 80, 65),
            det("a2", 0.9, 120, 35, 150, 65),
            det("b1", 0.9, 10, 185, 40, 215),
        ]
    };
    let mut reversed = make();
    reversed.reverse();

    let forward: Vec<String> = reading_order(make(), 0.5)
        .into_iter()
        .map(|d| d.label)
        .collect();
    let backward: Vec<String> = reading_order(reversed, 0.5)
        .into_iter()
        .map(|d| d.label)
        .collect();
    assert_eq!(forward, backward);
}

#[test]
fn single_detection_is_its_own_line() {
    let ordered = reading_order(vec![det("Sa", 0.9, 5, 5, 30, 30)], 0.5);
    assert_eq!(ordered.len(), 1);
    assert_eq!(ordered[0].label, "Sa");
}

#[test]
fn skewed_line_chains_through_gradual_drift() {
    // Centers drift 12px per symbol; each step is under the threshold
    // (median height 30 * 0.5 = 15) even though the total drift is not.
    let input = vec![
        det("s4", 0.9, 160, 121, 190, 151),
        det("s1", 0.9, 10, 85, 40, 115),
        det("s3", 0.9, 110, 109, 140, 139),
        det("s2", 0.9, 60, 97, 90, 127),
    ];
    let ordered = reading_order(input, 0.5);
    let labels: Vec<&str> = ordered.iter().map(|d| d.label.as_str()).collect();
    assert_eq!(labels, vec!["s1", "s2", "s3", "s4"]);
}

#[test]
fn empty_set_passes_through() {
    assert!(reading_order(Vec::new(), 0.5).is_empty());
}
