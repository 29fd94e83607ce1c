mod common;

use common::*;
use swarascan::Octave;
use swarascan::detection::modifiers::{ModifierConfig, verify_modifiers};
use swarascan::mapping;

#[test]
fn ink_above_attaches_dot_and_raises_score() {
    let mut page = blank_page(200, 200);
    // 10x10 dot centered in the 40x20 strip above the box
    draw_ink(&mut page, 65, 45, 75, 55);

    let input = vec![det("Sa", 0.5, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Sa(dot above)");
    assert_eq!(verified[0].score, 0.95);

    // Round-trip through the mapper: upper-octave Shadja
    let final_det = mapping::finalize(verified.into_iter().next().unwrap());
    assert_eq!(final_det.numeric, 1);
    assert_eq!(final_det.octave, Some(Octave::Upper));
}

#[test]
fn compact_ink_below_reads_as_dot() {
    let mut page = blank_page(200, 200);
    draw_ink(&mut page, 65, 105, 75, 115);

    let input = vec![det("Pa", 0.6, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Pa(dot below)");
    assert_eq!(verified[0].score, 0.95);

    let final_det = mapping::finalize(verified.into_iter().next().unwrap());
    assert_eq!(final_det.numeric, 5);
    assert_eq!(final_det.octave, Some(Octave::Lower));
}

#[test]
fn elongated_stroke_below_reads_as_underline() {
    let mut page = blank_page(200, 200);
    // 36x4 stroke: much wider than tall
    draw_ink(&mut page, 52, 106, 88, 110);

    let input = vec![det("Ga", 0.7, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Ga(underline)");
    assert_eq!(verified[0].score, 0.95);

    // An underline marks the glyph variant but leaves the octave alone
    let final_det = mapping::finalize(verified.into_iter().next().unwrap());
    assert_eq!(final_det.octave, Some(Octave::Middle));
}

#[test]
fn clean_zones_leave_the_detection_untouched() {
    let page = blank_page(200, 200);
    let input = vec![det("Sa", 0.42, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Sa");
    assert_eq!(verified[0].score, 0.42);
}

#[test]
fn tagged_side_is_not_reverified() {
    let mut page = blank_page(200, 200);
    draw_ink(&mut page, 65, 45, 75, 55);

    let input = vec![det("Sa(dot above)", 0.4, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    // No duplicate tag, and no score change without a new attachment
    assert_eq!(verified[0].label, "Sa(dot above)");
    assert_eq!(verified[0].score, 0.4);
}

#[test]
fn detector_no_dot_tag_is_superseded_by_evidence() {
    let mut page = blank_page(200, 200);
    draw_ink(&mut page, 65, 45, 75, 55);

    let input = vec![det("Sa(no dot)", 0.5, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Sa(dot above)");
}

#[test]
fn zones_clip_at_image_edges() {
    let page = blank_page(100, 100);
    // Boxes flush against the top and bottom edges: the clipped (or empty)
    // zones must be handled without attaching anything.
    let input = vec![
        det("Sa", 0.5, 10, 0, 50, 40),
        det("Re", 0.5, 10, 60, 50, 100),
    ];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Sa");
    assert_eq!(verified[1].label, "Re");
}

#[test]
fn both_sides_can_attach_on_one_detection() {
    let mut page = blank_page(200, 200);
    draw_ink(&mut page, 65, 45, 75, 55); // dot above
    draw_ink(&mut page, 65, 105, 75, 115); // dot below

    let input = vec![det("Ni", 0.5, 50, 60, 90, 100)];
    let verified = verify_modifiers(input, &page, &ModifierConfig::default());

    assert_eq!(verified[0].label, "Ni(dot above)(dot below)");
    // Dot above wins the octave lookup; this mirrors the mapper's precedence
    let final_det = mapping::finalize(verified.into_iter().next().unwrap());
    assert_eq!(final_det.octave, Some(Octave::Upper));
}
