//! Static symbol table mapping detector labels to notation semantics.
//!
//! Labels arrive as a base swara name with optional parenthetical tags, e.g.
//! `"Dha"`, `"Sa(dot above)"`, `"Re1(no dot)"`. The base name is
//! case-insensitive and digit-suffix-aware: a trailing `1`/`2` selects a
//! komal/teevra variant with its own semitone value.

use crate::models::{Detection, Octave, RawDetection};

/// Tag attached when ink is found directly above a symbol (upper octave).
pub const DOT_ABOVE_TAG: &str = "(dot above)";
/// Tag attached when a compact ink mark is found below a symbol (lower octave).
pub const DOT_BELOW_TAG: &str = "(dot below)";
/// Tag attached when an elongated stroke is found below a symbol.
/// Marks the komal rendering of the glyph; it does not shift the octave.
pub const UNDERLINE_TAG: &str = "(underline)";
/// Tag some detector class lists carry for the unmarked variant.
pub const NO_DOT_TAG: &str = "(no dot)";

/// One row of the symbol table.
#[derive(Debug, Clone, Copy)]
pub struct SwaraInfo {
    pub numeric: i32,
    pub english_name: &'static str,
    pub symbol: &'static str,
}

/// Seven natural degrees plus the five altered variants, twelve values total.
static SWARA_TABLE: [(&str, SwaraInfo); 12] = [
    ("sa", SwaraInfo { numeric: 1, english_name: "Shadja", symbol: "सा" }),
    ("re", SwaraInfo { numeric: 2, english_name: "Rishabha", symbol: "रे" }),
    ("ga", SwaraInfo { numeric: 3, english_name: "Gandhara", symbol: "ग" }),
    ("ma", SwaraInfo { numeric: 4, english_name: "Madhyama", symbol: "म" }),
    ("pa", SwaraInfo { numeric: 5, english_name: "Panchama", symbol: "प" }),
    ("dha", SwaraInfo { numeric: 6, english_name: "Dhaivata", symbol: "ध" }),
    ("ni", SwaraInfo { numeric: 7, english_name: "Nishada", symbol: "नि" }),
    ("re1", SwaraInfo { numeric: 8, english_name: "Komal Rishabha", symbol: "रे\u{0331}" }),
    ("ga1", SwaraInfo { numeric: 9, english_name: "Komal Gandhara", symbol: "ग\u{0331}" }),
    ("ma2", SwaraInfo { numeric: 10, english_name: "Teevra Madhyama", symbol: "म\u{0951}" }),
    ("dha1", SwaraInfo { numeric: 11, english_name: "Komal Dhaivata", symbol: "ध\u{0331}" }),
    ("ni1", SwaraInfo { numeric: 12, english_name: "Komal Nishada", symbol: "नि\u{0331}" }),
];

/// Reduce a label to its lookup key: parenthetical tags removed, trimmed,
/// lowercased. `"Sa(dot above)"` becomes `"sa"`, `"Re1(no dot)"` -> `"re1"`.
pub fn base_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut depth = 0usize;
    for c in label.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => key.push(c),
            _ => {}
        }
    }
    key.trim().to_lowercase()
}

/// Look up a base key in the symbol table. Unknown digit suffixes fall back
/// to the natural degree (`"re3"` resolves as `"re"`); anything else is noise.
pub fn lookup(base: &str) -> Option<&'static SwaraInfo> {
    fn find(key: &str) -> Option<&'static SwaraInfo> {
        SWARA_TABLE
            .iter()
            .find(|entry| entry.0 == key)
            .map(|entry| &entry.1)
    }
    find(base).or_else(|| find(base.trim_end_matches(|c: char| c.is_ascii_digit())))
}

/// Octave implied by the label's tags. An underline alone leaves the symbol
/// in the middle register.
pub fn octave_of(label: &str) -> Octave {
    if label.contains(DOT_ABOVE_TAG) {
        Octave::Upper
    } else if label.contains(DOT_BELOW_TAG) {
        Octave::Lower
    } else {
        Octave::Middle
    }
}

/// Resolve one ordered detection into its final form. Labels missing from
/// the table are kept as noise: `numeric` -1, no octave, no display pair.
pub fn finalize(raw: RawDetection) -> Detection {
    match lookup(&base_key(&raw.label)) {
        Some(info) => Detection {
            numeric: info.numeric,
            octave: Some(octave_of(&raw.label)),
            english_name: Some(info.english_name.to_string()),
            symbol: Some(info.symbol.to_string()),
            label: raw.label,
            score: raw.score,
            bbox: raw.bbox,
        },
        None => Detection {
            numeric: -1,
            octave: None,
            english_name: None,
            symbol: None,
            label: raw.label,
            score: raw.score,
            bbox: raw.bbox,
        },
    }
}

/// Finalize a whole ordered set, preserving order.
pub fn finalize_all(ordered: Vec<RawDetection>) -> Vec<Detection> {
    ordered.into_iter().map(finalize).collect()
}
