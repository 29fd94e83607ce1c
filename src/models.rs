use serde::{Deserialize, Serialize};

/// Axis-aligned box in global image coordinates, `x1 < x2` and `y1 < y2`.
///
/// Serialized as `[x1, y1, x2, y2]` to match the wire shape consumed by the
/// surrounding service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Vertical center, used for line grouping.
    pub fn center_y(&self) -> f32 {
        (self.y1 + self.y2) as f32 / 2.0
    }

    /// Shift from tile-local into global coordinates.
    pub fn translate(&self, dx: u32, dy: u32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }
}

impl From<[u32; 4]> for BoundingBox {
    fn from(v: [u32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [u32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Octave register indicated by a dot mark adjacent to a swara symbol.
/// Absence of a mark means the middle register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Octave {
    Upper,
    Middle,
    Lower,
}

/// A detection as it flows through the geometric stages: raw from the tiled
/// sweep, then conflict-resolved, modifier-verified, and reordered. The
/// notation mapper turns it into a final [`Detection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub label: String,
    pub score: f32,
    pub bbox: BoundingBox,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, score: f32, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            score,
            bbox,
        }
    }
}

/// A finalized detection with its notation semantics resolved.
///
/// `numeric` is -1 for labels that are not musical symbols (handwriting,
/// smudges); those entries keep `octave` and the display pair empty and are
/// excluded from the ordered projections in [`AnalysisResult`].
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub label: String,
    pub english_name: Option<String>,
    pub symbol: Option<String>,
    pub score: f32,
    pub bbox: BoundingBox,
    pub numeric: i32,
    pub octave: Option<Octave>,
}

/// Final output of one analysis call: the ordered detections plus the
/// projections consumed by the surrounding service.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub detections: Vec<Detection>,
    pub ordered_labels: Vec<String>,
    pub numeric_sequence: Vec<i32>,
    pub overall_confidence: f32,
}

impl AnalysisResult {
    /// Assemble the result document from finalized detections, keeping only
    /// recognized symbols in the ordered projections.
    pub fn from_detections(detections: Vec<Detection>) -> Self {
        let ordered_labels: Vec<String> = detections
            .iter()
            .filter(|d| d.numeric != -1)
            .map(|d| d.label.clone())
            .collect();
        let numeric_sequence: Vec<i32> = detections
            .iter()
            .filter(|d| d.numeric != -1)
            .map(|d| d.numeric)
            .collect();
        let overall_confidence = if detections.is_empty() {
            0.0
        } else {
            detections.iter().map(|d| d.score).sum::<f32>() / detections.len() as f32
        };

        Self {
            detections,
            ordered_labels,
            numeric_sequence,
            overall_confidence,
        }
    }
}
