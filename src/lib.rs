pub mod detection;
pub mod mapping;
pub mod models;

pub use detection::AnalysisPipeline;
pub use detection::detector::{RegionDetection, SwaraDetector};
pub use detection::modifiers::ModifierConfig;
pub use detection::slicing::SliceConfig;
pub use models::{AnalysisResult, BoundingBox, Detection, Octave, RawDetection};
