use thiserror::Error;

/// Rejections raised at the UI/input boundary, before anything enters the
/// pipeline. The pipeline itself is total over its inputs and never errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("coordinate out of bounds or not finite: ({x}, {y})")]
    BadCoordinate { x: f32, y: f32 },
    #[error("segment too short to draw: length {length}, minimum {min}")]
    SegmentTooShort { length: f32, min: f32 },
    #[error("invalid stroke width {width}")]
    BadWidth { width: f32 },
    #[error("invalid shape dimensions {width}x{height}")]
    BadDimensions { width: f32, height: f32 },
}
