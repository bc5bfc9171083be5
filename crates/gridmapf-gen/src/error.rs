use thiserror::Error;

/// Errors raised while configuring or generating a scenario.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: i32, cols: i32 },
    #[error("obstacle probability must be within [0, 1], got {0}")]
    InvalidObstacleProbability(f64),
    #[error("grid has no traversable cells")]
    NoTraversableCells,
    #[error("cannot place {requested} distinct points on {available} traversable cells")]
    NotEnoughCells { requested: usize, available: usize },
    #[error("unknown setting \"{0}\"")]
    UnknownSetting(String),
    #[error("invalid value \"{value}\" for {key}")]
    InvalidValue { key: String, value: String },
}
