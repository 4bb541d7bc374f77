//! Error types for image I/O and pipeline construction/realization.

use std::{io, path::PathBuf};

/// Failures loading or saving images.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("failed to open image {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to create output image {path}: {source}")]
    Create { path: PathBuf, source: io::Error },
    #[error("failed to read image: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("failed to write png image: {0}")]
    EncodePng(#[from] png::EncodingError),
    #[error("failed to write gif image: {0}")]
    EncodeGif(#[from] gif::EncodingError),
    #[error("unsupported image format for {0}")]
    UnsupportedFormat(PathBuf),
    #[error("unsupported channel count {0}")]
    UnsupportedChannels(usize),
    #[error("image of size {width}x{height} is too large for this format")]
    TooLarge { width: usize, height: usize },
}

/// Failures building or realizing a pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid domain {width}x{height}x{channels}: every extent must be non-zero")]
    InvalidDomain { width: usize, height: usize, channels: usize },
    #[error("stage `{name}` is not defined before use in pipeline `{pipeline}`")]
    UnknownStage { pipeline: String, name: String },
    #[error("no value bound for param `{0}`")]
    MissingParam(String),
    #[error("invalid definition of `{name}`: {reason}")]
    InvalidDefinition { name: String, reason: String },
    #[error("invalid recurrence `{name}`: {reason}")]
    InvalidRecurrence { name: String, reason: String },
}

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}
