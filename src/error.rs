use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library. Per §7, most recoverable pipeline states
/// (degenerate geometry, empty segment sets, unsplittable panels) are
/// handled as local policy and never reach this type — only configuration
/// and I/O failures do.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read page source: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to (de)serialize book data: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("page index {0} not found in book")]
    PageNotFound(usize),
}
