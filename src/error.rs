//! Error types for terrain synthesis and mesh building.

#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    #[error("invalid grid size {width}x{height}: each axis needs at least 2 points")]
    InvalidGridSize { width: usize, height: usize },

    #[error("grid {width}x{height} has more vertices than a u32 index buffer can address")]
    GridTooLarge { width: usize, height: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
