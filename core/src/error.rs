use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Density must be a number in [0, 1]")]
    InvalidDensity,
    #[error("Extent must contain at least one cell")]
    InvalidExtent,
    #[error("Extent has more cells than can be addressed")]
    ExtentTooLarge,
    #[error("Could not allocate cell storage for {cells} cells")]
    AllocationFailed { cells: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
