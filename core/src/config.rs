use serde::{Deserialize, Serialize};

use crate::*;

/// Probability in `[0, 1]` that an eligible cell becomes a mine.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Density(f64);

impl Density {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Rejects NaN and anything outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidDensity)
        }
    }

    /// Clamps into `[0, 1]`, mapping NaN to zero.
    pub fn clamped(value: f64) -> Self {
        let clamped = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        if clamped != value {
            log::warn!("Density {value} out of range, clamped to {clamped}");
        }
        Self(clamped)
    }

    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self(0.17)
    }
}

impl TryFrom<f64> for Density {
    type Error = GameError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Density> for f64 {
    fn from(density: Density) -> Self {
        density.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    /// Dense table; coordinates outside the extent stay covered forever.
    Bounded(Extent),
    Unbounded,
}

impl Default for Storage {
    fn default() -> Self {
        Self::Bounded(Extent::default())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub density: Density,
    #[serde(default)]
    pub storage: Storage,
}

impl GameConfig {
    pub const fn new(density: Density, storage: Storage) -> Self {
        Self { density, storage }
    }
}
