//! Error kinds surfaced by map generators.
//!
//! Configuration problems are reported before any grid is allocated, so a
//! failed call never leaves a partially built map behind.

use thiserror::Error;

use crate::types::AlgorithmType;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigurationError {
    #[error(
        "{algorithm} needs at least a {min_width}x{min_height} map, got {width}x{height}"
    )]
    MapTooSmall {
        algorithm: AlgorithmType,
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("{name} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("min_rooms ({min}) exceeds max_rooms ({max})")]
    RoomCountRange { min: usize, max: usize },
    #[error("min_room_size ({min}) exceeds max_room_size ({max})")]
    RoomSizeRange { min: usize, max: usize },
    #[error("{name} must be at least {minimum}, got {value}")]
    BelowMinimum { name: &'static str, value: usize, minimum: usize },
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid generator configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The generator ran to completion but left no room to hand out.
    #[error("{algorithm} produced no rooms for a {width}x{height} map with seed {seed}")]
    EmptyGeneration { algorithm: AlgorithmType, width: usize, height: usize, seed: u64 },
}

/// Rejects probabilities that are NaN or fall outside `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::ProbabilityOutOfRange { name, value })
    }
}

pub(crate) fn check_minimum(
    name: &'static str,
    value: usize,
    minimum: usize,
) -> Result<(), ConfigurationError> {
    if value < minimum {
        return Err(ConfigurationError::BelowMinimum { name, value, minimum });
    }
    Ok(())
}

pub(crate) fn check_map_size(
    algorithm: AlgorithmType,
    width: usize,
    height: usize,
    min_width: usize,
    min_height: usize,
) -> Result<(), ConfigurationError> {
    if width < min_width || height < min_height {
        return Err(ConfigurationError::MapTooSmall {
            algorithm,
            width,
            height,
            min_width,
            min_height,
        });
    }
    Ok(())
}
