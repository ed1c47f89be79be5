//! Error types shared by the network, the model format and the trainer.

use std::{fmt, io};

use thiserror::Error;

/// Error structure for collections size mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMismatch {
    pub expected: usize,
    pub got: usize,
}

impl SizeMismatch {
    /// Returns `Err(SizeMismatch)` if `got` differs from `expected`.
    pub(crate) fn check(expected: usize, got: usize) -> Result<(), SizeMismatch> {
        if expected == got {
            Ok(())
        } else {
            Err(SizeMismatch { expected, got })
        }
    }
}

impl fmt::Display for SizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Expected {} values, but got {}!",
            self.expected, self.got
        )
    }
}

/// The network (or the model it is restored from) has an impossible topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error(
        "Network must have at least two layers (input and output), \
        but got geometry with len {0}!"
    )]
    TooFewLayers(usize),

    #[error("Layer {layer} must have at least one neuron!")]
    EmptyLayer { layer: usize },

    #[error(
        "Neuron {neuron} of layer {layer} must have {} incoming weight(s), but got {}!",
        .mismatch.expected, .mismatch.got
    )]
    IncomingWeights {
        layer: usize,
        neuron: usize,
        mismatch: SizeMismatch,
    },
}

/// A vector handed to the network does not match the size of the layer it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("Expected {} input(s), but got {}!", .0.expected, .0.got)]
    BadInputs(SizeMismatch),

    #[error("Expected {} target output(s), but got {}!", .0.expected, .0.got)]
    BadTargets(SizeMismatch),
}

/// Error structure for the training helpers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error("Expected {expected} input(s), but samples[{sample}] got {got}!")]
    WrongSampleInputsCount {
        sample: usize,
        expected: usize,
        got: usize,
    },

    #[error("Expected {expected} target output(s), but samples[{sample}] got {got}!")]
    WrongSampleTargetsCount {
        sample: usize,
        expected: usize,
        got: usize,
    },

    #[error("Cannot draw training samples from an empty selection!")]
    EmptySelection,
}

/// Failure to read, write or restore a persisted model.
#[derive(Debug, Error)]
pub enum ModelIoError {
    #[error("Model I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Model is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Model has an invalid shape: {0}")]
    Shape(#[from] ShapeError),

    #[error("Neuron {neuron} of layer {layer} holds a non-finite value, which JSON cannot represent!")]
    NonFinite { layer: usize, neuron: usize },
}

/// Failure to read hyper-parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
