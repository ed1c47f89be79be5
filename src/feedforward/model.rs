//! Parameter snapshot of a network.
//!
//! The persisted form carries no field names, only positions:
//! `model = [layer_0][layer_1] ... [layer_N]`
//! `layer = [neuron_1][neuron_2] ... [neuron_N]`
//! `neuron = [bias, output, [weights]]`
//! where `weights[k]` belongs to the connection coming from the `k`-th neuron
//! of the previous layer. Momentum state is never part of a model.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::error::{ModelIoError, ShapeError, SizeMismatch};

/// One neuron of a model: `(bias, output, incoming_weights)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelNeuron(pub f64, pub f64, pub Vec<f64>);

impl ModelNeuron {
    pub fn bias(&self) -> f64 {
        self.0
    }

    pub fn output(&self) -> f64 {
        self.1
    }

    pub fn weights(&self) -> &[f64] {
        &self.2
    }
}

pub type ModelLayer = Vec<ModelNeuron>;

/// Layer-ordered snapshot of biases, cached outputs and incoming weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(pub Vec<ModelLayer>);

impl Model {
    pub fn layers(&self) -> &[ModelLayer] {
        &self.0
    }

    /// Neuron count of every layer.
    pub fn layer_sizes(&self) -> Vec<usize> {
        self.0.iter().map(|layer| layer.len()).collect()
    }

    /// Checks that the model describes a fully-connected network.
    ///
    /// # Returns
    /// * `Ok(layer_sizes)` if there are at least two non-empty layers and every
    /// neuron has exactly one weight per neuron of the previous layer
    /// (none for the input layer);
    /// * `Err(ShapeError)` otherwise.
    pub fn validate(&self) -> Result<Vec<usize>, ShapeError> {
        let sizes = self.layer_sizes();
        if sizes.len() < 2 {
            return Err(ShapeError::TooFewLayers(sizes.len()));
        }
        if let Some(layer) = sizes.iter().position(|&size| size == 0) {
            return Err(ShapeError::EmptyLayer { layer });
        }

        let mut prev_size = 0;
        for (layer, neurons) in self.0.iter().enumerate() {
            for (neuron, ModelNeuron(_, _, weights)) in neurons.iter().enumerate() {
                SizeMismatch::check(prev_size, weights.len()).map_err(|mismatch| {
                    ShapeError::IncomingWeights {
                        layer,
                        neuron,
                        mismatch,
                    }
                })?;
            }
            prev_size = neurons.len();
        }

        Ok(sizes)
    }

    /// Number of biases and weights of non-input neurons.
    pub fn parameter_count(&self) -> usize {
        self.0
            .iter()
            .skip(1)
            .flatten()
            .map(|neuron| neuron.2.len() + 1)
            .sum()
    }

    /// Same biases and weights, every cached output set to 0.
    pub fn with_outputs_reset(&self) -> Model {
        Model(
            self.0
                .iter()
                .map(|layer| {
                    layer
                        .iter()
                        .map(|ModelNeuron(bias, _, weights)| {
                            ModelNeuron(*bias, 0.0, weights.clone())
                        })
                        .collect()
                })
                .collect(),
        )
    }

    /// Same shape with every bias, output and weight set to 0.
    pub fn blank(&self) -> Model {
        Model(
            self.0
                .iter()
                .map(|layer| {
                    layer
                        .iter()
                        .map(|neuron| ModelNeuron(0.0, 0.0, vec![0.0; neuron.2.len()]))
                        .collect()
                })
                .collect(),
        )
    }

    /// Finds the first neuron whose bias, output or weights are NaN or infinite.
    pub fn check_finite(&self) -> Result<(), ModelIoError> {
        for (layer, neurons) in self.0.iter().enumerate() {
            for (neuron, ModelNeuron(bias, output, weights)) in neurons.iter().enumerate() {
                let finite = bias.is_finite()
                    && output.is_finite()
                    && weights.iter().all(|weight| weight.is_finite());
                if !finite {
                    return Err(ModelIoError::NonFinite { layer, neuron });
                }
            }
        }
        Ok(())
    }

    /// Serializes the model, refusing values JSON would turn into `null`.
    pub fn to_json(&self) -> Result<String, ModelIoError> {
        self.check_finite()?;
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a model and checks its shape.
    ///
    /// ```
    /// # use dnn::feedforward::Model;
    /// let model = Model::from_json("[[[0, 1, []]], [[0.5, 0.7, [2.0]]]]").unwrap();
    /// assert_eq!(model.layer_sizes(), vec![1, 1]);
    ///
    /// assert!(Model::from_json("[[[0, 1, []]], [[0.5, 0.7, []]]]").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Model, ModelIoError> {
        let model: Model = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelIoError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Model, ModelIoError> {
        Model::from_json(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_gate_like() -> Model {
        Model(vec![
            vec![ModelNeuron(0.0, 1.0, vec![]), ModelNeuron(0.0, 1.0, vec![])],
            vec![ModelNeuron(-3.0, 0.9, vec![2.0, 2.5])],
        ])
    }

    #[test]
    fn serializes_as_bare_arrays() {
        let json = and_gate_like().to_json().unwrap();
        assert_eq!(json, "[[[0.0,1.0,[]],[0.0,1.0,[]]],[[-3.0,0.9,[2.0,2.5]]]]");
        assert_eq!(Model::from_json(&json).unwrap(), and_gate_like());
    }

    #[test]
    fn validate_reports_the_offending_neuron() {
        let mut model = and_gate_like();
        model.0[1][0].2.pop();
        assert_eq!(
            model.validate(),
            Err(ShapeError::IncomingWeights {
                layer: 1,
                neuron: 0,
                mismatch: SizeMismatch {
                    expected: 2,
                    got: 1
                },
            })
        );

        let mut model = and_gate_like();
        model.0[0][1].2.push(1.0);
        assert!(matches!(
            model.validate(),
            Err(ShapeError::IncomingWeights { layer: 0, neuron: 1, .. })
        ));
    }

    #[test]
    fn validate_rejects_degenerate_shapes() {
        assert_eq!(Model(vec![]).validate(), Err(ShapeError::TooFewLayers(0)));
        assert_eq!(
            Model(vec![vec![ModelNeuron(0.0, 0.0, vec![])]]).validate(),
            Err(ShapeError::TooFewLayers(1))
        );
        assert_eq!(
            Model(vec![vec![ModelNeuron(0.0, 0.0, vec![])], vec![]]).validate(),
            Err(ShapeError::EmptyLayer { layer: 1 })
        );
    }

    #[test]
    fn reset_and_blank_keep_shape() {
        let model = and_gate_like();
        let reset = model.with_outputs_reset();
        assert_eq!(reset.0[1][0], ModelNeuron(-3.0, 0.0, vec![2.0, 2.5]));
        assert_eq!(reset.layer_sizes(), model.layer_sizes());

        let blank = model.blank();
        assert_eq!(blank.0[1][0], ModelNeuron(0.0, 0.0, vec![0.0, 0.0]));
        assert_eq!(blank.validate(), Ok(vec![2, 1]));
        assert_eq!(model.parameter_count(), 3);
    }

    #[test]
    fn non_finite_values_are_not_serialized() {
        let mut model = and_gate_like();
        model.0[1][0].2[1] = f64::NAN;
        assert!(matches!(
            model.to_json(),
            Err(ModelIoError::NonFinite { layer: 1, neuron: 0 })
        ));

        let mut model = and_gate_like();
        model.0[0][1].1 = f64::NEG_INFINITY;
        assert!(matches!(
            model.check_finite(),
            Err(ModelIoError::NonFinite { layer: 0, neuron: 1 })
        ));
    }

    #[test]
    fn garbage_is_a_json_error() {
        assert!(matches!(
            Model::from_json("{\"layers\": 3}"),
            Err(ModelIoError::Json(_))
        ));
    }
}
