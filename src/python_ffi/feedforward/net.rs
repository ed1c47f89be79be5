use pyo3::prelude::*;

use crate::feedforward::{
    DimensionError, Hyperparams, Model, ModelIoError, ModelNeuron, Network as InnerNetwork,
    Sample, ShapeError, TrainError,
};
use crate::Impl_to_PyErr;

/// `(bias, output, incoming_weights)` per neuron, per layer.
type PyModel = Vec<Vec<(f64, f64, Vec<f64>)>>;

fn model_from_py(model: PyModel) -> Model {
    Model(
        model
            .into_iter()
            .map(|layer| {
                layer
                    .into_iter()
                    .map(|(bias, output, weights)| ModelNeuron(bias, output, weights))
                    .collect()
            })
            .collect(),
    )
}

fn model_to_py(model: Model) -> PyModel {
    model
        .0
        .into_iter()
        .map(|layer| {
            layer
                .into_iter()
                .map(|ModelNeuron(bias, output, weights)| (bias, output, weights))
                .collect()
        })
        .collect()
}

#[pyclass]
pub struct Network {
    pub(super) net: InnerNetwork,
}

#[pymethods]
impl Network {
    #[new]
    pub fn new(
        layer_sizes: Vec<usize>,
        learning_rate: Option<f64>,
        momentum: Option<f64>,
    ) -> Result<Self, ShapeError> {
        let defaults = Hyperparams::default();
        let params = Hyperparams {
            learning_rate: learning_rate.unwrap_or(defaults.learning_rate),
            momentum: momentum.unwrap_or(defaults.momentum),
        };

        Ok(Self {
            net: InnerNetwork::with_config(&layer_sizes, params)?,
        })
    }

    #[staticmethod]
    pub fn from_model(model: PyModel) -> Result<Network, ShapeError> {
        Ok(Network {
            net: InnerNetwork::from_model(&model_from_py(model))?,
        })
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> Result<Network, ModelIoError> {
        Ok(Network {
            net: InnerNetwork::from_model(&Model::from_json(json)?)?,
        })
    }

    pub fn geometry(&self) -> Vec<usize> {
        self.net.geometry()
    }

    pub fn export_model(&self) -> PyModel {
        model_to_py(self.net.export_model())
    }

    pub fn to_json(&self) -> Result<String, ModelIoError> {
        self.net.export_model().to_json()
    }

    pub fn predict(&mut self, input: Vec<f64>) -> Result<Vec<f64>, DimensionError> {
        self.net.predict(&input)
    }

    pub fn train(&mut self, input: Vec<f64>, output: Vec<f64>) -> Result<(), DimensionError> {
        self.net.train(&input, &output)
    }

    pub fn train_random(
        &mut self,
        samples: Vec<(Vec<f64>, Vec<f64>)>,
        steps: usize,
    ) -> Result<f64, TrainError> {
        let samples: Vec<Sample> = samples
            .into_iter()
            .map(|(input, output)| Sample::new(input, output))
            .collect();
        self.net
            .train_random(&samples, steps, &mut rand::thread_rng())
    }
}

Impl_to_PyErr!(for ShapeError, DimensionError, ModelIoError, TrainError);
