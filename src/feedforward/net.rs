use rand::Rng;

use super::activation::{sigmoid, sigmoid_der_s};
use super::config::Hyperparams;
use super::connection::{Connection, ConnectionId};
use super::error::{DimensionError, ShapeError, SizeMismatch};
use super::layer::Layer;
use super::model::{Model, ModelNeuron};
use super::neuron::{Neuron, NeuronId};

/// Neural network structure
///
/// The graph is stored as two arenas. Every neuron of every layer lives in
/// `neurons`, every connection in `connections`; layers, neurons and
/// connections refer to each other by index:
/// `layer -> [neuron ids]`
/// `neuron -> [incoming connection ids], [outgoing connection ids]`
/// `connection -> (from neuron id, to neuron id)`
#[derive(Debug, Clone)]
pub struct Network {
    /// First is the input layer, last is the output layer.
    pub(super) layers: Box<[Layer]>,
    pub(super) neurons: Vec<Neuron>,
    pub(super) connections: Vec<Connection>,
    pub(super) params: Hyperparams,
}

impl Network {
    /// Returns network for given geometry, with default hyper-parameters.
    /// Weights are random from `[0, 1)`, biases of non-input neurons from `[-1, 1)`.
    ///
    /// # Arguments
    /// * `layer_sizes` - the number of neurons in each layer.
    ///
    /// # Returns
    /// * `Ok(Network)` if there are at least two layers and none of them is empty;
    /// * `Err(ShapeError)` otherwise.
    ///
    /// # Examples
    /// ```
    /// # use dnn::feedforward::Network;
    /// let mut net = Network::new(&[2, 5, 5, 1]).unwrap();
    /// let outputs = net.predict(&[1.0, 0.0]).unwrap();
    /// assert_eq!(outputs.len(), 1);
    ///
    /// assert!(Network::new(&[5]).is_err());
    /// ```
    pub fn new(layer_sizes: &[usize]) -> Result<Network, ShapeError> {
        Network::with_config(layer_sizes, Hyperparams::default())
    }

    pub fn with_config(layer_sizes: &[usize], params: Hyperparams) -> Result<Network, ShapeError> {
        Network::with_rng(layer_sizes, params, &mut rand::thread_rng())
    }

    /// Same as `Network::new`, drawing the initial parameters from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        layer_sizes: &[usize],
        params: Hyperparams,
        rng: &mut R,
    ) -> Result<Network, ShapeError> {
        Network::check_geometry(layer_sizes)?;

        let mut neurons = Vec::with_capacity(layer_sizes.iter().sum());
        let layers: Box<[Layer]> = layer_sizes
            .iter()
            .map(|&size| Layer::new(size, &mut neurons))
            .collect();

        // Input neurons keep a zero bias
        for layer in layers.iter().skip(1) {
            for &id in layer.neurons() {
                neurons[id].randomize_bias(rng);
            }
        }

        let mut net = Network {
            layers,
            neurons,
            connections: Vec::new(),
            params,
        };
        net.connect_layers(rng);

        log::debug!(
            "built network {:?} with {} connections (learning rate {}, momentum {})",
            layer_sizes,
            net.connections.len(),
            params.learning_rate,
            params.momentum
        );
        Ok(net)
    }

    fn check_geometry(layer_sizes: &[usize]) -> Result<(), ShapeError> {
        if layer_sizes.len() < 2 {
            return Err(ShapeError::TooFewLayers(layer_sizes.len()));
        }
        match layer_sizes.iter().position(|&size| size == 0) {
            Some(layer) => Err(ShapeError::EmptyLayer { layer }),
            None => Ok(()),
        }
    }

    /// Connects every neuron of each layer to every neuron of the next one.
    /// Outer loop over sources, inner loop over destinations, so both
    /// connection lists of a neuron follow the neuron order of the adjacent layer.
    fn connect_layers<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let total: usize = self
            .layers
            .windows(2)
            .map(|pair| pair[0].len() * pair[1].len())
            .sum();
        self.connections.reserve_exact(total);

        for pair in self.layers.windows(2) {
            for &from in pair[0].neurons() {
                for &to in pair[1].neurons() {
                    let id: ConnectionId = self.connections.len();
                    self.connections.push(Connection::new(from, to, rng.gen()));
                    self.neurons[from].add_outgoing(id);
                    self.neurons[to].add_incoming(id);
                }
            }
        }
    }

    /// Rebuilds a network from its snapshot, with default hyper-parameters.
    ///
    /// # Returns
    /// * `Ok(Network)` if the model describes a fully-connected network
    /// (see `Model::validate`);
    /// * `Err(ShapeError)` otherwise.
    pub fn from_model(model: &Model) -> Result<Network, ShapeError> {
        Network::from_model_with_config(model, Hyperparams::default())
    }

    pub fn from_model_with_config(
        model: &Model,
        params: Hyperparams,
    ) -> Result<Network, ShapeError> {
        let layer_sizes = model.validate()?;
        let mut net = Network::with_config(&layer_sizes, params)?;

        for (layer, model_layer) in net.layers.iter().zip(model.layers()) {
            for (&id, ModelNeuron(bias, output, weights)) in
                layer.neurons().iter().zip(model_layer)
            {
                let neuron = &mut net.neurons[id];
                neuron.bias = *bias;
                neuron.output = *output;
                for (&c, &weight) in neuron.incoming.iter().zip(weights) {
                    net.connections[c].weight = weight;
                }
            }
        }

        log::debug!("restored network {:?} from model", layer_sizes);
        Ok(net)
    }

    /// Snapshot of every bias, cached output and incoming weight.
    /// Velocities are not exported.
    pub fn export_model(&self) -> Model {
        Model(
            self.layers
                .iter()
                .map(|layer| {
                    layer
                        .neurons()
                        .iter()
                        .map(|&id| {
                            let neuron = &self.neurons[id];
                            ModelNeuron(
                                neuron.bias,
                                neuron.output,
                                neuron
                                    .incoming
                                    .iter()
                                    .map(|&c| self.connections[c].weight)
                                    .collect(),
                            )
                        })
                        .collect()
                })
                .collect(),
        )
    }

    /// The number of neurons in each layer.
    pub fn geometry(&self) -> Vec<usize> {
        self.layers.iter().map(Layer::len).collect()
    }

    pub fn hyperparams(&self) -> Hyperparams {
        self.params
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn neuron(&self, id: NeuronId) -> &Neuron {
        &self.neurons[id]
    }

    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id]
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    fn input_layer(&self) -> &Layer {
        &self.layers[0]
    }

    fn output_layer(&self) -> &Layer {
        &self.layers[self.layers.len() - 1]
    }

    /// Checks `input` against the input layer size.
    pub(super) fn check_inputs(&self, input: &[f64]) -> Result<(), DimensionError> {
        SizeMismatch::check(self.input_layer().len(), input.len()).map_err(DimensionError::BadInputs)
    }

    /// Checks `target` against the output layer size.
    pub(super) fn check_targets(&self, target: &[f64]) -> Result<(), DimensionError> {
        SizeMismatch::check(self.output_layer().len(), target.len())
            .map_err(DimensionError::BadTargets)
    }

    /// Assigns `input[i]` to the output of the `i`-th input neuron.
    pub fn set_input(&mut self, input: &[f64]) -> Result<(), DimensionError> {
        self.check_inputs(input)?;

        for (&id, &value) in self.layers[0].neurons().iter().zip(input) {
            self.neurons[id].output = value;
        }
        Ok(())
    }

    /// Propagates the outputs of the input layer through the network.
    /// Implements the formula:
    /// `output = sigmoid(bias + sum(weight * from.output))`
    /// for every neuron of layers `1..N`, in layer order.
    ///
    /// # Returns
    /// Outputs of the output layer.
    pub fn forward(&mut self) -> Vec<f64> {
        for layer in self.layers.iter().skip(1) {
            for &id in layer.neurons() {
                let neuron = &self.neurons[id];
                let weighted: f64 = neuron
                    .incoming
                    .iter()
                    .map(|&c| {
                        let conn = &self.connections[c];
                        conn.weight * self.neurons[conn.from].output
                    })
                    .sum();
                let net_input = neuron.bias + weighted;

                self.neurons[id].output = sigmoid(net_input);
            }
        }

        self.output_layer()
            .neurons()
            .iter()
            .map(|&id| self.neurons[id].output)
            .collect()
    }

    /// Backpropagation of `target` through the outputs of the last forward pass.
    ///
    /// Goes from the output layer down to the input layer. Output neurons take
    /// `error = target - output`, other neurons
    /// `error = sum(to.delta * weight)` over their outgoing connections, whose
    /// destinations are already finalized. Then
    /// `delta = error * output * (1 - output)`.
    pub fn backward(&mut self, target: &[f64]) -> Result<(), DimensionError> {
        self.check_targets(target)?;

        let last = self.layers.len() - 1;
        for (index, layer) in self.layers.iter().enumerate().rev() {
            for (position, &id) in layer.neurons().iter().enumerate() {
                let neuron = &self.neurons[id];
                let error = if index == last {
                    target[position] - neuron.output
                } else {
                    neuron
                        .outgoing
                        .iter()
                        .map(|&c| {
                            let conn = &self.connections[c];
                            self.neurons[conn.to].delta * conn.weight
                        })
                        .sum()
                };
                let delta = error * sigmoid_der_s(neuron.output);

                let neuron = &mut self.neurons[id];
                neuron.error = error;
                neuron.delta = delta;
            }
        }
        Ok(())
    }

    /// Moves every bias and weight along the deltas of the last backward pass.
    /// The input layer has no incoming connections and its biases stay at 0,
    /// so it is skipped.
    pub fn update(&mut self) {
        let Hyperparams {
            learning_rate,
            momentum,
        } = self.params;

        for layer in self.layers.iter().skip(1) {
            layer.apply_update(
                &mut self.neurons,
                &mut self.connections,
                learning_rate,
                momentum,
            );
        }
    }

    /// One step of online gradient descent on a single example.
    ///
    /// Both vectors are checked before anything is touched, so a rejected
    /// example leaves the network as it was.
    ///
    /// # Examples
    /// ```
    /// # use dnn::feedforward::Network;
    /// let mut net = Network::new(&[1, 3, 1]).unwrap();
    /// net.train(&[0.0], &[1.0]).unwrap();
    /// assert!(net.train(&[0.0, 1.0], &[1.0]).is_err());
    /// ```
    pub fn train(&mut self, input: &[f64], output: &[f64]) -> Result<(), DimensionError> {
        self.train_step(input, output).map(|_| ())
    }

    /// `Network::train`, returning the cost (see `Network::calc_cost`) of the
    /// outputs computed before the update.
    pub(super) fn train_step(&mut self, input: &[f64], target: &[f64]) -> Result<f64, DimensionError> {
        self.check_inputs(input)?;
        self.check_targets(target)?;

        self.set_input(input)?;
        let outputs = self.forward();
        self.backward(target)?;
        self.update();

        Ok(outputs
            .iter()
            .zip(target)
            .map(|(&o, &t)| (o - t) * (o - t))
            .sum())
    }

    /// Calculates outputs of the network for the given input.
    /// Activations stay cached in the neurons (and are part of an exported model).
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>, DimensionError> {
        self.set_input(input)?;
        Ok(self.forward())
    }
}
