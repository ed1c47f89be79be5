use rand::{distributions::Uniform, prelude::Distribution, Rng};

use super::connection::{Connection, ConnectionId};

/// Index of a neuron in the network's neuron arena.
pub type NeuronId = usize;

/// A single sigmoid unit.
///
/// The neuron does not own its connections: `incoming` and `outgoing` hold ids
/// into the network's connection arena, in creation order (the order of the
/// neurons of the previous and of the next layer respectively).
#[derive(Debug, Clone, PartialEq)]
pub struct Neuron {
    pub(super) bias: f64,

    /// Activation cached by the last forward pass (or the input value for layer 0).
    pub(super) output: f64,
    pub(super) error: f64,

    /// `error` scaled by the sigmoid derivative at `output`.
    pub(super) delta: f64,

    pub(super) incoming: Vec<ConnectionId>,
    pub(super) outgoing: Vec<ConnectionId>,
}

impl Neuron {
    pub(super) fn new() -> Neuron {
        Neuron {
            bias: 0.0,
            output: 0.0,
            error: 0.0,
            delta: 0.0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    pub fn error(&self) -> f64 {
        self.error
    }

    pub fn delta(&self) -> f64 {
        self.delta
    }

    pub fn incoming(&self) -> &[ConnectionId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ConnectionId] {
        &self.outgoing
    }

    pub(super) fn add_incoming(&mut self, connection: ConnectionId) {
        self.incoming.push(connection);
    }

    pub(super) fn add_outgoing(&mut self, connection: ConnectionId) {
        self.outgoing.push(connection);
    }

    /// Draws the bias uniformly from `[-1, 1)`.
    pub(super) fn randomize_bias<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.bias = Uniform::from(-1.0..1.0).sample(rng);
    }

    /// Applies the gradient step of neuron `id`: moves its bias by
    /// `learning_rate * delta`, then adjusts the weight of every incoming connection.
    ///
    /// Works on the arenas rather than on `&mut self` since the incoming
    /// connections read the outputs of other neurons.
    pub(super) fn apply_update(
        id: NeuronId,
        neurons: &mut [Neuron],
        connections: &mut [Connection],
        learning_rate: f64,
        momentum: f64,
    ) {
        let delta = neurons[id].delta;
        neurons[id].bias += learning_rate * delta;

        let neurons = &*neurons;
        for &c in &neurons[id].incoming {
            let from_output = neurons[connections[c].from].output;
            connections[c].adjust_weight(learning_rate, momentum, delta, from_output);
        }
    }
}
