use super::neuron::NeuronId;

/// Index of a connection in the network's connection arena.
pub type ConnectionId = usize;

/// Directed weighted edge between a neuron of layer `i` and a neuron of layer `i + 1`.
///
/// Both endpoints keep the connection's id (the source in its outgoing list,
/// the destination in its incoming list), the connection itself only keeps
/// the ids of the two neurons.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub(super) from: NeuronId,
    pub(super) to: NeuronId,
    pub(super) weight: f64,

    /// Momentum accumulator, the last applied weight change.
    pub(super) velocity: f64,
}

impl Connection {
    pub(super) fn new(from: NeuronId, to: NeuronId, weight: f64) -> Connection {
        Connection {
            from,
            to,
            weight,
            velocity: 0.0,
        }
    }

    pub fn source(&self) -> NeuronId {
        self.from
    }

    pub fn target(&self) -> NeuronId {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Gradient descent step with momentum.
    /// Implements the formula:
    /// `velocity = momentum * velocity + learning_rate * to_delta * from_output`,
    /// `weight = weight + velocity`.
    ///
    /// # Arguments
    /// * `learning_rate` - step size;
    /// * `momentum` - share of the previous step carried over;
    /// * `to_delta` - finalized delta of the destination neuron;
    /// * `from_output` - output of the source neuron for the current example.
    pub(super) fn adjust_weight(
        &mut self,
        learning_rate: f64,
        momentum: f64,
        to_delta: f64,
        from_output: f64,
    ) {
        self.velocity = momentum * self.velocity + learning_rate * to_delta * from_output;
        self.weight += self.velocity;
    }
}
