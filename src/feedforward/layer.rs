use super::connection::Connection;
use super::neuron::{Neuron, NeuronId};

/// Ordered, fixed-size group of neurons.
///
/// Holds ids into the network's neuron arena. Wiring between layers is
/// done by the network, a fresh layer has no connections.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub(super) neurons: Box<[NeuronId]>,
}

impl Layer {
    /// Allocates `size` neurons (bias 0, output 0) at the end of `arena`.
    pub(super) fn new(size: usize, arena: &mut Vec<Neuron>) -> Layer {
        let first = arena.len();
        arena.extend((0..size).map(|_| Neuron::new()));

        Layer {
            neurons: (first..first + size).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.neurons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub(super) fn apply_update(
        &self,
        neurons: &mut [Neuron],
        connections: &mut [Connection],
        learning_rate: f64,
        momentum: f64,
    ) {
        for &id in self.neurons.iter() {
            Neuron::apply_update(id, neurons, connections, learning_rate, momentum);
        }
    }
}
