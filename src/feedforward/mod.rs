//! Feedforward sigmoid network trained by online backpropagation with momentum

mod activation;
mod config;
mod connection;
mod error;
mod layer;
mod model;
mod net;
mod neuron;
mod trainer;

pub use activation::*;
pub use config::*;
pub use connection::*;
pub use error::*;
pub use layer::*;
pub use model::*;
pub use net::*;
pub use neuron::*;
pub use trainer::*;
