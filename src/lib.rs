//! Educational feedforward neural network engine.
//!
//! Layers of sigmoid neurons, fully connected to the adjacent layers, trained one
//! example at a time by backpropagation and gradient descent with momentum.
//! A trained network can be exported as a position-only [`feedforward::Model`]
//! and rebuilt from it without retraining.
//!
//! ```
//! use dnn::feedforward::Network;
//!
//! let mut net = Network::new(&[2, 5, 5, 1]).unwrap();
//! net.train(&[1.0, 1.0], &[1.0]).unwrap();
//!
//! let model = net.export_model();
//! let mut restored = Network::from_model(&model).unwrap();
//! assert_eq!(net.predict(&[1.0, 1.0]), restored.predict(&[1.0, 1.0]));
//! ```

pub mod datasets;
pub mod feedforward;

#[cfg(feature = "python")]
pub mod python_ffi;
