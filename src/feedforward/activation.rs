/// Sigmoid function.
/// Implements the formula:
/// `1 / (1 + exp(-x))`.
///
/// Total over `f64`: `f64::MAX` maps to `1.0`, negative infinity to `0.0`.
/// Large negative inputs underflow to exactly `0.0` and large positive ones
/// round to exactly `1.0`; at those points `sigmoid_der_s` is zero and the
/// neuron stops learning.
///
/// # Examples
/// ```
/// # use dnn::feedforward::sigmoid;
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert_eq!(sigmoid(f64::MAX), 1.0);
/// ```
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative function, expressed in terms of sigmoid itself.
/// Implements the formula:
/// `s * (1 - s)`.
pub fn sigmoid_der_s(s: f64) -> f64 {
    s * (1.0 - s)
}
