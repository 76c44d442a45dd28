/// Logistic function `1 / (1 + e^-x)`.
///
/// Large negative inputs underflow toward `0.0`; no clamping is applied.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed in terms of its output.
///
/// `y` must already be `sigmoid(x)`: this returns `y * (1 - y)`, which equals
/// `σ'(x)`. Passing a pre-activation value gives a wrong gradient.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1.0 - y)
}
