use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::activation::{sigmoid, sigmoid_derivative};
use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::config::{DiagnosticsConfig, NetworkConfig};
use crate::network::diagnostics::ErrorSampler;

/// Fully connected network with one sigmoid hidden layer and a sigmoid output layer.
///
/// Inputs are `1 × num_inputs` row vectors. The parameters are private and
/// only change through [`Network::train`].
#[derive(Debug, Clone)]
pub struct Network {
    num_inputs: usize,
    num_hidden: usize,
    num_outputs: usize,
    weights0: Matrix, // num_inputs × num_hidden
    bias0: Matrix,    // 1 × num_hidden
    weights1: Matrix, // num_hidden × num_outputs
    bias1: Matrix,    // 1 × num_outputs
    inputs: Option<Matrix>,
    hidden: Option<Matrix>,
    sampler: ErrorSampler,
}

/// Row vectors produced by one forward pass.
struct Activations {
    inputs: Matrix,
    hidden: Matrix,
    output: Matrix,
}

impl Network {
    /// Builds a network with weights drawn from the thread RNG and default diagnostics.
    pub fn new(num_inputs: usize, num_hidden: usize, num_outputs: usize) -> Network {
        Network::with_rng(num_inputs, num_hidden, num_outputs, &mut rand::thread_rng())
    }

    /// Builds a network drawing its initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        num_inputs: usize,
        num_hidden: usize,
        num_outputs: usize,
        rng: &mut R,
    ) -> Network {
        Network::build(
            num_inputs,
            num_hidden,
            num_outputs,
            &DiagnosticsConfig::default(),
            rng,
        )
    }

    pub fn from_config(config: &NetworkConfig) -> Result<Network> {
        config.validate()?;

        let network = match config.seed {
            Some(seed) => Network::build(
                config.num_inputs,
                config.num_hidden,
                config.num_outputs,
                &config.diagnostics,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => Network::build(
                config.num_inputs,
                config.num_hidden,
                config.num_outputs,
                &config.diagnostics,
                &mut rand::thread_rng(),
            ),
        };
        Ok(network)
    }

    fn build<R: Rng + ?Sized>(
        num_inputs: usize,
        num_hidden: usize,
        num_outputs: usize,
        diagnostics: &DiagnosticsConfig,
        rng: &mut R,
    ) -> Network {
        let mut bias0 = Matrix::zeros(1, num_hidden);
        let mut bias1 = Matrix::zeros(1, num_outputs);
        let mut weights0 = Matrix::zeros(num_inputs, num_hidden);
        let mut weights1 = Matrix::zeros(num_hidden, num_outputs);

        bias0.randomize_in_place(rng);
        bias1.randomize_in_place(rng);
        weights0.randomize_in_place(rng);
        weights1.randomize_in_place(rng);

        log::debug!(
            "initialized network {}-{}-{}",
            num_inputs,
            num_hidden,
            num_outputs
        );

        Network {
            num_inputs,
            num_hidden,
            num_outputs,
            weights0,
            bias0,
            weights1,
            bias1,
            inputs: None,
            hidden: None,
            sampler: ErrorSampler::new(diagnostics),
        }
    }

    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    pub fn num_hidden(&self) -> usize {
        self.num_hidden
    }

    pub fn num_outputs(&self) -> usize {
        self.num_outputs
    }

    pub fn weights0(&self) -> &Matrix {
        &self.weights0
    }

    pub fn bias0(&self) -> &Matrix {
        &self.bias0
    }

    pub fn weights1(&self) -> &Matrix {
        &self.weights1
    }

    pub fn bias1(&self) -> &Matrix {
        &self.bias1
    }

    /// Input of the most recent forward pass, if any.
    pub fn inputs(&self) -> Option<&Matrix> {
        self.inputs.as_ref()
    }

    /// Hidden activation of the most recent forward pass, if any.
    pub fn hidden(&self) -> Option<&Matrix> {
        self.hidden.as_ref()
    }

    fn forward(&self, input: &[f64]) -> Result<Activations> {
        let inputs = Matrix::from_vector(input);
        let hidden = inputs.dot(&self.weights0)?.add(&self.bias0)?.map(sigmoid);
        let output = hidden.dot(&self.weights1)?.add(&self.bias1)?.map(sigmoid);
        Ok(Activations {
            inputs,
            hidden,
            output,
        })
    }

    /// Forward pass; caches the input and hidden activation for a following `train`.
    ///
    /// Returns a `1 × num_outputs` row vector. On a dimension error the
    /// cached state is left as it was.
    pub fn feed_forward(&mut self, input: &[f64]) -> Result<Matrix> {
        let Activations {
            inputs,
            hidden,
            output,
        } = self.forward(input)?;
        self.inputs = Some(inputs);
        self.hidden = Some(hidden);
        Ok(output)
    }

    /// Forward pass that leaves the cached state untouched.
    pub fn predict(&self, input: &[f64]) -> Result<Matrix> {
        Ok(self.forward(input)?.output)
    }

    /// One step of gradient descent on a single sample.
    ///
    /// Returns the raw output error `target - output` computed before the
    /// update. Weights and biases are only replaced once every update has
    /// been computed, so a dimension error leaves them unchanged.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Matrix> {
        let Activations {
            inputs,
            hidden,
            output,
        } = self.forward(input)?;
        self.inputs = Some(inputs.clone());
        self.hidden = Some(hidden.clone());

        let targets = Matrix::from_vector(target);
        let output_error = targets.subtract(&output)?;

        if self.sampler.tick() {
            if let Some(first) = output_error.data().first().and_then(|row| row.first()) {
                log::info!("error = {}", first);
            }
        }

        // δ = error ⊙ σ'(a), with σ' taken on the activation itself
        let output_delta = output_error.multiply_elementwise(&output.map(sigmoid_derivative))?;

        let hidden_error = output_delta.dot(&self.weights1.transpose())?;
        let hidden_delta = hidden_error.multiply_elementwise(&hidden.map(sigmoid_derivative))?;

        let weights1 = self.weights1.add(&hidden.transpose().dot(&output_delta)?)?;
        let weights0 = self.weights0.add(&inputs.transpose().dot(&hidden_delta)?)?;
        let bias1 = self.bias1.add(&output_delta)?;
        let bias0 = self.bias0.add(&hidden_delta)?;

        self.weights1 = weights1;
        self.weights0 = weights0;
        self.bias1 = bias1;
        self.bias0 = bias0;

        Ok(output_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn seeded(num_inputs: usize, num_hidden: usize, num_outputs: usize) -> Network {
        Network::with_rng(
            num_inputs,
            num_hidden,
            num_outputs,
            &mut StdRng::seed_from_u64(42),
        )
    }

    fn params(net: &Network) -> Vec<Matrix> {
        vec![
            net.weights0().clone(),
            net.bias0().clone(),
            net.weights1().clone(),
            net.bias1().clone(),
        ]
    }

    #[test]
    fn parameter_shapes() {
        let net = seeded(3, 5, 2);

        assert_eq!(net.weights0().dim(), (3, 5));
        assert_eq!(net.bias0().dim(), (1, 5));
        assert_eq!(net.weights1().dim(), (5, 2));
        assert_eq!(net.bias1().dim(), (1, 2));
        assert!(net.inputs().is_none());
        assert!(net.hidden().is_none());

        for m in params(&net) {
            assert!(m.to_vec().iter().all(|&w| (-1.0..1.0).contains(&w)));
        }
    }

    #[test]
    fn same_seed_same_weights() {
        assert_eq!(params(&seeded(2, 3, 1)), params(&seeded(2, 3, 1)));
    }

    #[test]
    fn forward_shape_contract() {
        for (ni, nh, no) in [(1, 1, 1), (2, 2, 1), (4, 7, 3), (10, 2, 5)] {
            let mut net = seeded(ni, nh, no);
            let out = net.feed_forward(&vec![0.5; ni]).unwrap();

            assert_eq!(out.dim(), (1, no));
            assert!(out.to_vec().iter().all(|&y| y > 0.0 && y < 1.0));
            assert_eq!(net.inputs().unwrap().dim(), (1, ni));
            assert_eq!(net.hidden().unwrap().dim(), (1, nh));
        }
    }

    #[test]
    fn feed_forward_does_not_touch_parameters() {
        let mut net = seeded(2, 3, 1);
        let before = params(&net);
        net.feed_forward(&[0.3, -0.7]).unwrap();
        assert_eq!(params(&net), before);
    }

    #[test]
    fn predict_matches_feed_forward_without_caching() {
        let mut net = seeded(2, 3, 2);
        let predicted = net.predict(&[1.0, 0.0]).unwrap();
        assert!(net.inputs().is_none());

        let fed = net.feed_forward(&[1.0, 0.0]).unwrap();
        assert_eq!(predicted, fed);
    }

    #[test]
    fn results_are_not_aliased() {
        let mut net = seeded(2, 4, 2);
        let first = net.feed_forward(&[0.0, 1.0]).unwrap();
        let snapshot = first.clone();

        net.feed_forward(&[1.0, 1.0]).unwrap();
        net.train(&[1.0, 0.0], &[1.0, 0.0]).unwrap();

        assert_eq!(first, snapshot);
    }

    #[test]
    fn cached_state_is_overwritten() {
        let mut net = seeded(2, 3, 1);
        net.feed_forward(&[0.0, 1.0]).unwrap();
        net.feed_forward(&[1.0, 0.0]).unwrap();
        assert_eq!(net.inputs().unwrap().to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn wrong_input_length_is_rejected() {
        let mut net = seeded(2, 3, 1);
        let before = params(&net);

        assert!(net.feed_forward(&[1.0, 2.0, 3.0]).unwrap_err().is_dimension());
        assert!(net.inputs().is_none());

        assert!(net.train(&[1.0], &[1.0]).unwrap_err().is_dimension());
        assert_eq!(params(&net), before);
    }

    #[test]
    fn wrong_target_length_leaves_parameters_unchanged() {
        let mut net = seeded(2, 3, 1);
        let before = params(&net);

        assert!(net.train(&[1.0, 0.0], &[1.0, 0.0]).unwrap_err().is_dimension());
        assert_eq!(params(&net), before);
    }

    #[test]
    fn single_step_matches_hand_computation() {
        let mut net = seeded(1, 1, 1);
        net.weights0 = Matrix::from_vector(&[0.5]);
        net.bias0 = Matrix::from_vector(&[0.0]);
        net.weights1 = Matrix::from_vector(&[-0.25]);
        net.bias1 = Matrix::from_vector(&[0.1]);

        let x = 2.0;
        let t = 1.0;
        let h = sigmoid(0.5 * x);
        let o = sigmoid(-0.25 * h + 0.1);
        let out_delta = (t - o) * o * (1.0 - o);
        let hid_delta = out_delta * -0.25 * h * (1.0 - h);

        let error = net.train(&[x], &[t]).unwrap();

        assert_abs_diff_eq!(error[(0, 0)], t - o, epsilon = 1e-12);
        assert_abs_diff_eq!(net.weights1()[(0, 0)], -0.25 + h * out_delta, epsilon = 1e-12);
        assert_abs_diff_eq!(net.weights0()[(0, 0)], 0.5 + x * hid_delta, epsilon = 1e-12);
        assert_abs_diff_eq!(net.bias1()[(0, 0)], 0.1 + out_delta, epsilon = 1e-12);
        assert_abs_diff_eq!(net.bias0()[(0, 0)], hid_delta, epsilon = 1e-12);
    }

    #[test]
    fn repeated_training_on_one_sample_moves_toward_target() {
        let mut net = seeded(3, 4, 2);
        let input = [0.2, -0.4, 0.9];
        let target = [0.9, 0.1];

        let first = net.train(&input, &target).unwrap();
        for _ in 0..500 {
            net.train(&input, &target).unwrap();
        }
        let last = net.train(&input, &target).unwrap();

        let abs_sum = |m: &Matrix| m.to_vec().iter().map(|e| e.abs()).sum::<f64>();
        assert!(abs_sum(&last) < abs_sum(&first));
    }

    #[test]
    fn zero_frequency_config_is_rejected() {
        let config = NetworkConfig::new(2, 2, 1).with_diagnostics(DiagnosticsConfig::every(0));
        assert!(Network::from_config(&config).is_err());
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let config = NetworkConfig::new(2, 3, 1).with_seed(11);
        let a = Network::from_config(&config).unwrap();
        let b = Network::from_config(&config).unwrap();
        assert_eq!(params(&a), params(&b));
    }
}
