use crate::{
    error::{Error, Result},
    loss::mae::MaeLoss,
    math::matrix::Matrix,
    network::network::Network,
};

/// Runs `Network::train` once per sample, in order, and returns the mean
/// absolute output error seen during the pass.
///
/// Each sample updates the weights immediately; nothing is accumulated
/// across samples. Stops at the first failing sample.
pub fn train_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_lengths(inputs, targets)?;
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let error = network.train(input, target)?;
        total += MaeLoss::from_error(&error.to_vec());
    }

    Ok(total / inputs.len() as f64)
}

/// Mean absolute error over a dataset using forward passes only.
pub fn mean_absolute_error(
    network: &Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> Result<f64> {
    check_lengths(inputs, targets)?;
    if inputs.is_empty() {
        return Ok(0.0);
    }

    let mut total = 0.0;
    for (input, target) in inputs.iter().zip(targets.iter()) {
        let output = network.predict(input)?;
        let error = output.subtract(&Matrix::from_vector(target))?;
        total += MaeLoss::from_error(&error.to_vec());
    }

    Ok(total / inputs.len() as f64)
}

fn check_lengths(inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if inputs.len() != targets.len() {
        return Err(Error::SampleCount {
            inputs: inputs.len(),
            targets: targets.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn or_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]],
        )
    }

    #[test]
    fn mismatched_sample_counts() {
        let mut net = Network::with_rng(2, 2, 1, &mut StdRng::seed_from_u64(1));
        let (inputs, targets) = or_data();

        let err = train_epoch(&mut net, &inputs, &targets[..3]).unwrap_err();
        assert!(matches!(err, Error::SampleCount { inputs: 4, targets: 3 }));
        assert!(mean_absolute_error(&net, &inputs[..1], &targets).is_err());
    }

    #[test]
    fn empty_dataset() {
        let mut net = Network::with_rng(2, 2, 1, &mut StdRng::seed_from_u64(1));
        assert_eq!(train_epoch(&mut net, &[], &[]).unwrap(), 0.0);
        assert_eq!(mean_absolute_error(&net, &[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn learns_or() {
        let mut net = Network::with_rng(2, 2, 1, &mut StdRng::seed_from_u64(3));
        let (inputs, targets) = or_data();

        let before = mean_absolute_error(&net, &inputs, &targets).unwrap();
        for _ in 0..5_000 {
            train_epoch(&mut net, &inputs, &targets).unwrap();
        }
        let after = mean_absolute_error(&net, &inputs, &targets).unwrap();

        assert!(after < before);
        assert!(after < 0.1, "final MAE {after}");
    }
}
