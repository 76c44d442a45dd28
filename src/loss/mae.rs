pub struct MaeLoss;

impl MaeLoss {
    /// Scalar MAE: mean(|predicted - expected|)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(p, y)| (p - y).abs())
            .sum::<f64>() / n
    }

    /// Mean absolute value of an already computed error vector (`target - output`).
    pub fn from_error(error: &[f64]) -> f64 {
        if error.is_empty() {
            return 0.0;
        }
        error.iter().map(|e| e.abs()).sum::<f64>() / error.len() as f64
    }
}
