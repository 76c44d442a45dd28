use crate::network::config::DiagnosticsConfig;

/// Countdown deciding which training calls surface their error.
///
/// The first call fires, then one call in every `frequency`.
#[derive(Debug, Clone)]
pub(crate) struct ErrorSampler {
    enabled: bool,
    frequency: usize,
    countdown: usize,
}

impl ErrorSampler {
    pub(crate) fn new(config: &DiagnosticsConfig) -> Self {
        let frequency = config.frequency.max(1);
        ErrorSampler {
            enabled: config.enabled,
            frequency,
            countdown: frequency,
        }
    }

    /// Advances the countdown; returns whether this call should be surfaced.
    pub(crate) fn tick(&mut self) -> bool {
        if !self.enabled {
            return false;
        }

        let fire = self.countdown == self.frequency;
        self.countdown -= 1;
        if self.countdown == 0 {
            self.countdown = self.frequency;
        }
        fire
    }
}
