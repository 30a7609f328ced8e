use crate::error::{Error, Result};

/// Default cap on input length, in code units. Unbounded; a limit is opt-in.
pub const DEFAULT_MAX_INPUT_LEN: usize = usize::MAX;

/// Bits per symbol assumed for the uncompressed baseline.
pub const DEFAULT_BASELINE_BITS: usize = 8;

/// Widest baseline symbol accepted by [`HuffmanConfig::validate`].
pub const MAX_BASELINE_BITS: usize = 64;

/// Configuration options for a [`HuffmanCodec`](super::HuffmanCodec) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanConfig {
    /// Largest input accepted by `encode`, counted in UTF-16 code units.
    pub max_input_len: usize,
    /// Width of one uncompressed symbol when computing statistics.
    pub baseline_bits: usize,
}

impl HuffmanConfig {
    /// Create a new config with default values for max_input_len (no limit)
    /// and baseline_bits (8).
    pub fn new() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            baseline_bits: DEFAULT_BASELINE_BITS,
        }
    }

    /// Customize the input length limit.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Customize the baseline symbol width.
    pub fn with_baseline_bits(mut self, baseline_bits: usize) -> Self {
        self.baseline_bits = baseline_bits;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.baseline_bits == 0 {
            return Err(Error::InvalidConfig(
                "baseline_bits must be positive".to_string(),
            ));
        }
        if self.baseline_bits > MAX_BASELINE_BITS {
            return Err(Error::InvalidConfig(format!(
                "baseline_bits must be at most {}, got {}",
                MAX_BASELINE_BITS, self.baseline_bits
            )));
        }
        Ok(())
    }
}

impl Default for HuffmanConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HuffmanConfig::default();
        assert_eq!(config.max_input_len, usize::MAX);
        assert_eq!(config.baseline_bits, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = HuffmanConfig::new()
            .with_max_input_len(16)
            .with_baseline_bits(16);
        assert_eq!(config.max_input_len, 16);
        assert_eq!(config.baseline_bits, 16);
    }

    #[test]
    fn test_zero_baseline_rejected() {
        let config = HuffmanConfig::new().with_baseline_bits(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_baseline_rejected() {
        assert!(HuffmanConfig::new().with_baseline_bits(64).validate().is_ok());
        let config = HuffmanConfig::new().with_baseline_bits(usize::MAX);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
