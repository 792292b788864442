/// Number of buckets allocated by a table built with default options.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor used when none is supplied.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Errors produced when validating a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The table must start with at least one bucket.
    #[error("initial capacity must be at least one bucket")]
    ZeroCapacity,
    /// The load factor must be finite and strictly positive.
    #[error("load factor must be finite and greater than zero, got {0}")]
    InvalidLoadFactor(f32),
}

/// Construction options for a chained hash table.
///
/// Both options default independently, so any combination may be supplied.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Config;
///
/// let config = Config::default().with_load_factor(0.5);
/// assert_eq!(config.initial_capacity(), 16);
/// assert_eq!(config.load_factor(), 0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    initial_capacity: usize,
    load_factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Config {
    /// Creates the default configuration: 16 buckets, load factor 0.75.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the length of the bucket array allocated up front.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the ratio of entries to buckets above which the table grows.
    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Returns the configured initial bucket count.
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Checks that the options describe a usable table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] for an empty bucket array and
    /// [`ConfigError::InvalidLoadFactor`] for a load factor that is NaN,
    /// infinite, zero or negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::new();
        assert_eq!(config.initial_capacity(), 16);
        assert_eq!(config.load_factor(), 0.75);
        assert_eq!(config, Config::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn options_default_independently() {
        let only_capacity = Config::default().with_initial_capacity(64);
        assert_eq!(only_capacity.initial_capacity(), 64);
        assert_eq!(only_capacity.load_factor(), DEFAULT_LOAD_FACTOR);

        let only_load = Config::default().with_load_factor(0.9);
        assert_eq!(only_load.initial_capacity(), DEFAULT_INITIAL_CAPACITY);
        assert_eq!(only_load.load_factor(), 0.9);
    }

    #[test]
    fn rejects_zero_capacity() {
        let config = Config::default().with_initial_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }

    #[test]
    fn rejects_bad_load_factors() {
        for bad in [0.0, -1.0, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(
                Config::default().with_load_factor(bad).validate(),
                Err(ConfigError::InvalidLoadFactor(bad))
            );
        }
        assert!(matches!(
            Config::default().with_load_factor(f32::NAN).validate(),
            Err(ConfigError::InvalidLoadFactor(lf)) if lf.is_nan()
        ));
    }

    #[test]
    fn load_factor_above_one_is_allowed() {
        assert_eq!(Config::default().with_load_factor(4.0).validate(), Ok(()));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "initial capacity must be at least one bucket"
        );
        assert_eq!(
            ConfigError::InvalidLoadFactor(-0.5).to_string(),
            "load factor must be finite and greater than zero, got -0.5"
        );
    }
}
