//! Construction parameters for the skip list.

use crate::error::SkipListError;

/// Default highest level index. 10 gives 11 levels, plenty for a few
/// million entries.
pub const DEFAULT_MAX_LEVEL: usize = 10;

/// Largest accepted `max_level`. Link indices are `u32`, so more levels than
/// this never pay off.
pub const MAX_LEVEL_LIMIT: usize = 32;

/// Skip list configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Highest level index a node may reach. The list has `max_level + 1`
    /// levels.
    pub max_level: usize,
    /// Seed for level generation. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Config {
    pub fn new() -> Config {
        return Config::default();
    }

    pub fn max_level(mut self, max_level: usize) -> Config {
        self.max_level = max_level;
        return self;
    }

    pub fn seed(mut self, seed: u64) -> Config {
        self.seed = Some(seed);
        return self;
    }

    /// Check the configuration before a list is built from it.
    pub fn validate(&self) -> Result<(), SkipListError> {
        if self.max_level > MAX_LEVEL_LIMIT {
            return Err(SkipListError::InvalidMaxLevel {
                requested: self.max_level,
                limit: MAX_LEVEL_LIMIT,
            });
        }
        return Ok(());
    }

    /// Number of levels, head included.
    pub fn levels(&self) -> usize {
        return self.max_level + 1;
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_eleven_levels() {
        let config = Config::default();
        assert_eq!(config.max_level, 10);
        assert_eq!(config.levels(), 11);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_too_many_levels() {
        let config = Config::new().max_level(MAX_LEVEL_LIMIT + 1);
        assert_eq!(
            config.validate(),
            Err(SkipListError::InvalidMaxLevel {
                requested: MAX_LEVEL_LIMIT + 1,
                limit: MAX_LEVEL_LIMIT,
            })
        );
    }

    #[test]
    fn zero_max_level_is_a_linked_list() {
        let config = Config::new().max_level(0).seed(7);
        assert!(config.validate().is_ok());
        assert_eq!(config.levels(), 1);
        assert_eq!(config.seed, Some(7));
    }
}
