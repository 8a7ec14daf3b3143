use crate::engine::error::MazeError;
use crate::map::search::SearchStrategy;

pub const DEFAULT_SIZE: usize = 10;
pub const DEFAULT_OPEN_PROBABILITY: f64 = 0.5;

/// Settings for building a maze.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    pub size: usize,
    /// Chance that a generated cell is open.
    pub open_probability: f64,
    /// `None` picks a random seed at startup.
    pub seed: Option<u64>,
    pub strategy: SearchStrategy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            open_probability: DEFAULT_OPEN_PROBABILITY,
            seed: None,
            strategy: SearchStrategy::default(),
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.size < 2 {
            return Err(MazeError::InvalidConfiguration(format!(
                "grid size {} is too small to hold distinct entrance and exit (need at least 2)",
                self.size
            )));
        }
        if !(0.0..=1.0).contains(&self.open_probability) {
            return Err(MazeError::InvalidConfiguration(format!(
                "open probability {} must lie within [0, 1]",
                self.open_probability
            )));
        }
        Ok(())
    }

    /// Seed to use for generation, drawing one if none was configured.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = MazeConfig::default();
        assert_eq!(cfg.size, 10);
        assert_eq!(cfg.open_probability, 0.5);
        assert_eq!(cfg.strategy, SearchStrategy::FloodFill);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_tiny_grids() {
        for size in [0, 1] {
            let cfg = MazeConfig { size, ..MazeConfig::default() };
            assert!(matches!(cfg.validate(), Err(MazeError::InvalidConfiguration(_))));
        }
        let cfg = MazeConfig { size: 2, ..MazeConfig::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_bad_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            let cfg = MazeConfig { open_probability: p, ..MazeConfig::default() };
            assert!(cfg.validate().is_err(), "{p} accepted");
        }
    }

    #[test]
    fn configured_seed_wins() {
        let cfg = MazeConfig { seed: Some(7), ..MazeConfig::default() };
        assert_eq!(cfg.resolve_seed(), 7);
    }
}
