use bon::Builder;
use serde::Deserialize;

use crate::{
    cache::PolicyChoice,
    errors::{MemError, MemResult},
};

pub const DEFAULT_CACHE_LATENCY: f64 = 0.5;
pub const DEFAULT_MEMORY_LATENCY: f64 = 30.0;
pub const DEFAULT_LINE_COUNT: usize = 4;
pub const DEFAULT_SET_COUNT: usize = 1;
pub const DEFAULT_MEMORY_SIZE: usize = 16;

/// Configuration struct describing the shape and timing of a two level
/// hierarchy. Unset builder fields and fields missing from a JSON file take
/// the defaults above.
#[derive(Debug, Clone, PartialEq, Builder, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HierarchyConfig {
    /// latency charged for every cache access
    #[builder(default = DEFAULT_CACHE_LATENCY)]
    pub cache_latency: f64,
    /// latency charged for every backing store access
    #[builder(default = DEFAULT_MEMORY_LATENCY)]
    pub memory_latency: f64,
    /// total number of cache lines
    #[builder(default = DEFAULT_LINE_COUNT)]
    pub line_count: usize,
    /// number of sets the lines are partitioned into
    #[builder(default = DEFAULT_SET_COUNT)]
    pub set_count: usize,
    /// number of words in the backing store
    #[builder(default = DEFAULT_MEMORY_SIZE)]
    pub memory_size: usize,
    /// which replacement policy the cache uses
    #[builder(default)]
    pub policy: PolicyChoice,
    /// seed for the random policy. Ignored by FIFO
    pub seed: Option<u64>,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HierarchyConfig {
    /// Reads a configuration from a JSON object. Missing fields keep their
    /// default value, unknown fields are rejected.
    pub fn from_json<R: std::io::Read>(reader: R) -> MemResult<Self> {
        serde_json::from_reader(reader).map_err(|e| {
            MemError::invalid_config(format!("malformed config file: {e}"))
        })
    }

    /// Number of lines in each set
    pub fn lines_per_set(&self) -> usize {
        self.line_count / self.set_count
    }

    /// Checks every value the hierarchy depends on. Called by the layer
    /// constructors so nothing is built from a bad configuration.
    pub fn validate(&self) -> MemResult<()> {
        check_latency("cache latency", self.cache_latency)?;
        check_latency("memory latency", self.memory_latency)?;

        if self.memory_size == 0 {
            return Err(MemError::invalid_config(
                "memory size must be greater than zero",
            ));
        }
        if self.line_count == 0 {
            return Err(MemError::invalid_config(
                "the cache must have at least one line",
            ));
        }
        if self.set_count == 0 || self.line_count % self.set_count != 0 {
            return Err(MemError::invalid_config(format!(
                "set count {} does not evenly divide the {} cache lines",
                self.set_count, self.line_count
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_latency(what: &str, latency: f64) -> MemResult<()> {
    if latency.is_finite() && latency >= 0.0 {
        Ok(())
    } else {
        Err(MemError::invalid_config(format!(
            "{what} must be a finite, non-negative number (got {latency})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_hierarchy() {
        let config = HierarchyConfig::default();
        assert_eq!(config.cache_latency, 0.5);
        assert_eq!(config.memory_latency, 30.0);
        assert_eq!(config.line_count, 4);
        assert_eq!(config.set_count, 1);
        assert_eq!(config.memory_size, 16);
        assert_eq!(config.policy, PolicyChoice::Fifo);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_keeps_defaults_for_unset_fields() {
        let config = HierarchyConfig::builder().set_count(2).build();
        assert_eq!(config.line_count, 4);
        assert_eq!(config.set_count, 2);
        assert_eq!(config.lines_per_set(), 2);
    }

    #[test]
    fn set_counts_must_divide_line_count() {
        for sets in [1, 2, 4] {
            let config = HierarchyConfig::builder().set_count(sets).build();
            assert!(config.validate().is_ok(), "{sets} sets rejected");
        }
        for sets in [0, 3, 5, 8] {
            let config = HierarchyConfig::builder().set_count(sets).build();
            assert!(
                matches!(
                    config.validate(),
                    Err(MemError::InvalidConfiguration(_))
                ),
                "{sets} sets accepted"
            );
        }
    }

    #[test]
    fn bad_latencies_are_rejected() {
        let config = HierarchyConfig::builder().cache_latency(-1.0).build();
        assert!(config.validate().is_err());
        let config =
            HierarchyConfig::builder().memory_latency(f64::NAN).build();
        assert!(config.validate().is_err());
        let config = HierarchyConfig::builder().memory_size(0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_fills_in_missing_fields() {
        let text = r#"{ "set_count": 2, "policy": "random", "seed": 7 }"#;
        let config = HierarchyConfig::from_json(text.as_bytes()).unwrap();
        assert_eq!(config.set_count, 2);
        assert_eq!(config.policy, PolicyChoice::Random);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.cache_latency, DEFAULT_CACHE_LATENCY);
        assert_eq!(config.memory_size, DEFAULT_MEMORY_SIZE);
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let text = r#"{ "sets": 2 }"#;
        assert!(matches!(
            HierarchyConfig::from_json(text.as_bytes()),
            Err(MemError::InvalidConfiguration(_))
        ));
    }
}
