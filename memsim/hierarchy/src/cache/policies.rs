use argh::FromArgValue;
use rand::{RngExt, SeedableRng, rngs::StdRng};
use serde::Deserialize;

use super::line::CacheSet;

/// Decides which line of a set receives a newly installed entry.
pub trait ReplacementPolicy: std::fmt::Debug {
    /// Returns the index (into the whole line array) of the line to replace.
    /// The result always lies inside `set.range()`.
    fn select_victim(&mut self, set: &CacheSet) -> usize;
}

/// Per-set install order ring. Each set keeps a cursor that starts at the
/// first line of the set, is consumed on every install and wraps back to the
/// start of the set once it passes the last line.
#[derive(Debug, Clone)]
pub struct FifoPolicy {
    cursors: Vec<usize>,
}

impl FifoPolicy {
    pub fn new(sets: &[CacheSet]) -> Self {
        Self {
            cursors: sets.iter().map(|s| s.start).collect(),
        }
    }

    /// The line the next install into `set` will use
    pub fn cursor(&self, set: &CacheSet) -> usize {
        self.cursors[set.index]
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn select_victim(&mut self, set: &CacheSet) -> usize {
        let cursor = &mut self.cursors[set.index];
        let victim = *cursor;
        *cursor += 1;
        if *cursor == set.end() {
            *cursor = set.start;
        }
        victim
    }
}

/// Picks a uniformly random line within the set
#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ReplacementPolicy for RandomPolicy {
    fn select_victim(&mut self, set: &CacheSet) -> usize {
        self.rng.random_range(set.range())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyChoice {
    #[default]
    Fifo,
    #[serde(alias = "rand")]
    Random,
}

impl PolicyChoice {
    pub(crate) fn generate_policy(
        &self,
        sets: &[CacheSet],
        seed: Option<u64>,
    ) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyChoice::Fifo => Box::new(FifoPolicy::new(sets)),
            PolicyChoice::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl FromArgValue for PolicyChoice {
    fn from_arg_value(value: &str) -> Result<Self, String> {
        match value.to_lowercase().as_str() {
            "fifo" | "default" => Ok(PolicyChoice::Fifo),
            "rand" | "random" => Ok(PolicyChoice::Random),
            _ => Err(format!("Unknown policy : '{value}'")),
        }
    }
}

impl std::fmt::Display for PolicyChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyChoice::Fifo => write!(f, "fifo"),
            PolicyChoice::Random => write!(f, "random"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_cycles_through_a_single_set() {
        let sets = CacheSet::partition(4, 1);
        let mut fifo = FifoPolicy::new(&sets);
        let picks: Vec<_> =
            (0..6).map(|_| fifo.select_victim(&sets[0])).collect();
        assert_eq!(picks, vec![0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn fifo_cursors_are_independent_per_set() {
        let sets = CacheSet::partition(4, 2);
        let mut fifo = FifoPolicy::new(&sets);
        assert_eq!(fifo.cursor(&sets[1]), 2);
        assert_eq!(fifo.select_victim(&sets[1]), 2);
        assert_eq!(fifo.select_victim(&sets[0]), 0);
        assert_eq!(fifo.select_victim(&sets[1]), 3);
        assert_eq!(fifo.select_victim(&sets[1]), 2);
        assert_eq!(fifo.cursor(&sets[0]), 1);
    }

    #[test]
    fn fifo_direct_mapped_always_reuses_the_line() {
        let sets = CacheSet::partition(4, 4);
        let mut fifo = FifoPolicy::new(&sets);
        for set in &sets {
            assert_eq!(fifo.select_victim(set), set.start);
            assert_eq!(fifo.select_victim(set), set.start);
        }
    }

    #[test]
    fn random_stays_inside_the_set() {
        let sets = CacheSet::partition(4, 2);
        let mut random = RandomPolicy::new(Some(42));
        for _ in 0..200 {
            for set in &sets {
                assert!(set.range().contains(&random.select_victim(set)));
            }
        }
    }

    #[test]
    fn random_with_a_seed_is_reproducible() {
        let sets = CacheSet::partition(4, 1);
        let mut a = RandomPolicy::new(Some(7));
        let mut b = RandomPolicy::new(Some(7));
        let picks_a: Vec<_> =
            (0..32).map(|_| a.select_victim(&sets[0])).collect();
        let picks_b: Vec<_> =
            (0..32).map(|_| b.select_victim(&sets[0])).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn policy_names_parse() {
        assert_eq!(
            PolicyChoice::from_arg_value("FIFO"),
            Ok(PolicyChoice::Fifo)
        );
        assert_eq!(
            PolicyChoice::from_arg_value("rand"),
            Ok(PolicyChoice::Random)
        );
        assert!(PolicyChoice::from_arg_value("lru").is_err());
    }
}
