use std::fmt::Display;

/// Result of looking an address up in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit,
    Miss,
}

impl Display for AccessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessOutcome::Hit => write!(f, "HIT"),
            AccessOutcome::Miss => write!(f, "MISS"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessStats {
    pub reads: u64,
    pub writes: u64,
    pub hits: u64,
    pub misses: u64,
}

impl AccessStats {
    pub fn accesses(&self) -> u64 {
        self.reads + self.writes
    }

    pub(crate) fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::Miss => self.misses += 1,
        }
    }

    /// Fraction of accesses that hit, `None` before the first access
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        (total > 0).then(|| self.hits as f64 / total as f64)
    }
}

impl Display for AccessStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Reads:                {}", self.reads)?;
        writeln!(f, "Writes:               {}", self.writes)?;
        match self.hit_rate() {
            Some(rate) => write!(
                f,
                "Cache:                {:.2}% hit rate ({} / {})",
                rate * 100.0,
                self.hits,
                self.hits + self.misses
            ),
            None => write!(f, "Cache:                N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate() {
        let mut stats = AccessStats::default();
        assert_eq!(stats.hit_rate(), None);
        stats.record(AccessOutcome::Miss);
        stats.record(AccessOutcome::Hit);
        stats.record(AccessOutcome::Hit);
        stats.record(AccessOutcome::Hit);
        assert_eq!(stats.hit_rate(), Some(0.75));
    }

    #[test]
    fn display_mentions_counts() {
        let stats = AccessStats {
            reads: 4,
            writes: 1,
            hits: 1,
            misses: 4,
        };
        let text = stats.to_string();
        assert!(text.contains("20.00% hit rate (1 / 5)"));
        assert!(AccessStats::default().to_string().contains("N/A"));
    }
}
