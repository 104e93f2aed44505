//! The set-associative cache layer and its replacement policies.

mod line;
mod policies;

pub use line::{CacheLine, CacheSet};
pub use policies::{
    FifoPolicy, PolicyChoice, RandomPolicy, ReplacementPolicy,
};

use log::{debug, info};

use crate::{
    Address,
    backing::BackingStore,
    configuration::HierarchyConfig,
    device::{AccessKind, MemoryLayer, StorageDevice},
    errors::{MemError, MemResult},
    stats::{AccessOutcome, AccessStats},
};

/// A set-associative cache in front of an owned lower layer. Writes are
/// always propagated to the lower layer.
#[derive(Debug)]
pub struct CacheLayer<W, B> {
    device: StorageDevice,
    lines: Box<[CacheLine<W>]>,
    sets: Box<[CacheSet]>,
    policy: Box<dyn ReplacementPolicy>,
    backing: B,
    stats: AccessStats,
    last_outcome: Option<AccessOutcome>,
}

/// The standard two level hierarchy
pub type StandardHierarchy<W> = CacheLayer<W, BackingStore<W>>;

/// Builds a cache and the backing store it fronts from a single configuration
pub fn build_hierarchy<W: Clone + Default>(
    config: &HierarchyConfig,
) -> MemResult<StandardHierarchy<W>> {
    let backing = BackingStore::from_config(config)?;
    CacheLayer::new(config, backing)
}

impl<W, B> CacheLayer<W, B>
where
    W: Clone + Default,
    B: MemoryLayer<W>,
{
    pub const DEFAULT_NAME: &'static str = "Cache";

    /// Creates a cold cache in front of `backing`. The configuration is
    /// validated before anything is built.
    pub fn new(config: &HierarchyConfig, backing: B) -> MemResult<Self> {
        config.validate()?;
        debug!(
            "building {} line cache with {} set(s) and {} replacement",
            config.line_count, config.set_count, config.policy
        );

        let sets = CacheSet::partition(config.line_count, config.set_count);
        let policy = config.policy.generate_policy(&sets, config.seed);

        Ok(Self {
            device: StorageDevice::new(
                Self::DEFAULT_NAME,
                config.cache_latency,
            )?,
            lines: vec![CacheLine::default(); config.line_count]
                .into_boxed_slice(),
            sets: sets.into_boxed_slice(),
            policy,
            backing,
            stats: AccessStats::default(),
            last_outcome: None,
        })
    }
}

impl<W, B> CacheLayer<W, B> {
    pub fn lines(&self) -> &[CacheLine<W>] {
        &self.lines
    }

    pub fn backing(&self) -> &B {
        &self.backing
    }

    pub fn stats(&self) -> &AccessStats {
        &self.stats
    }

    /// Whether the most recent access hit or missed
    pub fn last_outcome(&self) -> Option<AccessOutcome> {
        self.last_outcome
    }

    /// Time spent in the cache alone, excluding the backing layer
    pub fn own_exec_time(&self) -> f64 {
        self.device.exec_time()
    }

    /// The set an address maps to
    pub fn set_for(&self, address: Address) -> &CacheSet {
        &self.sets[address % self.sets.len()]
    }

    /// Scans every line for the address. The scan is not limited to the
    /// address's set.
    fn lookup(&self, address: Address) -> Option<usize> {
        self.lines.iter().position(|line| line.holds(address))
    }

    fn record(
        &mut self,
        kind: AccessKind,
        address: Address,
        outcome: AccessOutcome,
    ) {
        info!("{} {kind} {address}: {outcome}", self.device.name());
        self.stats.record(outcome);
        self.last_outcome = Some(outcome);
    }

    fn replace(&mut self, address: Address, data: W) {
        let set = *self.set_for(address);
        let victim = self.policy.select_victim(&set);
        debug_assert!(set.range().contains(&victim));

        if let Some(evicted) = self.lines[victim].install(address, data) {
            debug!(
                "{}: address {address} evicts address {evicted} from line {victim}",
                self.device.name()
            );
        }
    }
}

impl<W, B> CacheLayer<W, B>
where
    B: MemoryLayer<W>,
{
    fn check(&self, address: Address) -> MemResult<()> {
        let size = self.backing.size();
        if address < size {
            Ok(())
        } else {
            Err(MemError::out_of_range(self.device.name(), address, size))
        }
    }
}

impl<W, B> MemoryLayer<W> for CacheLayer<W, B>
where
    W: Clone,
    B: MemoryLayer<W>,
{
    fn name(&self) -> &str {
        self.device.name()
    }

    fn size(&self) -> usize {
        self.backing.size()
    }

    fn read(&mut self, address: Address) -> MemResult<W> {
        self.check(address)?;
        self.device.read();
        self.stats.reads += 1;

        if let Some(idx) = self.lookup(address) {
            self.record(AccessKind::Read, address, AccessOutcome::Hit);
            return Ok(self.lines[idx].data().clone());
        }

        self.record(AccessKind::Read, address, AccessOutcome::Miss);
        let data = self.backing.read(address)?;
        self.replace(address, data.clone());
        Ok(data)
    }

    fn write(&mut self, address: Address, data: W) -> MemResult<()> {
        self.check(address)?;
        self.device.write();
        self.stats.writes += 1;

        let hit = self.lookup(address);
        let outcome = match hit {
            Some(_) => AccessOutcome::Hit,
            None => AccessOutcome::Miss,
        };
        self.record(AccessKind::Write, address, outcome);

        // the line only changes once the lower layer has accepted the word
        self.backing.write(address, data.clone())?;
        match hit {
            Some(idx) => self.lines[idx].set_data(data),
            None => self.replace(address, data),
        }
        Ok(())
    }

    fn get_exec_time(&self) -> f64 {
        self.device.exec_time() + self.backing.get_exec_time()
    }
}
