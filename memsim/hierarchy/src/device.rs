use std::fmt::Display;

use log::info;

use crate::{Address, configuration::check_latency, errors::MemResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKind {
    Read,
    Write,
}

impl Display for AccessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessKind::Read => write!(f, "read"),
            AccessKind::Write => write!(f, "write"),
        }
    }
}

/// A named device with a fixed per-access latency. Tracks the total time the
/// device has spent servicing accesses.
#[derive(Debug, Clone)]
pub struct StorageDevice {
    name: String,
    access_latency: f64,
    cumulative_time: f64,
}

impl StorageDevice {
    /// Rejects negative, infinite and NaN latencies so the cumulative time
    /// can only grow.
    pub fn new<S: Into<String>>(
        name: S,
        access_latency: f64,
    ) -> MemResult<Self> {
        let name = name.into();
        check_latency(&format!("latency of \"{name}\""), access_latency)?;
        Ok(Self {
            name,
            access_latency,
            cumulative_time: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Charge one read to this device
    pub fn read(&mut self) {
        self.charge(AccessKind::Read)
    }

    /// Charge one write to this device
    pub fn write(&mut self) {
        self.charge(AccessKind::Write)
    }

    fn charge(&mut self, kind: AccessKind) {
        info!("{} {kind}", self.name);
        self.cumulative_time += self.access_latency;
    }

    /// Time spent by this device alone
    pub fn exec_time(&self) -> f64 {
        self.cumulative_time
    }
}

/// The caller facing contract shared by every level of the hierarchy.
pub trait MemoryLayer<W> {
    /// Name used in trace output and errors
    fn name(&self) -> &str;

    /// Number of addressable words. Valid addresses are `0..size()`
    fn size(&self) -> usize;

    fn read(&mut self, address: Address) -> MemResult<W>;

    fn write(&mut self, address: Address, data: W) -> MemResult<()>;

    /// Total time spent by this layer and every layer it owns
    fn get_exec_time(&self) -> f64;
}
