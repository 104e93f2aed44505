use crate::{
    Address,
    configuration::HierarchyConfig,
    device::{MemoryLayer, StorageDevice},
    errors::{MemError, MemResult},
};

/// Fixed size, address indexed word storage. Every access costs one device
/// latency.
#[derive(Debug, Clone)]
pub struct BackingStore<W> {
    device: StorageDevice,
    cells: Box<[W]>,
}

impl<W: Clone + Default> BackingStore<W> {
    pub const DEFAULT_NAME: &'static str = "Main Memory";

    pub fn new<S: Into<String>>(
        name: S,
        access_latency: f64,
        size: usize,
    ) -> MemResult<Self> {
        let device = StorageDevice::new(name, access_latency)?;
        if size == 0 {
            return Err(MemError::invalid_config(
                "memory size must be greater than zero",
            ));
        }
        Ok(Self {
            device,
            cells: vec![W::default(); size].into_boxed_slice(),
        })
    }

    pub fn from_config(config: &HierarchyConfig) -> MemResult<Self> {
        Self::new(Self::DEFAULT_NAME, config.memory_latency, config.memory_size)
    }
}

impl<W> BackingStore<W> {
    fn check(&self, address: Address) -> MemResult<()> {
        if address < self.cells.len() {
            Ok(())
        } else {
            Err(MemError::out_of_range(
                self.device.name(),
                address,
                self.cells.len(),
            ))
        }
    }

    /// Looks at a stored word without charging any latency
    pub fn peek(&self, address: Address) -> Option<&W> {
        self.cells.get(address)
    }

    pub fn cells(&self) -> &[W] {
        &self.cells
    }
}

impl<W: Clone> MemoryLayer<W> for BackingStore<W> {
    fn name(&self) -> &str {
        self.device.name()
    }

    fn size(&self) -> usize {
        self.cells.len()
    }

    fn read(&mut self, address: Address) -> MemResult<W> {
        self.check(address)?;
        self.device.read();
        Ok(self.cells[address].clone())
    }

    fn write(&mut self, address: Address, data: W) -> MemResult<()> {
        self.check(address)?;
        self.cells[address] = data;
        self.device.write();
        Ok(())
    }

    fn get_exec_time(&self) -> f64 {
        self.device.exec_time()
    }
}
