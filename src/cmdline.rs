use std::{fs::File, path::PathBuf};

use anyhow::Context;
use argh::FromArgs;
use memsim_hierarchy::{HierarchyConfig, cache::PolicyChoice};

#[derive(FromArgs, Debug)]
#[argh(help_triggers("-h", "--help"))]
/// Run an instruction stream through a cache and report the time it took
pub struct Opts {
    /// program file
    #[argh(positional)]
    pub file: PathBuf,

    /// JSON file with the hierarchy configuration. Flags below override it
    #[argh(option, long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// latency of a cache access
    #[argh(option, long = "cache-latency")]
    pub cache_latency: Option<f64>,

    /// latency of a backing store access
    #[argh(option, long = "memory-latency")]
    pub memory_latency: Option<f64>,

    /// number of cache lines
    #[argh(option, long = "lines")]
    pub line_count: Option<usize>,

    /// number of sets, must divide the line count
    #[argh(option, long = "sets")]
    pub set_count: Option<usize>,

    /// number of words in the backing store
    #[argh(option, long = "memory-size")]
    pub memory_size: Option<usize>,

    /// replacement policy (fifo | random). default = fifo
    #[argh(option, long = "policy")]
    pub policy: Option<PolicyChoice>,

    /// seed for the random policy
    #[argh(option, long = "seed")]
    pub seed: Option<u64>,

    /// print hit/miss statistics
    #[argh(switch, long = "stats")]
    pub stats: bool,

    /// print the backing store contents after the run
    #[argh(switch, long = "dump")]
    pub dump: bool,

    /// show a trace line for every access
    #[argh(switch, short = 't', long = "trace")]
    pub trace: bool,

    /// log level
    #[argh(option, long = "log", default = "log::LevelFilter::Warn")]
    pub log_level: log::LevelFilter,
}

impl Opts {
    pub fn get_opts() -> Self {
        argh::from_env()
    }

    /// The level the logger should be initialized with. `--trace` only ever
    /// raises the level.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        if self.trace {
            self.log_level.max(log::LevelFilter::Info)
        } else {
            self.log_level
        }
    }

    /// Loads the configuration file, if any, and applies the command line
    /// overrides on top of it.
    pub fn hierarchy_config(&self) -> anyhow::Result<HierarchyConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path).with_context(|| {
                    format!("failed to open config file {}", path.display())
                })?;
                HierarchyConfig::from_json(file)?
            }
            None => HierarchyConfig::default(),
        };

        if let Some(latency) = self.cache_latency {
            config.cache_latency = latency;
        }
        if let Some(latency) = self.memory_latency {
            config.memory_latency = latency;
        }
        if let Some(lines) = self.line_count {
            config.line_count = lines;
        }
        if let Some(sets) = self.set_count {
            config.set_count = sets;
        }
        if let Some(size) = self.memory_size {
            config.memory_size = size;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}
