//! Driver for the memory hierarchy simulator.
use std::io::Write;

use anyhow::Context;
use itertools::Itertools;
use memsim_hierarchy::{
    AccessStats, HierarchyConfig, MemoryLayer, StandardHierarchy,
    build_hierarchy,
};

use crate::{cmdline::Opts, program::Program};

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub output: String,
    pub exec_time: f64,
    pub stats: AccessStats,
    pub memory: Vec<String>,
}

impl Report {
    /// Prints the report. Nothing is printed when no time was spent.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        show_stats: bool,
        dump_memory: bool,
    ) -> std::io::Result<()> {
        if self.exec_time <= 0.0 {
            return Ok(());
        }
        writeln!(out, "OUTPUT STRING: {}", self.output)?;
        writeln!(out, "EXECUTION TIME: {:.2} nanoseconds", self.exec_time)?;

        if show_stats {
            writeln!(out, "\n-----------------------------")?;
            writeln!(out, "{}", self.stats)?;
            writeln!(out, "-----------------------------")?;
        }
        if dump_memory {
            let cells = self
                .memory
                .iter()
                .enumerate()
                .map(|(addr, word)| format!("{addr:>4}: {word:?}"))
                .join("\n");
            writeln!(out, "{cells}")?;
        }
        Ok(())
    }
}

/// Runs `program` on a freshly built hierarchy
pub fn simulate(
    program: &Program,
    config: &HierarchyConfig,
) -> anyhow::Result<Report> {
    let mut cache: StandardHierarchy<String> = build_hierarchy(config)?;
    let output = program.run(&mut cache)?;

    Ok(Report {
        output,
        exec_time: cache.get_exec_time(),
        stats: *cache.stats(),
        memory: cache.backing().cells().to_vec(),
    })
}

/// Run the simulator from the command line.
pub fn run_simulator() -> anyhow::Result<()> {
    // parse the command line arguments into Opts struct
    let opts = Opts::get_opts();

    // enable tracing
    env_logger::Builder::new()
        .format_timestamp(None)
        .filter_level(opts.effective_log_level())
        .target(env_logger::Target::Stderr)
        .init();

    let config = opts.hierarchy_config()?;
    log::debug!("{config:?}");

    let source = std::fs::read_to_string(&opts.file).with_context(|| {
        format!("failed to read program {}", opts.file.display())
    })?;
    let program: Program = source.parse()?;

    let report = simulate(&program, &config)?;
    report.write_to(&mut std::io::stdout().lock(), opts.stats, opts.dump)?;
    Ok(())
}
