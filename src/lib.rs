//! # Memsim
//!
//! Command line front end for [`memsim_hierarchy`]: reads an instruction
//! stream, runs it through a cache and backing store and reports the time it
//! took.
pub mod cmdline;
pub mod driver;
pub mod program;
