//! The instruction stream fed to the hierarchy.
//!
//! Programs are plain text, one instruction per line:
//!
//! ```text
//! # whole-line comments start with a hash
//! write 3 hello world
//! read 3
//! print 3
//! ```
//!
//! `write` stores the rest of the line as the word. `print` reads an address
//! and appends the word to the program's output string. Mnemonics are
//! case-insensitive.

use std::str::FromStr;

use memsim_hierarchy::{Address, MemResult, MemoryLayer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Read(Address),
    Write(Address, String),
    Print(Address),
}

/// Reasons a program text can be rejected. Line numbers are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    #[error("line {line}: unknown instruction \"{found}\"")]
    UnknownInstruction { line: usize, found: String },

    #[error("line {line}: `{op}` expects {expected}")]
    MissingOperand {
        line: usize,
        op: &'static str,
        expected: &'static str,
    },

    #[error("line {line}: \"{found}\" is not a valid address")]
    InvalidAddress { line: usize, found: String },

    #[error("line {line}: unexpected trailing input \"{found}\"")]
    TrailingInput { line: usize, found: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

/// Splits off the first whitespace separated token
fn next_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    text.split_once(char::is_whitespace)
        .map(|(head, tail)| (head, tail.trim_start()))
        .unwrap_or((text, ""))
}

fn parse_address(
    line: usize,
    op: &'static str,
    text: &str,
) -> Result<Address, ProgramError> {
    if text.is_empty() {
        return Err(ProgramError::MissingOperand {
            line,
            op,
            expected: "an address",
        });
    }
    text.parse().map_err(|_| ProgramError::InvalidAddress {
        line,
        found: text.to_string(),
    })
}

fn no_trailing(line: usize, rest: &str) -> Result<(), ProgramError> {
    let rest = rest.trim();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(ProgramError::TrailingInput {
            line,
            found: rest.to_string(),
        })
    }
}

impl Instruction {
    fn parse_line(line: usize, text: &str) -> Result<Self, ProgramError> {
        let (op, rest) = next_token(text);
        let (addr, rest) = next_token(rest);

        match op.to_lowercase().as_str() {
            "read" => {
                let addr = parse_address(line, "read", addr)?;
                no_trailing(line, rest)?;
                Ok(Instruction::Read(addr))
            }
            "print" => {
                let addr = parse_address(line, "print", addr)?;
                no_trailing(line, rest)?;
                Ok(Instruction::Print(addr))
            }
            "write" => {
                let addr = parse_address(line, "write", addr)?;
                let word = rest.trim_end();
                if word.is_empty() {
                    return Err(ProgramError::MissingOperand {
                        line,
                        op: "write",
                        expected: "an address and a word",
                    });
                }
                Ok(Instruction::Write(addr, word.to_string()))
            }
            _ => Err(ProgramError::UnknownInstruction {
                line,
                found: op.to_string(),
            }),
        }
    }
}

impl FromStr for Program {
    type Err = ProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let instructions = s
            .lines()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.trim()))
            .filter(|(_, text)| !text.is_empty() && !text.starts_with('#'))
            .map(|(line, text)| Instruction::parse_line(line, text))
            .collect::<Result<_, _>>()?;
        Ok(Self { instructions })
    }
}

impl Program {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Executes every instruction in order against `memory` and returns the
    /// accumulated output string. Stops at the first failing access.
    pub fn run<M: MemoryLayer<String>>(
        &self,
        memory: &mut M,
    ) -> MemResult<String> {
        let mut output = String::new();
        for instr in &self.instructions {
            match instr {
                Instruction::Read(addr) => {
                    memory.read(*addr)?;
                }
                Instruction::Write(addr, word) => {
                    memory.write(*addr, word.clone())?
                }
                Instruction::Print(addr) => {
                    output.push_str(&memory.read(*addr)?);
                }
            }
        }
        Ok(output)
    }
}
