//! A small Brainfuck tape machine.
//!
//! This crate provides a direct interpreter that executes program text as-is:
//! no parser, no optimizer, no precomputed control flow unless asked for.
//!
//! Features and behaviors:
//! - Memory tape of 30,000 integer cells, initialized to 0.
//! - Cells are `i64`; `+` and `-` never wrap at 256. `.` writes the low
//!   8 bits of the current cell.
//! - Strict pointer bounds: moving left from cell 0 or right past the last
//!   cell returns an error.
//! - `,` reads one byte from any [`std::io::Read`]; end of input is an
//!   error unless [`EofBehavior`] says otherwise.
//! - Loops find their partner by scanning the program text. An unmatched
//!   bracket is only an error when its jump is actually taken.
//! - Any character outside `><+-.,[]` is a comment.
//!
//! Quick start:
//!
//! ```
//! use bf_machine::Machine;
//!
//! let mut output = Vec::new();
//! let mut machine = Machine::new("++[>++<-]>.", std::io::empty(), &mut output);
//! machine.run().expect("program should run");
//! drop(machine);
//! assert_eq!(output, vec![4]);
//! ```

pub mod cli_util;
pub mod config;
pub mod error;
pub mod logging;
pub mod machine;
pub mod matcher;
pub mod program;
pub mod stream;

pub use config::{BracketStrategy, ConfigError, EofBehavior, MachineConfig, PartialConfig};
pub use error::{ErrorKind, MachineError, UnmatchedBracketKind};
pub use machine::{Cell, Machine};
pub use program::{Instruction, Program};
