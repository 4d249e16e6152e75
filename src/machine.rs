use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::config::{BracketStrategy, EofBehavior, MachineConfig};
use crate::error::{MachineError, UnmatchedBracketKind};
use crate::matcher::{self, JumpTable};
use crate::program::{Instruction, Program};
use crate::stream;

/// Tape cell. Arithmetic does not wrap at 256; `.` writes the low 8 bits.
pub type Cell = i64;

/// A Brainfuck machine bound to one program and one pair of byte streams.
///
/// The machine maintains:
/// - the program and an instruction pointer into it,
/// - a fixed-size tape of zeroed [`Cell`]s (30,000 by default),
/// - a data pointer into that tape,
/// - the input source and output sink, which it never opens, flushes or closes.
pub struct Machine<R, W> {
    program: Program,
    ip: usize,
    memory: Vec<Cell>,
    dp: usize,
    input: R,
    output: W,
    eof: EofBehavior,
    jumps: Option<JumpTable>,
}

impl<R: Read, W: Write> Machine<R, W> {
    /// Create a machine with the default configuration.
    ///
    /// The program is not validated here; unmatched brackets only matter if
    /// a run actually takes the jump.
    pub fn new(program: impl Into<Program>, input: R, output: W) -> Self {
        Self::with_config(program, input, output, MachineConfig::default())
    }

    /// Create a machine with a custom tape size, EOF behavior or bracket strategy.
    ///
    /// A tape size of 0 is raised to a single cell.
    pub fn with_config(
        program: impl Into<Program>,
        input: R,
        output: W,
        config: MachineConfig,
    ) -> Self {
        let program = program.into();
        let jumps = match config.brackets {
            BracketStrategy::Scan => None,
            BracketStrategy::JumpTable => Some(JumpTable::build(program.as_bytes())),
        };

        Self {
            program,
            ip: 0,
            memory: vec![0; config.tape_size.max(1)],
            dp: 0,
            input,
            output,
            eof: config.eof,
            jumps,
        }
    }

    /// Execute until the instruction pointer leaves the program.
    ///
    /// Returns `Ok(())` on success or the first [`MachineError`]. Bytes
    /// written before a failure stay written. There is no step limit: a
    /// program that loops forever makes this call loop forever.
    pub fn run(&mut self) -> Result<(), MachineError> {
        debug!(
            len = self.program.len(),
            tape = self.memory.len(),
            jump_table = self.jumps.is_some(),
            "starting run"
        );

        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    debug!(ip = err.ip(), dp = self.dp, "run aborted: {err}");
                    return Err(err);
                }
            }
        }

        debug!(ip = self.ip, dp = self.dp, "run finished");
        Ok(())
    }

    /// Execute the instruction at the current ip and advance.
    ///
    /// Returns `Ok(true)` while instructions remain, `Ok(false)` once the
    /// instruction pointer has reached the end of the program.
    pub fn step(&mut self) -> Result<bool, MachineError> {
        if self.ip >= self.program.len() {
            return Ok(false);
        }

        if let Some(instr) = self.program.instruction_at(self.ip) {
            trace!(
                ip = self.ip,
                dp = self.dp,
                cell = self.memory[self.dp],
                op = %instr,
                "step"
            );
            self.execute(instr)?;
        }

        self.ip += 1;
        Ok(self.ip < self.program.len())
    }

    fn execute(&mut self, instr: Instruction) -> Result<(), MachineError> {
        match instr {
            Instruction::Increment => {
                let cell = &mut self.memory[self.dp];
                *cell = cell.wrapping_add(1);
            }
            Instruction::Decrement => {
                let cell = &mut self.memory[self.dp];
                *cell = cell.wrapping_sub(1);
            }
            Instruction::MoveRight => {
                if self.dp + 1 >= self.memory.len() {
                    return Err(self.out_of_bounds(instr));
                }
                self.dp += 1;
            }
            Instruction::MoveLeft => {
                let Some(dp) = self.dp.checked_sub(1) else {
                    return Err(self.out_of_bounds(instr));
                };
                self.dp = dp;
            }
            Instruction::Input => self.read_cell()?,
            Instruction::Output => self.write_cell()?,
            Instruction::LoopStart => {
                if self.memory[self.dp] == 0 {
                    self.ip = self.matching_bracket(UnmatchedBracketKind::Open)?;
                }
            }
            Instruction::LoopEnd => {
                if self.memory[self.dp] != 0 {
                    self.ip = self.matching_bracket(UnmatchedBracketKind::Close)?;
                }
            }
        }
        Ok(())
    }

    /// Position of the bracket matching the one at `ip`. The caller's uniform
    /// `ip += 1` then lands one past it.
    fn matching_bracket(&self, kind: UnmatchedBracketKind) -> Result<usize, MachineError> {
        let target = match &self.jumps {
            Some(table) => table.target(self.ip),
            None => match kind {
                UnmatchedBracketKind::Open => matcher::scan_forward(self.program.as_bytes(), self.ip),
                UnmatchedBracketKind::Close => {
                    matcher::scan_backward(self.program.as_bytes(), self.ip)
                }
            },
        };

        target.ok_or(MachineError::UnmatchedBracket { ip: self.ip, kind })
    }

    fn read_cell(&mut self) -> Result<(), MachineError> {
        match stream::read_byte(&mut self.input) {
            Ok(Some(byte)) => self.memory[self.dp] = Cell::from(byte),
            Ok(None) => match self.eof {
                EofBehavior::Fail => return Err(MachineError::EndOfInput { ip: self.ip }),
                EofBehavior::Zero => self.memory[self.dp] = 0,
                EofBehavior::Unchanged => {}
            },
            Err(source) => return Err(MachineError::Io { ip: self.ip, source }),
        }
        Ok(())
    }

    fn write_cell(&mut self) -> Result<(), MachineError> {
        // Two's-complement truncation: 256 * k + r writes r, and -1 writes 255.
        let byte = self.memory[self.dp] as u8;
        stream::write_byte(&mut self.output, byte)
            .map_err(|source| MachineError::Io { ip: self.ip, source })
    }

    fn out_of_bounds(&self, instr: Instruction) -> MachineError {
        MachineError::PointerOutOfBounds {
            ip: self.ip,
            ptr: self.dp,
            op: instr.symbol(),
        }
    }
}

impl<R, W> Machine<R, W> {
    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn data_pointer(&self) -> usize {
        self.dp
    }

    pub fn current_cell(&self) -> Cell {
        self.memory[self.dp]
    }

    pub fn tape(&self) -> &[Cell] {
        &self.memory
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Hand the streams back to the caller, who owns their lifecycle.
    pub fn into_io(self) -> (R, W) {
        (self.input, self.output)
    }
}
