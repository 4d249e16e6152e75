use std::fmt;

/// Fatal conditions that abort a run.
///
/// Every variant carries `ip`, the byte offset of the instruction that failed.
#[derive(Debug, thiserror::Error)]
pub enum MachineError {
    /// Reading from the input stream or writing to the output stream failed.
    /// A write that accepts zero bytes lands here as `WriteZero`.
    #[error("I/O error at instruction {ip}: {source}")]
    Io {
        ip: usize,
        #[source]
        source: std::io::Error,
    },

    /// `,` hit end of stream and the machine is configured to treat that as fatal.
    #[error("Unexpected end of input at instruction {ip}")]
    EndOfInput { ip: usize },

    /// The data pointer attempted to move left of cell 0 or past the last cell.
    #[error("Pointer out of bounds at instruction {ip} (ptr={ptr}, op='{op}')")]
    PointerOutOfBounds { ip: usize, ptr: usize, op: char },

    /// A taken jump found no matching bracket before leaving the program.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBracket {
        ip: usize,
        kind: UnmatchedBracketKind,
    },
}

impl MachineError {
    pub fn ip(&self) -> usize {
        match self {
            MachineError::Io { ip, .. }
            | MachineError::EndOfInput { ip }
            | MachineError::PointerOutOfBounds { ip, .. }
            | MachineError::UnmatchedBracket { ip, .. } => *ip,
        }
    }

    /// Coarse classification: stream failures versus programming errors in the input program.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MachineError::Io { .. } | MachineError::EndOfInput { .. } => ErrorKind::Io,
            MachineError::PointerOutOfBounds { .. } | MachineError::UnmatchedBracket { .. } => {
                ErrorKind::OutOfRange
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    OutOfRange,
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedBracketKind {
    Open,
    Close,
}

impl fmt::Display for UnmatchedBracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedBracketKind::Open => write!(f, "'['"),
            UnmatchedBracketKind::Close => write!(f, "']'"),
        }
    }
}
