use std::fmt;

/// The eight Brainfuck instructions. Every other byte in a program is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `>`
    MoveRight,
    /// `<`
    MoveLeft,
    /// `,`
    Input,
    /// `.`
    Output,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Instruction {
    /// Decode a single program byte. Returns `None` for comment bytes.
    pub fn decode(byte: u8) -> Option<Self> {
        Some(match byte {
            b'+' => Instruction::Increment,
            b'-' => Instruction::Decrement,
            b'>' => Instruction::MoveRight,
            b'<' => Instruction::MoveLeft,
            b',' => Instruction::Input,
            b'.' => Instruction::Output,
            b'[' => Instruction::LoopStart,
            b']' => Instruction::LoopEnd,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::Input => ',',
            Instruction::Output => '.',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Immutable program text, addressed by byte offset.
///
/// Source text is kept as-is (comments included) so that instruction
/// pointers reported in errors line up with the text the user wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    code: Box<[u8]>,
}

impl Program {
    pub fn new(code: impl Into<Vec<u8>>) -> Self {
        Self {
            code: code.into().into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.code
    }

    /// Decoded instruction at `ip`, or `None` past the end or on a comment byte.
    pub fn instruction_at(&self, ip: usize) -> Option<Instruction> {
        self.code.get(ip).copied().and_then(Instruction::decode)
    }

    /// Number of executable instructions, ignoring comments.
    pub fn instruction_count(&self) -> usize {
        self.code
            .iter()
            .filter(|&&b| Instruction::decode(b).is_some())
            .count()
    }
}

impl From<&str> for Program {
    fn from(code: &str) -> Self {
        Program::new(code)
    }
}

impl From<String> for Program {
    fn from(code: String) -> Self {
        Program::new(code)
    }
}

impl From<&[u8]> for Program {
    fn from(code: &[u8]) -> Self {
        Program::new(code)
    }
}

impl From<Vec<u8>> for Program {
    fn from(code: Vec<u8>) -> Self {
        Program::new(code)
    }
}
