use std::io::{self, Write};

use crate::MachineError;

/// Pretty-print a [`MachineError`] with a caret under the failing instruction.
/// Messages are prefixed with `program`, e.g. `bfm: ...`.
pub fn print_machine_error(program: &str, code: &str, err: &MachineError) {
    eprint!("{}", render_machine_error(program, code, err));
    let _ = io::stderr().flush();
}

/// The text [`print_machine_error`] writes, without the I/O.
pub fn render_machine_error(program: &str, code: &str, err: &MachineError) -> String {
    let msg = match err {
        MachineError::PointerOutOfBounds { ptr, op, .. } => {
            format!("Runtime error: pointer out of bounds (ptr={ptr}, op={op})")
        }
        MachineError::UnmatchedBracket { kind, .. } => {
            format!("Runtime error: unmatched bracket {kind}")
        }
        MachineError::EndOfInput { .. } => "I/O error: unexpected end of input".to_string(),
        MachineError::Io { source, .. } => format!("I/O error: {source}"),
    };
    render_with_context(&format!("{program}: {msg}"), code.as_bytes(), err.ip())
}

/// Format `prefix`, then a short window of `code` around byte offset `pos`
/// with a caret underneath.
fn render_with_context(prefix: &str, code: &[u8], pos: usize) -> String {
    const WINDOW: usize = 32;

    let start = pos.saturating_sub(WINDOW);
    let end = pos.saturating_add(WINDOW + 1).min(code.len());
    let window = code.get(start..end).unwrap_or_default();

    // Newlines and tabs would break the caret alignment.
    let slice: String = String::from_utf8_lossy(window)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let caret_offset = String::from_utf8_lossy(code.get(start..pos.min(end)).unwrap_or_default())
        .chars()
        .count();

    format!(
        "{prefix} at instruction {pos}\n  {slice}\n  {caret:>width$}\n",
        caret = "^",
        width = caret_offset + 1
    )
}
