//! Bracket matching.
//!
//! The default strategy scans the program text on every taken jump, counting
//! nesting depth until it returns to zero. [`JumpTable`] precomputes the same
//! pairing once with a stack so each jump becomes a lookup. Both strategies
//! agree on every program, including unbalanced ones: an unmatched bracket
//! has no target in either, and the error only surfaces if the jump is taken.

/// Find the `]` matching the `[` at `open` by scanning forward.
///
/// Returns `None` if the scan runs off the end of the program.
pub fn scan_forward(code: &[u8], open: usize) -> Option<usize> {
    let start = open.checked_add(1)?;
    let mut depth = 1usize;
    for (offset, &byte) in code.get(start..)?.iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Find the `[` matching the `]` at `close` by scanning backward.
///
/// Returns `None` if the scan runs off the start of the program.
pub fn scan_backward(code: &[u8], close: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (index, &byte) in code.get(..close)?.iter().enumerate().rev() {
        match byte {
            b']' => depth += 1,
            b'[' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Precomputed bracket-to-bracket targets.
///
/// `targets[i]` holds the matching index for a bracket at `i`; comment
/// bytes, non-bracket instructions and unmatched brackets hold `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
}

impl JumpTable {
    pub fn build(code: &[u8]) -> Self {
        let mut targets = vec![None; code.len()];
        let mut stack: Vec<usize> = Vec::new();

        for (i, &byte) in code.iter().enumerate() {
            match byte {
                b'[' => stack.push(i),
                b']' => {
                    // A stray ']' stays unmatched; the stack is left intact for later ones.
                    if let Some(open) = stack.pop() {
                        targets[open] = Some(i);
                        targets[i] = Some(open);
                    }
                }
                _ => {}
            }
        }

        Self { targets }
    }

    pub fn target(&self, ip: usize) -> Option<usize> {
        self.targets.get(ip).copied().flatten()
    }
}
