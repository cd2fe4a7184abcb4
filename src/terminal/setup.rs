//! Raw escape-sequence level setup and teardown.

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switch `out` to the alternate screen. Raw mode is enabled by the caller.
pub fn enter_console_mode<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen)
}

/// Undo [`enter_console_mode`] and raw mode. Errors are ignored, so this is
/// safe to call more than once or on a terminal that was never set up.
pub fn leave_console_mode<W: Write>(out: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(out, LeaveAlternateScreen, Show);
    let _ = out.flush();
}

/// Best-effort restore of stdout from a panic hook.
pub fn emergency_restore() {
    leave_console_mode(&mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leave_writes_escape_sequences() {
        let mut out = Vec::new();
        leave_console_mode(&mut out);
        assert!(!out.is_empty());
    }

    #[test]
    fn test_leave_twice_is_harmless() {
        let mut out = Vec::new();
        leave_console_mode(&mut out);
        leave_console_mode(&mut out);
    }
}
