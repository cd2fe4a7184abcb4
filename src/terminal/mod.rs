//! Terminal ownership for the console.
//!
//! [`ConsoleTerminal`] switches the terminal into raw mode on the alternate
//! screen and puts it back when dropped. The panic hook from
//! [`install_panic_hook`] covers the unwinding path, where the drop may run
//! after the panic message was already printed into the alternate screen.
//!
//! ```no_run
//! use minewatch::terminal::{install_panic_hook, ConsoleTerminal};
//!
//! fn main() -> color_eyre::Result<()> {
//!     install_panic_hook();
//!     let mut console = ConsoleTerminal::open()?;
//!     console.terminal().draw(|frame| {
//!         let _ = frame.area();
//!     })?;
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::install_panic_hook;
pub use setup::{emergency_restore, enter_console_mode, leave_console_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

/// Restores the terminal once, on drop or on an explicit [`restore`](Self::restore).
struct RestoreGuard {
    restored: bool,
}

impl RestoreGuard {
    fn restore<W: Write>(&mut self, out: &mut W) {
        if !self.restored {
            self.restored = true;
            leave_console_mode(out);
        }
    }
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        self.restore(&mut io::stdout());
    }
}

/// The ratatui terminal on stdout, restored when dropped.
pub struct ConsoleTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: RestoreGuard,
}

impl ConsoleTerminal {
    /// Enter raw mode and the alternate screen, then clear it.
    pub fn open() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        let guard = RestoreGuard { restored: false };
        enter_console_mode(&mut stdout)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;
        Ok(Self { terminal, guard })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Give the terminal back before the console exits, e.g. to print to stdout.
    pub fn restore(&mut self) -> Result<()> {
        self.guard.restore(self.terminal.backend_mut());
        self.terminal.show_cursor()?;
        Ok(())
    }
}
