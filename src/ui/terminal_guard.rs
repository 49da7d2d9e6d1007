//! Terminal state guard that ensures cleanup on drop.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

/// RAII guard that restores the terminal on drop, including early returns
/// via `?` and panics (through the panic hook).
pub struct TerminalGuard {
    active: AtomicBool,
}

impl TerminalGuard {
    /// Enable raw mode and enter the alternate screen
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self {
            active: AtomicBool::new(true),
        })
    }

    /// Manual cleanup (used by the panic hook)
    pub fn cleanup() {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = execute!(io::stdout(), Show);
        let _ = io::stdout().flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            Self::cleanup();
        }
    }
}

/// Restore the terminal before printing a panic so the message is readable
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        TerminalGuard::cleanup();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_clears_active_on_drop() {
        let guard = TerminalGuard {
            active: AtomicBool::new(false),
        };
        // active is already false, so drop must not touch the terminal
        drop(guard);
    }
}
