use crate::domain::ports::Progress;
use std::io::Write;

/// Prints loading indicators to stderr so stdout carries only the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalProgress;

impl Progress for TerminalProgress {
    fn start(&self, label: &str) {
        let mut stderr = std::io::stderr().lock();
        // A broken stderr must not abort the run.
        let _ = writeln!(stderr, "⏳ {}", label);
    }
}
