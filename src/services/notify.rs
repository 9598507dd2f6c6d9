use crate::errors::AppResult;
use std::io::{Write, stdout};

/// Delivers a reminder to the user.
pub trait Notifier: Send {
    fn notify(&self, title: &str, body: &str) -> AppResult<()>;
}

/// Prints the reminder on its own line, optionally ringing the terminal bell.
pub struct TerminalNotifier {
    bell: bool,
}

impl TerminalNotifier {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, title: &str, body: &str) -> AppResult<()> {
        let mut out = stdout().lock();
        // \r: the topbar may be mid-line
        write!(out, "\r\x1b[2K")?;
        if self.bell {
            write!(out, "\x07")?;
        }
        writeln!(out, "🔔 {}: {}", title, body)?;
        out.flush()?;
        Ok(())
    }
}
