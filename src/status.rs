//! Status reporting
//!
//! Hosts receive a `StatusSink` when they are constructed and report
//! user-facing messages through it.

/// Receives status messages
pub trait StatusSink {
    fn report(&mut self, message: &str);
}

/// A message line: remembers every message, shows the last one
#[derive(Debug, Clone, Default)]
pub struct MessageLine {
    messages: Vec<String>,
}

impl MessageLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The message currently shown
    pub fn current(&self) -> Option<&str> {
        self.messages.last().map(|s| s.as_str())
    }

    pub fn history(&self) -> &[String] {
        &self.messages
    }
}

impl StatusSink for MessageLine {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
