//! Operator log served by `GET /api/logs`.
//!
//! A bounded ring of timestamped lines, oldest first. Every line is also
//! echoed to stdout.

use std::collections::VecDeque;

/// Lines kept before the oldest is evicted.
pub const MAX_LOG_LINES: usize = 50;

/// Bounded, oldest-first log buffer.
#[derive(Debug, Clone)]
pub struct LogRing {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogRing {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_LINES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append `message` stamped with the current local time.
    pub fn log(&mut self, message: impl AsRef<str>) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        self.log_at(&time, message.as_ref());
    }

    /// Append `message` stamped with `time` (`HH:MM:SS`).
    pub fn log_at(&mut self, time: &str, message: &str) {
        let line = format!("[{}] {}", time, message);
        println!("   {}", line);

        self.lines.push_back(line);
        while self.lines.len() > self.capacity {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}
