use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use tracing::Level;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// Fixed-width level label for the logs table
    pub fn level_label(&self) -> &'static str {
        match self.level {
            Level::ERROR => "ERROR",
            Level::WARN => "WARN ",
            Level::INFO => "INFO ",
            Level::DEBUG => "DEBUG",
            Level::TRACE => "TRACE",
        }
    }
}

/// A bottom-anchored slice of the buffer. `start` and `end` are 0-based
/// entry indices; the logs screen shows them 1-based.
#[derive(Debug)]
pub struct LogWindow {
    pub entries: Vec<LogEntry>,
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

/// Thread-safe ring buffer feeding the in-app logs screen
#[derive(Debug, Clone)]
pub struct LogBuffer {
    entries: Arc<RwLock<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The visible slice for a viewport of `height` rows. Newest entries
    /// sit at the bottom; `scroll_offset` counts rows back up from there.
    pub fn window(&self, scroll_offset: usize, height: usize) -> LogWindow {
        let entries = self.entries.read().unwrap();
        let total = entries.len();
        let end = total.saturating_sub(scroll_offset);
        let start = end.saturating_sub(height);
        LogWindow {
            entries: entries.iter().skip(start).take(end - start).cloned().collect(),
            start,
            end,
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: chrono::Local::now(),
            level: Level::INFO,
            target: "tripflow::test".to_string(),
            message: message.to_string(),
        }
    }

    fn buffer_with(count: usize) -> LogBuffer {
        let buffer = LogBuffer::new(100);
        for i in 0..count {
            buffer.push(entry(&format!("entry {i}")));
        }
        buffer
    }

    #[test]
    fn oldest_entries_are_evicted_at_capacity() {
        let buffer = LogBuffer::new(3);
        for i in 0..5 {
            buffer.push(entry(&format!("entry {i}")));
        }
        assert_eq!(buffer.len(), 3);
        let window = buffer.window(0, 3);
        assert_eq!(window.entries[0].message, "entry 2");
        assert_eq!(window.entries[2].message, "entry 4");
    }

    #[test]
    fn window_is_anchored_to_the_bottom() {
        let buffer = buffer_with(10);
        let window = buffer.window(0, 4);
        assert_eq!((window.start, window.end, window.total), (6, 10, 10));
        assert_eq!(window.entries.last().unwrap().message, "entry 9");
    }

    #[test]
    fn scrolling_moves_the_window_up() {
        let buffer = buffer_with(10);
        let window = buffer.window(3, 4);
        assert_eq!((window.start, window.end), (3, 7));
        assert_eq!(window.entries.last().unwrap().message, "entry 6");
    }

    #[test]
    fn window_clamps_past_the_top() {
        let buffer = buffer_with(3);
        let window = buffer.window(10, 4);
        assert_eq!((window.start, window.end, window.total), (0, 0, 3));
        assert!(window.entries.is_empty());
    }
}
