// ── Bounded activity log ──
//
// Append-only, newest last. Once `retention` entries are held, every
// append drops the oldest entry.

use std::collections::VecDeque;

use chrono::Utc;

use crate::model::{LogEntry, LogSeverity};

#[derive(Debug, Clone)]
pub(crate) struct LogBuffer {
    entries: VecDeque<LogEntry>,
    retention: usize,
    next_seq: u64,
}

impl LogBuffer {
    /// A retention of zero is raised to one so the latest entry is always visible.
    pub(crate) fn new(retention: usize) -> Self {
        let retention = retention.max(1);
        Self {
            entries: VecDeque::with_capacity(retention),
            retention,
            next_seq: 1,
        }
    }

    pub(crate) fn push(&mut self, severity: LogSeverity, message: impl Into<String>) -> &LogEntry {
        while self.entries.len() >= self.retention {
            self.entries.pop_front();
        }
        let entry = LogEntry {
            seq: self.next_seq,
            timestamp: Utc::now(),
            severity,
            message: message.into(),
        };
        self.next_seq += 1;
        self.entries.push_back(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub(crate) fn info(&mut self, message: impl Into<String>) -> &LogEntry {
        self.push(LogSeverity::Info, message)
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>) -> &LogEntry {
        self.push(LogSeverity::Warning, message)
    }

    /// Oldest first.
    pub(crate) fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn appends_newest_last() {
        let mut log = LogBuffer::new(10);
        log.info("first");
        log.warning("second");
        let snap = log.snapshot();
        assert_eq!(snap[0].message, "first");
        assert_eq!(snap[1].message, "second");
        assert_eq!(snap[1].severity, LogSeverity::Warning);
        assert_eq!(log.latest().unwrap().seq, 2);
    }

    #[test]
    fn retention_drops_oldest() {
        let mut log = LogBuffer::new(3);
        for i in 0..5 {
            log.info(format!("entry {i}"));
        }
        assert_eq!(log.len(), 3);
        let messages: Vec<String> = log.snapshot().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, ["entry 2", "entry 3", "entry 4"]);
        assert_eq!(log.latest().unwrap().seq, 5);
    }

    #[test]
    fn zero_retention_still_keeps_latest() {
        let mut log = LogBuffer::new(0);
        log.info("a");
        log.info("b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().unwrap().message, "b");
    }
}
