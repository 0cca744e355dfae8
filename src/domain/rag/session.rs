//! Caller-owned session history

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// One recorded query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded ring of recent queries.
///
/// Owned by the caller and passed by reference into each pipeline call;
/// the core never holds session state itself. When full, the oldest entry
/// is dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    entries: VecDeque<QueryRecord>,
    capacity: usize,
}

impl SessionState {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a query, evicting the oldest entry when at capacity
    pub fn record(&mut self, query: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(QueryRecord {
            query: query.into(),
            timestamp: Utc::now(),
        });
    }

    /// The most recent `n` queries, newest first
    pub fn recent(&self, n: usize) -> Vec<&QueryRecord> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
