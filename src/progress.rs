// Copyright 2026 Skywatch Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress event types and broadcast channel for acquisition telemetry.
//!
//! The fetch and scrape loops emit `ProgressEvent`s which flow through a
//! `tokio::sync::broadcast` channel to any subscriber (CLI, tests). When no
//! subscriber exists, events are silently dropped.

use serde::{Deserialize, Serialize};

/// A progress event emitted during a fetch or scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Label of the run this event belongs to (source name or period token).
    pub run_id: String,
    /// Monotonically increasing sequence number.
    pub seq: u64,
    /// The kind of progress event.
    pub event: ProgressEventKind,
}

/// The specific kind of progress event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProgressEventKind {
    /// One page of records was fetched and appended.
    PageFetched {
        offset: u64,
        page_records: u32,
        total_records: u64,
    },
    /// The full dataset was persisted to the checkpoint file.
    CheckpointSaved { offset: u64, records: u64 },
    /// The paginated fetch loop finished (normally or after an abort).
    FetchComplete {
        records: u64,
        pages: u32,
        elapsed_ms: u64,
    },
    /// A scrape period started with a known expected total.
    PeriodStarted { period: String, expected: u64 },
    /// A scrape period finished; `rows` may be below `expected` on partial
    /// collection.
    PeriodCompleted {
        period: String,
        rows: u64,
        expected: u64,
    },
    /// A scrape period was skipped before any rows were collected.
    PeriodSkipped { period: String, reason: String },
    /// A non-fatal warning occurred.
    Warning { message: String },
}

/// Sender handle for emitting progress events.
///
/// Backed by a `tokio::sync::broadcast` channel so multiple listeners can
/// subscribe independently. When no listeners exist, `send()` returns an
/// error which we silently ignore.
pub type ProgressSender = tokio::sync::broadcast::Sender<ProgressEvent>;

/// Receiver handle for consuming progress events.
pub type ProgressReceiver = tokio::sync::broadcast::Receiver<ProgressEvent>;

/// Create a new progress broadcast channel with a bounded buffer.
///
/// 256 events cover a typical run (one page event plus one checkpoint event
/// per page, or a handful of events per scraped period).
pub fn channel() -> (ProgressSender, ProgressReceiver) {
    tokio::sync::broadcast::channel(256)
}

/// Emit a progress event, silently ignoring send errors (which occur when no
/// receivers are listening).
pub fn emit(tx: &Option<ProgressSender>, run_id: &str, seq: &mut u64, event: ProgressEventKind) {
    if let Some(ref sender) = tx {
        *seq += 1;
        let _ = sender.send(ProgressEvent {
            run_id: run_id.to_string(),
            seq: *seq,
            event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_serialization() {
        let event = ProgressEvent {
            run_id: "spacedevs".to_string(),
            seq: 1,
            event: ProgressEventKind::PageFetched {
                offset: 100,
                page_records: 100,
                total_records: 100,
            },
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("PageFetched"));
        assert!(json.contains("spacedevs"));

        // Roundtrip
        let parsed: ProgressEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.run_id, "spacedevs");
        assert_eq!(parsed.seq, 1);
    }

    #[test]
    fn test_channel_no_receivers() {
        let (tx, rx) = channel();
        drop(rx); // No receivers
                  // Should not panic
        emit(
            &Some(tx),
            "test",
            &mut 0,
            ProgressEventKind::Warning {
                message: "test".to_string(),
            },
        );
    }

    #[test]
    fn test_emit_none_sender() {
        // Should be a no-op
        emit(
            &None,
            "test",
            &mut 0,
            ProgressEventKind::Warning {
                message: "test".to_string(),
            },
        );
    }

    #[test]
    fn test_emit_increments_seq() {
        let (tx, mut rx) = channel();
        let mut seq = 0;
        emit(
            &Some(tx.clone()),
            "run",
            &mut seq,
            ProgressEventKind::CheckpointSaved {
                offset: 100,
                records: 100,
            },
        );
        emit(
            &Some(tx),
            "run",
            &mut seq,
            ProgressEventKind::FetchComplete {
                records: 100,
                pages: 1,
                elapsed_ms: 5,
            },
        );
        assert_eq!(seq, 2);
        assert_eq!(rx.try_recv().unwrap().seq, 1);
        assert_eq!(rx.try_recv().unwrap().seq, 2);
    }
}
