//! Structured logging for transfer submissions
//!
//! Every lifecycle step is emitted as a `tracing` event and kept in a bounded
//! in-memory log that can be exported for diagnostics.

use crate::config::LogConfig;
use nam_transfer_core::{Error, TransferKind, TransferStep};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::{debug, error, info, warn};

/// Maximum number of events kept in memory
pub const MAX_EVENTS: usize = 256;

/// Transfer lifecycle event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransferEvent {
    /// Submit was requested
    SubmissionStarted {
        /// Resolved transfer kind
        kind: TransferKind,
    },
    /// A precondition check failed
    PreconditionFailed {
        /// Error message
        message: String,
    },
    /// Signing service invoked
    Signing {
        /// Transfer kind
        kind: TransferKind,
        /// Event type of the variant
        event_type: String,
    },
    /// Record produced and stored
    Completed {
        /// Transfer kind
        kind: TransferKind,
        /// Inner transaction hash
        hash: String,
    },
    /// Submission failed after preconditions
    Failed {
        /// Error category
        category: String,
        /// Error message
        message: String,
    },
    /// Submission dropped while waiting for the signing service
    Abandoned {
        /// Transfer kind
        kind: TransferKind,
    },
    /// Displayed record replaced by the stored version
    RecordReplaced {
        /// Inner transaction hash
        hash: String,
        /// Step of the stored record
        step: TransferStep,
    },
}

/// Transfer event logger, shareable between controller and tracker
#[derive(Debug, Default)]
pub struct TransferEventLogger {
    events: Mutex<VecDeque<TransferEvent>>,
}

impl TransferEventLogger {
    /// Create new logger
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: TransferEvent) {
        let mut events = self.events.lock();
        if events.len() == MAX_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Log submission start
    pub fn log_submission_started(&self, kind: TransferKind) {
        debug!(
            event = "transfer_submission_started",
            kind = %kind,
            "Transfer submission started"
        );
        self.push(TransferEvent::SubmissionStarted { kind });
    }

    /// Log precondition failure
    pub fn log_precondition_failed(&self, err: &Error) {
        warn!(
            event = "transfer_precondition_failed",
            error = %err,
            "Transfer precondition not met"
        );
        self.push(TransferEvent::PreconditionFailed {
            message: err.to_string(),
        });
    }

    /// Log signing start
    pub fn log_signing(&self, kind: TransferKind, event_type: &str) {
        info!(
            event = "transfer_signing",
            kind = %kind,
            event_type = %event_type,
            "Transfer sent for signing"
        );
        self.push(TransferEvent::Signing {
            kind,
            event_type: event_type.to_string(),
        });
    }

    /// Log completion
    pub fn log_completed(&self, kind: TransferKind, hash: &str) {
        info!(
            event = "transfer_completed",
            kind = %kind,
            hash = %hash,
            "Transfer broadcast and stored"
        );
        self.push(TransferEvent::Completed {
            kind,
            hash: hash.to_string(),
        });
    }

    /// Log a submission dropped mid-signing
    pub fn log_abandoned(&self, kind: TransferKind) {
        warn!(
            event = "transfer_abandoned",
            kind = %kind,
            "Transfer submission dropped while signing"
        );
        self.push(TransferEvent::Abandoned { kind });
    }

    /// Log failure
    pub fn log_failed(&self, err: &Error) {
        error!(
            event = "transfer_failed",
            category = %err.category(),
            error = %err,
            "Transfer failed"
        );
        self.push(TransferEvent::Failed {
            category: err.category().to_string(),
            message: err.to_string(),
        });
    }

    /// Log record replacement from the store
    pub fn log_record_replaced(&self, hash: &str, step: TransferStep) {
        debug!(
            event = "transfer_record_replaced",
            hash = %hash,
            step = ?step,
            "Displayed transfer refreshed from store"
        );
        self.push(TransferEvent::RecordReplaced {
            hash: hash.to_string(),
            step,
        });
    }

    /// Snapshot of logged events, oldest first
    pub fn events(&self) -> Vec<TransferEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Export events as JSON lines for diagnostics
    pub fn export(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| serde_json::to_string(event).ok())
            .collect()
    }

    /// Clear all events
    pub fn clear(&self) {
        self.events.lock().clear();
        debug!("Transfer event log cleared");
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a subscriber was already installed.
pub fn init_logging(config: &LogConfig) -> bool {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = if config.json {
        builder
            .json()
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        info!(filter = %config.level, json = config.json, "Logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_records_events() {
        let logger = TransferEventLogger::new();
        logger.log_submission_started(TransferKind::ShieldedToShielded);
        logger.log_signing(TransferKind::ShieldedToShielded, "ShieldedTransfer");
        logger.log_completed(TransferKind::ShieldedToShielded, "AB12");

        let events = logger.events();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[2],
            TransferEvent::Completed {
                kind: TransferKind::ShieldedToShielded,
                hash: "AB12".to_string()
            }
        );
    }

    #[test]
    fn test_logger_is_bounded() {
        let logger = TransferEventLogger::new();
        for _ in 0..MAX_EVENTS + 10 {
            logger.log_precondition_failed(&Error::NoGasConfig);
        }
        assert_eq!(logger.events().len(), MAX_EVENTS);
    }

    #[test]
    fn test_logger_export_and_clear() {
        let logger = TransferEventLogger::new();
        logger.log_failed(&Error::EmptyTransferData);

        let export = logger.export();
        assert_eq!(export.len(), 1);
        assert!(export[0].contains(r#""event":"failed""#));
        assert!(export[0].contains("Response"));

        logger.clear();
        assert!(logger.events().is_empty());
    }
}
