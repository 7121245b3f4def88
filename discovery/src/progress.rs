//! Iteration-progress callbacks for the per-filter sweeps.
//!
//! Progress display is incidental UI, not part of the extraction contract;
//! the driver reports through this trait and callers decide what (if
//! anything) to render.

use tracing::{debug, info};

/// The two sequential per-filter sweeps of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Detail parsing (`-hh <name>`), first sweep.
    Details,
    /// Link parsing (`-h links <name>`), second sweep.
    Links,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "details",
            Self::Links => "links",
        }
    }
}

/// Observer notified as the driver walks the filter registry.
pub trait ProgressObserver {
    fn phase_started(&mut self, phase: Phase, total: usize);
    fn item_processed(&mut self, phase: Phase, name: &str, index: usize);
}

/// Observer that ignores all notifications.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn phase_started(&mut self, _phase: Phase, _total: usize) {}
    fn item_processed(&mut self, _phase: Phase, _name: &str, _index: usize) {}
}

/// Observer that logs through [`tracing`].
#[derive(Debug, Default)]
pub struct TracingProgress {
    total: usize,
}

impl ProgressObserver for TracingProgress {
    fn phase_started(&mut self, phase: Phase, total: usize) {
        self.total = total;
        info!(phase = phase.label(), total, "sweep started");
    }

    fn item_processed(&mut self, phase: Phase, name: &str, index: usize) {
        debug!(
            phase = phase.label(),
            filter = name,
            position = index + 1,
            total = self.total,
            "filter processed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observer used to assert sweep ordering in pipeline tests.
    #[derive(Debug, Default)]
    struct RecordingProgress {
        events: Vec<String>,
    }

    impl ProgressObserver for RecordingProgress {
        fn phase_started(&mut self, phase: Phase, total: usize) {
            self.events.push(format!("{}:{total}", phase.label()));
        }

        fn item_processed(&mut self, phase: Phase, name: &str, _index: usize) {
            self.events.push(format!("{}:{name}", phase.label()));
        }
    }

    #[test]
    fn test_recording_progress_accumulates_events() {
        let mut progress = RecordingProgress::default();
        progress.phase_started(Phase::Details, 2);
        progress.item_processed(Phase::Details, "fin", 0);
        progress.item_processed(Phase::Details, "aout", 1);

        assert_eq!(progress.events, vec!["details:2", "details:fin", "details:aout"]);
    }
}
