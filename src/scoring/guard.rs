use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "a mutation is outstanding" flag.
///
/// Views clone the guard to disable their submit controls; the orchestrator refuses to start a
/// second mutation while a ticket is held.
#[derive(Debug, Clone, Default)]
pub struct SubmissionGuard {
    busy: Arc<AtomicBool>,
}

impl SubmissionGuard {
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn try_acquire(&self) -> Option<SubmissionTicket> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmissionTicket {
                busy: Arc::clone(&self.busy),
            })
    }
}

/// Held for the whole duration of one mutation; released on drop.
#[derive(Debug)]
pub struct SubmissionTicket {
    busy: Arc<AtomicBool>,
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
