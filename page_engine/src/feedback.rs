// Copy-button acknowledgment: show "copied" for a fixed time, then revert.
// Failures are logged and never shown to the user.

use tracing::{debug, warn};

use crate::host::FeedbackHost;
use crate::types::Millis;

/// How long the acknowledgment stays visible.
pub const ACKNOWLEDGE_DURATION: Millis = Millis::from_millis(2000);

pub struct CopyFeedback<H: FeedbackHost> {
    host: H,
    acknowledged: bool,
    // Bumped on every success so that an older revert cannot cut a newer one short.
    generation: u64,
}

impl<H: FeedbackHost> CopyFeedback<H> {
    pub fn new(host: H) -> Self {
        CopyFeedback {
            host,
            acknowledged: false,
            generation: 0,
        }
    }

    /// Report the outcome of a clipboard write.
    pub fn on_copy_result(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.generation += 1;
                self.acknowledged = true;
                self.host.show_acknowledged(true);
                self.host
                    .schedule_revert(ACKNOWLEDGE_DURATION, self.generation);
                debug!(generation = self.generation, "copy acknowledged");
            }
            Err(reason) => warn!(%reason, "failed to copy to clipboard"),
        }
    }

    /// Scheduled revert fired.
    pub fn on_revert(&mut self, generation: u64) {
        if generation != self.generation || !self.acknowledged {
            return;
        }
        self.acknowledged = false;
        self.host.show_acknowledged(false);
    }

    pub fn is_acknowledged(&self) -> bool {
        self.acknowledged
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeButton {
        shown: Vec<bool>,
        scheduled: Vec<(Millis, u64)>,
    }

    impl FeedbackHost for FakeButton {
        fn show_acknowledged(&mut self, acknowledged: bool) {
            self.shown.push(acknowledged);
        }

        fn schedule_revert(&mut self, delay: Millis, generation: u64) {
            self.scheduled.push((delay, generation));
        }
    }

    #[test]
    fn success_acknowledges_for_two_seconds() {
        let mut feedback = CopyFeedback::new(FakeButton::default());
        feedback.on_copy_result(Ok(()));
        assert!(feedback.is_acknowledged());
        assert_eq!(
            feedback.host().scheduled,
            vec![(Millis::from_millis(2000), 1)]
        );

        feedback.on_revert(1);
        assert!(!feedback.is_acknowledged());
        assert_eq!(feedback.host().shown, vec![true, false]);
    }

    #[test]
    fn failure_changes_nothing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let mut feedback = CopyFeedback::new(FakeButton::default());
        feedback.on_copy_result(Err("permission denied".to_string()));
        assert!(!feedback.is_acknowledged());
        assert!(feedback.host().shown.is_empty());
        assert!(feedback.host().scheduled.is_empty());
    }

    #[test]
    fn stale_revert_is_ignored() {
        let mut feedback = CopyFeedback::new(FakeButton::default());
        feedback.on_copy_result(Ok(()));
        feedback.on_copy_result(Ok(()));
        feedback.on_revert(1);
        assert!(feedback.is_acknowledged());
        feedback.on_revert(2);
        assert!(!feedback.is_acknowledged());
    }
}
