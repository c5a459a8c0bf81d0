//! Watermark-based admission control.

/// Change of the source's read state after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Paused,
    Resumed,
    Unchanged,
}

/// Tracks in-flight inserts and decides when the source must stop reading.
///
/// Reading pauses once more than `high` inserts are pending and resumes once
/// fewer than `low` are. Both edges are evaluated after every dispatch and
/// every completion, so at most `high + 1` inserts are ever in flight.
#[derive(Debug)]
pub struct AdmissionController {
    pending: usize,
    paused: bool,
    high: usize,
    low: usize,
}

impl AdmissionController {
    pub fn new(high: usize, low: usize) -> Self {
        AdmissionController {
            pending: 0,
            paused: false,
            high,
            low,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Records a dispatched insert.
    pub fn on_dispatch(&mut self) -> Transition {
        self.pending += 1;
        self.evaluate()
    }

    /// Records a finished insert, successful or not.
    pub fn on_complete(&mut self) -> Transition {
        match self.pending.checked_sub(1) {
            Some(pending) => self.pending = pending,
            None => log::error!("Insert completed with no insert pending; ignoring"),
        }
        self.evaluate()
    }

    fn evaluate(&mut self) -> Transition {
        if !self.paused && self.pending > self.high {
            self.paused = true;
            Transition::Paused
        } else if self.paused && self.pending < self.low {
            self.paused = false;
            Transition::Resumed
        } else {
            Transition::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pauses_above_high_watermark() {
        let mut admission = AdmissionController::new(10, 5);
        for _ in 0..10 {
            assert_eq!(admission.on_dispatch(), Transition::Unchanged);
        }
        assert!(!admission.is_paused());
        assert_eq!(admission.on_dispatch(), Transition::Paused);
        assert_eq!(admission.pending(), 11);
        assert!(admission.is_paused());
    }

    #[test]
    fn test_resumes_below_low_watermark() {
        let mut admission = AdmissionController::new(10, 5);
        for _ in 0..11 {
            admission.on_dispatch();
        }
        // 10, 9, ..., 5 keep the source paused
        for _ in 0..6 {
            assert_eq!(admission.on_complete(), Transition::Unchanged);
            assert!(admission.is_paused());
        }
        assert_eq!(admission.on_complete(), Transition::Resumed);
        assert_eq!(admission.pending(), 4);
        assert!(!admission.is_paused());
    }

    #[test]
    fn test_completion_above_high_pauses() {
        let mut admission = AdmissionController::new(2, 1);
        admission.pending = 5;
        assert_eq!(admission.on_complete(), Transition::Paused);
        assert_eq!(admission.pending(), 4);
    }

    #[test]
    fn test_underflow_is_ignored() {
        let mut admission = AdmissionController::new(10, 5);
        assert_eq!(admission.on_complete(), Transition::Unchanged);
        assert_eq!(admission.pending(), 0);
        assert!(!admission.is_paused());
    }

    #[test]
    fn test_any_interleaving_keeps_invariants() {
        // Deterministic pseudo-random walk over dispatch/complete events
        let mut admission = AdmissionController::new(10, 5);
        let mut state: u32 = 0x2545_f491;
        for _ in 0..10_000 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;

            let was_paused = admission.is_paused();
            let dispatch = !was_paused && state % 3 != 0;
            let transition = if dispatch {
                admission.on_dispatch()
            } else {
                admission.on_complete()
            };
            let pending = admission.pending();

            match transition {
                Transition::Paused => assert!(!was_paused && pending > 10),
                Transition::Resumed => assert!(was_paused && pending < 5),
                Transition::Unchanged => {
                    if was_paused {
                        assert!(pending >= 5);
                    } else {
                        assert!(pending <= 10);
                    }
                }
            }
            assert!(pending <= 11);
        }
    }
}
