use std::fmt::Debug;
use std::time::Instant;

/// Source of the current instant for time-windowed decisions.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) mod manual {
    use super::Clock;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Clock that only moves when a test advances it. Clones share the same time.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        current: Arc<Mutex<Instant>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                current: Arc::new(Mutex::new(Instant::now())),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut current = self.current.lock().unwrap();
            *current += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.current.lock().unwrap()
        }
    }
}
