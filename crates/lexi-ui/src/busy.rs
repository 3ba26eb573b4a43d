use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set while the selection toolbar waits on a capability call
#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// `None` when already busy. The flag clears when the guard drops, also on early return or panic.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                busy: self.busy.clone(),
            })
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_holder_at_a_time() {
        let flag = BusyFlag::new();

        let guard = flag.try_acquire().unwrap();
        assert!(flag.is_busy());
        assert!(flag.clone().try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_acquire().is_some());
    }

    #[tokio::test]
    async fn cleared_when_the_task_fails() {
        let flag = BusyFlag::new();
        let held = flag.clone();

        let result = tokio::spawn(async move {
            let _guard = held.try_acquire().unwrap();
            panic!("translation blew up");
        })
        .await;

        assert!(result.is_err());
        assert!(!flag.is_busy());
    }
}
