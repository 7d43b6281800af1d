//! Serialization gate for isolated spies.

/// Capability marker for traits whose implementors form an isolation unit.
///
/// Declaring it as a supertrait makes the generator emit an isolated spy:
/// `async` requirements take a turn on the spy's [`Isolation`] before their
/// bookkeeping, while state accessors stay callable without a turn.
pub trait Isolated: Send + Sync {}

/// FIFO-fair gate that admits one invocation at a time.
#[derive(Debug, Default)]
pub struct Isolation {
    gate: tokio::sync::Mutex<()>,
}

/// Proof of holding the isolation; the turn ends when it is dropped.
#[derive(Debug)]
pub struct IsolationTurn<'a> {
    _guard: tokio::sync::MutexGuard<'a, ()>,
}

impl Isolation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for this caller's turn, suspending while another invocation holds it.
    pub async fn enter(&self) -> IsolationTurn<'_> {
        IsolationTurn {
            _guard: self.gate.lock().await,
        }
    }

    /// Takes a turn only if the gate is free right now.
    pub fn try_enter(&self) -> Option<IsolationTurn<'_>> {
        self.gate
            .try_lock()
            .ok()
            .map(|guard| IsolationTurn { _guard: guard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_turns_are_exclusive() {
        let isolation = Isolation::new();
        let turn = isolation.enter().await;
        assert!(isolation.try_enter().is_none());
        drop(turn);
        assert!(isolation.try_enter().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_waiting_caller_resumes_after_release() {
        let isolation = Arc::new(Isolation::new());
        let turn = isolation.enter().await;

        let waiter = {
            let isolation = Arc::clone(&isolation);
            tokio::spawn(async move {
                let _turn = isolation.enter().await;
                "admitted"
            })
        };

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());
        drop(turn);
        assert_eq!(waiter.await.unwrap(), "admitted");
    }
}
