//! Pause/cancel flags shared between the command listener and the download thread.

use parking_lot::{Condvar, Mutex};
use std::ops::ControlFlow;
use std::time::Duration;

/// Re-check interval while paused, in case a wakeup is missed.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct Flags {
    paused: bool,
    canceled: bool,
}

/// Control State.
///
/// `canceled` only ever goes from false to true. `paused` toggles freely.
#[derive(Debug, Default)]
pub struct ControlState {
    flags: Mutex<Flags>,
    changed: Condvar,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_paused(&self, paused: bool) {
        self.flags.lock().paused = paused;
        self.changed.notify_all();
    }

    pub fn set_canceled(&self) {
        self.flags.lock().canceled = true;
        self.changed.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        self.flags.lock().paused
    }

    pub fn is_canceled(&self) -> bool {
        self.flags.lock().canceled
    }

    /// Block while paused and not canceled.
    ///
    /// Returns `Break` if the download should be aborted.
    pub fn wait_while_paused(&self) -> ControlFlow<()> {
        let mut flags = self.flags.lock();

        if flags.paused && !flags.canceled {
            tracing::debug!("download paused, waiting");
        }

        while flags.paused && !flags.canceled {
            self.changed.wait_for(&mut flags, PAUSE_POLL_INTERVAL);
        }

        if flags.canceled {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn starts_running() {
        let control = ControlState::new();
        assert!(!control.is_paused());
        assert!(!control.is_canceled());
        assert_eq!(control.wait_while_paused(), ControlFlow::Continue(()));
    }

    #[test]
    fn pause_toggles() {
        let control = ControlState::new();

        control.set_paused(true);
        assert!(control.is_paused());

        control.set_paused(false);
        assert!(!control.is_paused());
        assert!(!control.is_canceled());
    }

    #[test]
    fn cancel_is_sticky() {
        let control = ControlState::new();

        control.set_canceled();
        control.set_paused(true);
        control.set_paused(false);

        assert!(control.is_canceled());
        assert_eq!(control.wait_while_paused(), ControlFlow::Break(()));
    }

    #[test]
    fn cancel_wins_over_pause() {
        let control = ControlState::new();
        control.set_paused(true);
        control.set_canceled();

        assert_eq!(control.wait_while_paused(), ControlFlow::Break(()));
    }

    #[test]
    fn resume_releases_waiter() {
        let control = Arc::new(ControlState::new());
        control.set_paused(true);

        let (tx, rx) = mpsc::channel();
        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || tx.send(control.wait_while_paused()).unwrap())
        };

        // Still blocked after a couple of poll intervals
        assert!(rx.recv_timeout(PAUSE_POLL_INTERVAL * 2).is_err());

        control.set_paused(false);
        let flow = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(flow, ControlFlow::Continue(()));
        waiter.join().unwrap();
    }

    #[test]
    fn cancel_releases_waiter() {
        let control = Arc::new(ControlState::new());
        control.set_paused(true);

        let waiter = {
            let control = Arc::clone(&control);
            thread::spawn(move || control.wait_while_paused())
        };

        thread::sleep(Duration::from_millis(50));
        control.set_canceled();

        assert_eq!(waiter.join().unwrap(), ControlFlow::Break(()));
    }
}
