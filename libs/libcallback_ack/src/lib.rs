// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! One-shot handshake between a callback delivered on a binder dispatch thread and a test thread
//! that waits for it.
//!
//! A listener owns a [`NotificationFlag`]. The callback sets the flag and wakes every waiter; the
//! test thread calls [`NotificationFlag::await_notification`], which returns as soon as the flag
//! is observed set, or `false` once the timeout has elapsed. The flag never goes back to unset,
//! so a notification that lands before the test starts waiting is not lost.

use log::debug;
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// How long fixtures wait for a listener to be notified.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(2);

/// Result of a bounded wait on a [`NotificationFlag`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The flag was observed set.
    Signaled,
    /// The timeout elapsed with the flag still unset.
    TimedOut,
}

impl WaitOutcome {
    /// Returns true for [`WaitOutcome::Signaled`].
    pub fn is_signaled(self) -> bool {
        self == WaitOutcome::Signaled
    }
}

/// A boolean that goes from unset to set at most once, together with the condition variable
/// used to wait for that transition.
#[derive(Debug, Default)]
pub struct NotificationFlag {
    signaled: Mutex<bool>,
    cond: Condvar,
}

impl NotificationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the flag has been set.
    pub fn get(&self) -> bool {
        *self.signaled.lock().unwrap()
    }

    /// Sets the flag. Setting an already set flag leaves it set.
    pub fn set(&self) {
        let mut signaled = self.signaled.lock().unwrap();
        if *signaled {
            debug!("Notification flag already set");
        }
        *signaled = true;
    }

    /// Wakes every thread blocked in [`NotificationFlag::wait_up_to`].
    pub fn notify_all(&self) {
        // Taking the lock orders the wakeup after any waiter that has checked the flag but not
        // yet started waiting.
        let _signaled = self.signaled.lock().unwrap();
        self.cond.notify_all();
    }

    /// Sets the flag and wakes every waiter.
    pub fn signal(&self) {
        self.set();
        self.notify_all();
    }

    /// Blocks until the flag is set or `timeout` has elapsed, whichever comes first.
    ///
    /// Returns immediately when the flag is already set, including for a zero timeout. Spurious
    /// wakeups are absorbed by re-checking the flag against the remaining budget.
    pub fn wait_up_to(&self, timeout: Duration) -> WaitOutcome {
        let deadline = Instant::now().checked_add(timeout);
        let mut signaled = self.signaled.lock().unwrap();
        while !*signaled {
            let Some(deadline) = deadline else {
                signaled = self.cond.wait(signaled).unwrap();
                continue;
            };
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return WaitOutcome::TimedOut;
            }
            signaled = self.cond.wait_timeout(signaled, remaining).unwrap().0;
        }
        WaitOutcome::Signaled
    }

    /// Returns true iff the flag was observed set within `timeout`.
    pub fn await_notification(&self, timeout: Duration) -> bool {
        self.wait_up_to(timeout).is_signaled()
    }
}
