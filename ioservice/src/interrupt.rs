//! Reference-counted lifecycle control block shared by a service and its
//! workers.
//!
//! Grounded on `interrupt_flag.hpp`'s `detail::int_state_cb` /
//! `interrupt_flag`: a single `stopped` switch that flips exactly once,
//! an owner count the flag itself always contributes one to, an ordered
//! list of stop callbacks run exactly once, and `wait_all()` blocking until
//! every handle but the flag's own has been dropped.

use std::sync::Arc;

use crate::sync::{Condvar, Mutex};

struct State {
  owners: usize,
  stopped: bool,
  callbacks: Vec<Box<dyn FnOnce() + Send>>,
}

struct Inner {
  state: Mutex<State>,
  wait_cv: Condvar,
}

/// The shared control block a [`crate::Service`] owns. Cloning it is cheap
/// (an `Arc` bump) and does not count as taking ownership the way
/// [`InterruptFlag::make_handle`] does — a clone is just another reference
/// to the same flag, used internally to read its state without holding the
/// service's own lock.
#[derive(Clone)]
pub struct InterruptFlag {
  inner: Arc<Inner>,
}

/// Proof that a worker is currently enrolled under some `InterruptFlag`.
/// Dropping it decrements the flag's owner count; if that drops it to one
/// (nobody left but the flag itself), any thread blocked in
/// [`InterruptFlag::wait_all`] wakes up.
pub struct InterruptHandle {
  inner: Arc<Inner>,
}

impl PartialEq for InterruptHandle {
  fn eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl Default for InterruptFlag {
  fn default() -> Self {
    Self::new()
  }
}

impl InterruptFlag {
  pub fn new() -> Self {
    let inner = Arc::new(Inner {
      state: Mutex::new(State { owners: 1, stopped: false, callbacks: Vec::new() }),
      wait_cv: Condvar::new(),
    });
    Self { inner }
  }

  /// Registers a new owner iff the flag is not already stopped. Returns
  /// `None` once stopped — the caller (a would-be worker) should just
  /// return instead of enrolling into a service that's already shutting
  /// down.
  pub fn make_handle(&self) -> Option<InterruptHandle> {
    let mut state = self.inner.state.lock();
    if state.stopped {
      return None;
    }
    state.owners += 1;
    Some(InterruptHandle { inner: self.inner.clone() })
  }

  pub fn is_stopped(&self) -> bool {
    self.inner.state.lock().stopped
  }

  /// Registers `cb` to run exactly once, the first time [`Self::signal_stop`]
  /// is called. If the flag is already stopped, `cb` is dropped without
  /// ever running — there is no "stopped" edge left to fire it on.
  pub fn add_callback_on_stop<F>(&self, cb: F)
  where
    F: FnOnce() + Send + 'static,
  {
    let mut state = self.inner.state.lock();
    if state.stopped {
      return;
    }
    state.callbacks.push(Box::new(cb));
  }

  /// Flips `stopped` (a no-op if already stopped) and runs every registered
  /// stop callback, in registration order, exactly once.
  pub fn signal_stop(&self) {
    let callbacks = {
      let mut state = self.inner.state.lock();
      if state.stopped {
        return;
      }
      state.stopped = true;
      std::mem::take(&mut state.callbacks)
    };
    for cb in callbacks {
      cb();
    }
  }

  /// Blocks until every [`InterruptHandle`] issued by this flag has been
  /// dropped (the owner count has fallen back to the flag's own one).
  pub fn wait_all(&self) {
    let guard = self.inner.state.lock();
    let _guard =
      crate::sync::wait_while(&self.inner.wait_cv, guard, |s| s.owners != 1);
  }
}

impl Drop for InterruptHandle {
  fn drop(&mut self) {
    let notify = {
      let mut state = self.inner.state.lock();
      state.owners -= 1;
      state.owners == 1
    };
    // Notify after releasing the lock: `wait_all` re-checks the predicate
    // under its own lock acquisition, so this just avoids waking it only
    // to immediately block again on a mutex we're still holding.
    if notify {
      self.inner.wait_cv.notify_all();
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc as StdArc;
  use std::time::Duration;

  #[test]
  fn make_handle_fails_once_stopped() {
    let flag = InterruptFlag::new();
    flag.signal_stop();
    assert!(flag.make_handle().is_none());
  }

  #[test]
  fn stop_callbacks_run_exactly_once_in_order() {
    let flag = InterruptFlag::new();
    let seen = StdArc::new(Mutex::new(Vec::new()));
    for i in 0..3 {
      let seen = seen.clone();
      flag.add_callback_on_stop(move || seen.lock().push(i));
    }
    flag.signal_stop();
    flag.signal_stop();
    assert_eq!(*seen.lock(), vec![0, 1, 2]);
  }

  #[test]
  fn callback_registered_after_stop_never_runs() {
    let flag = InterruptFlag::new();
    flag.signal_stop();
    let ran = StdArc::new(std::sync::atomic::AtomicBool::new(false));
    let ran2 = ran.clone();
    flag.add_callback_on_stop(move || ran2.store(true, Ordering::SeqCst));
    assert!(!ran.load(Ordering::SeqCst));
  }

  #[test]
  fn wait_all_blocks_until_every_handle_drops() {
    let flag = InterruptFlag::new();
    let h1 = flag.make_handle().unwrap();
    let h2 = flag.make_handle().unwrap();

    let done = StdArc::new(AtomicUsize::new(0));
    let flag2 = flag.clone();
    let done2 = done.clone();
    let waiter = std::thread::spawn(move || {
      flag2.wait_all();
      done2.store(1, Ordering::SeqCst);
    });

    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(done.load(Ordering::SeqCst), 0);
    drop(h1);
    std::thread::sleep(Duration::from_millis(20));
    assert_eq!(done.load(Ordering::SeqCst), 0);
    drop(h2);
    waiter.join().unwrap();
    assert_eq!(done.load(Ordering::SeqCst), 1);
  }
}
