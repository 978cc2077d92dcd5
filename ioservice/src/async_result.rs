//! One-shot result cell bridging a kernel completion (arriving on whichever
//! worker thread owns the ring) to a user completer.
//!
//! Grounded on the teacher's `op_registration::OpRegistrationStatus`: the
//! result can either be set before anyone is waiting on it, or a waiter can
//! be registered before the result exists. Both orderings must work, since
//! the kernel completion and the call installing the completer race across
//! threads. The teacher models this as a four-state enum
//! (`Waiting`/`WaitingWithNotifier`/`DoneWithResultBeforeNotifier`/
//! `DoneWithResultAfterNotifier`); this is the same state machine collapsed
//! to the two states that matter once there's no separate "done, result
//! taken" bookkeeping to do (dropping the cell after the continuation runs
//! is enough).
//!
//! The original C++ `async_result_base<T>` stores `T` in a raw `alignas`
//! buffer with placement-new. This is an idiomatic substitution: `Option<T>`
//! gives the same one-shot-slot semantics without `unsafe`.

use crate::sync::Mutex;

enum Slot<T> {
  Empty,
  Waiting(Box<dyn FnOnce(T) + Send>),
  Done(T),
  Taken,
}

/// A move-only, one-shot result slot for a value of type `T`.
pub struct AsyncResult<T> {
  slot: Mutex<Slot<T>>,
}

impl<T> Default for AsyncResult<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> AsyncResult<T> {
  pub fn new() -> Self {
    Self { slot: Mutex::new(Slot::Empty) }
  }

  /// Stores the result, or — if a continuation is already waiting —
  /// invokes it immediately with `value`.
  ///
  /// # Panics
  /// Panics if called twice: a kernel completion fires for a given
  /// submission exactly once, and a second `set_result` indicates a logic
  /// error upstream (a stray or duplicated completion), not a recoverable
  /// condition.
  pub fn set_result(&self, value: T) {
    let mut guard = self.slot.lock();
    match std::mem::replace(&mut *guard, Slot::Taken) {
      Slot::Empty => *guard = Slot::Done(value),
      Slot::Waiting(continuation) => {
        drop(guard);
        continuation(value);
      }
      Slot::Done(_) => panic!("AsyncResult::set_result called twice"),
      Slot::Taken => panic!("AsyncResult::set_result called after the result was taken"),
    }
  }

  /// Installs `continuation` to run with the result: immediately, if the
  /// result is already in, or later from whichever thread calls
  /// `set_result`.
  ///
  /// # Panics
  /// Panics if called twice — an `AsyncResult` has exactly one consumer by
  /// construction (the completer composed alongside its initiator).
  pub fn get_result<F>(&self, continuation: F)
  where
    F: FnOnce(T) + Send + 'static,
    T: 'static,
  {
    let mut guard = self.slot.lock();
    match std::mem::replace(&mut *guard, Slot::Taken) {
      Slot::Empty => *guard = Slot::Waiting(Box::new(continuation)),
      Slot::Done(value) => {
        drop(guard);
        continuation(value);
      }
      Slot::Waiting(_) => panic!("AsyncResult::get_result called twice"),
      Slot::Taken => panic!("AsyncResult::get_result called after the result was taken"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicI32, Ordering};
  use std::sync::Arc;

  #[test]
  fn get_result_before_set_runs_continuation_on_set() {
    let cell = AsyncResult::<i32>::new();
    let seen = Arc::new(AtomicI32::new(0));
    let seen2 = seen.clone();
    cell.get_result(move |v| seen2.store(v, Ordering::SeqCst));
    assert_eq!(seen.load(Ordering::SeqCst), 0);
    cell.set_result(42);
    assert_eq!(seen.load(Ordering::SeqCst), 42);
  }

  #[test]
  fn set_before_get_runs_continuation_immediately_on_get() {
    let cell = AsyncResult::<&'static str>::new();
    cell.set_result("ready");
    let seen = Arc::new(Mutex::new(String::new()));
    let seen2 = seen.clone();
    cell.get_result(move |v| *seen2.lock() = v.to_string());
    assert_eq!(&*seen.lock(), "ready");
  }

  #[test]
  #[should_panic(expected = "set_result called twice")]
  fn double_set_panics() {
    let cell = AsyncResult::<i32>::new();
    cell.set_result(1);
    cell.set_result(2);
  }

  #[test]
  fn completion_can_arrive_from_another_thread() {
    let cell = Arc::new(AsyncResult::<i32>::new());
    let cell2 = cell.clone();
    let seen = Arc::new(AtomicI32::new(-1));
    let seen2 = seen.clone();
    cell.get_result(move |v| seen2.store(v, Ordering::SeqCst));
    let handle = std::thread::spawn(move || cell2.set_result(7));
    handle.join().unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 7);
  }
}
