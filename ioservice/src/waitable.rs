//! A one-shot handle for a result computed by a posted task.
//!
//! Grounded on the teacher's `op_progress::BlockingReceiver<T>`: a thin
//! `mpsc::Receiver<T>` newtype. `post_waitable`/`dispatch_waitable`
//! (see [`crate::Service`]) pair it with an `mpsc::channel` sender that the
//! posted task fills exactly once.

use std::sync::mpsc;

/// Returned by [`crate::Service::post_waitable`] and
/// [`crate::Service::dispatch_waitable`]. Call [`Waitable::get`] to block
/// for the result, or poll with [`Waitable::try_get`] from inside a worker
/// loop (see `run_pending_task` in the S4 scenario, where a thread drains
/// its own queue instead of blocking while waiting on a sibling task).
pub struct Waitable<T> {
  rx: mpsc::Receiver<T>,
}

impl<T> Waitable<T> {
  pub(crate) fn new(rx: mpsc::Receiver<T>) -> Self {
    Self { rx }
  }

  /// Blocks until the task's result is available and returns it.
  ///
  /// # Panics
  /// Panics if the service dropped the task before it ran (e.g. it was
  /// still queued when `Service::stop` cleared the queue) — there is no
  /// result to return, and silently returning a default would hide a real
  /// bug in the caller's shutdown sequencing.
  pub fn get(self) -> T {
    self.rx.recv().expect("task was dropped before producing a result")
  }

  /// Non-blocking poll. Returns `None` if the result isn't ready yet.
  pub fn try_get(&self) -> Option<T> {
    self.rx.try_recv().ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn try_get_is_none_until_sent_then_some() {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    let waitable = Waitable::new(rx);
    assert!(waitable.try_get().is_none());
    tx.send(42).unwrap();
    assert_eq!(waitable.try_get(), Some(42));
  }

  #[test]
  fn get_blocks_until_sent() {
    let (tx, rx) = std::sync::mpsc::sync_channel(1);
    let waitable = Waitable::new(rx);
    let handle = std::thread::spawn(move || {
      std::thread::sleep(std::time::Duration::from_millis(20));
      tx.send("done").unwrap();
    });
    assert_eq!(waitable.get(), "done");
    handle.join().unwrap();
  }
}
