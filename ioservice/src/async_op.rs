//! The async operation protocol: an initiator stages a submission-queue
//! entry, a result cell carries the completion across threads, and a
//! completer runs once the kernel result is in.
//!
//! Grounded on `async_task.hpp`'s split between `async_init_*` (building the
//! submission, one struct per syscall shape: `async_read_init`,
//! `async_write_init`, `async_accept_init`, ...) and the opaque completion
//! continuation carried by `async_result`, and on `op::Operation` in the
//! teacher (`const OPCODE`, `fn create_entry`, `fn result(&mut self, ret)`).

use std::io;

use crate::async_result::AsyncResult;

/// One async operation: knows how to stage its submission-queue entry and
/// how to translate the raw kernel result into its own output type.
///
/// `Initiator` itself never touches a ring; [`crate::ring::RingCore::submit`]
/// does, treating this purely as "build an entry, then translate a result".
pub trait Initiator: Send + 'static {
  /// The value this operation produces, already translated from the raw
  /// `io::Result<i32>` a completion carries (e.g. `io::Result<usize>` bytes
  /// transferred for a read, or `io::Result<RawFd>` for an accept).
  type Output: Send + 'static;

  /// Builds the submission-queue entry for this operation.
  fn build(&mut self) -> ioring::submission::Entry;

  /// Translates the raw completion result (`res >= 0` on success, else the
  /// negated errno as an `io::Error`) into this operation's output.
  fn translate(self, raw: io::Result<i32>) -> Self::Output;
}

/// Implemented by whatever a ring core stores in its pending-entry registry.
/// Type-erases over the concrete `Initiator`/completer pair so a single
/// `HashMap<u64, Box<dyn PendingCompletion>>` can hold every in-flight
/// operation regardless of its output type.
pub trait PendingCompletion: Send {
  fn complete(self: Box<Self>, raw: io::Result<i32>);
}

struct Composed<I: Initiator> {
  initiator: I,
  result_cell: AsyncResult<I::Output>,
}

impl<I: Initiator> PendingCompletion for Composed<I> {
  fn complete(self: Box<Self>, raw: io::Result<i32>) {
    let output = self.initiator.translate(raw);
    self.result_cell.set_result(output);
  }
}

/// Pairs `initiator` with a fresh [`AsyncResult`] registered to run
/// `completer` when the result lands, and returns the boxed, type-erased
/// entry ready for a ring core's pending registry plus the entry to submit.
///
/// Splitting construction this way lets [`crate::ring::RingCore::submit`]
/// build the queue entry, insert the pending completion under its
/// submission id, and only then hand the entry to the kernel — so a
/// completion can never race ahead of its own registry entry.
pub(crate) fn compose<I, F>(
  mut initiator: I,
  completer: F,
) -> (ioring::submission::Entry, Box<dyn PendingCompletion>)
where
  I: Initiator,
  F: FnOnce(I::Output) + Send + 'static,
{
  let entry = initiator.build();
  let result_cell = AsyncResult::new();
  result_cell.get_result(completer);
  (entry, Box::new(Composed { initiator, result_cell }))
}

/// Converts a raw io_uring completion result (`res`) into `io::Result<i32>`:
/// non-negative is the success value, negative is `-res` as an errno.
pub(crate) fn raw_result(res: i32) -> io::Result<i32> {
  if res >= 0 {
    Ok(res)
  } else {
    Err(io::Error::from_raw_os_error(-res))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicI64, Ordering};
  use std::sync::Arc;

  struct FakeRead {
    fd: i32,
  }

  impl Initiator for FakeRead {
    type Output = io::Result<usize>;

    fn build(&mut self) -> ioring::submission::Entry {
      ioring::operation::Read::new(self.fd, std::ptr::null_mut(), 0).build()
    }

    fn translate(self, raw: io::Result<i32>) -> Self::Output {
      raw.map(|n| n as usize)
    }
  }

  #[test]
  fn compose_runs_completer_once_complete_is_called() {
    let seen = Arc::new(AtomicI64::new(-1));
    let seen2 = seen.clone();
    let (_entry, pending) = compose(FakeRead { fd: -1 }, move |result: io::Result<usize>| {
      seen2.store(result.unwrap() as i64, Ordering::SeqCst);
    });
    pending.complete(Ok(128));
    assert_eq!(seen.load(Ordering::SeqCst), 128);
  }

  #[test]
  fn negative_result_becomes_an_io_error() {
    let seen = Arc::new(std::sync::Mutex::new(None));
    let seen2 = seen.clone();
    let (_entry, pending) = compose(FakeRead { fd: -1 }, move |result: io::Result<usize>| {
      *seen2.lock().unwrap() = Some(result.is_err());
    });
    pending.complete(raw_result(-(libc::ENOENT)));
    assert_eq!(*seen.lock().unwrap(), Some(true));
  }
}
