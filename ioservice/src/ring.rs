//! Per-worker ring core: owns one io_uring submission/completion pair and
//! the registry mapping in-flight submission ids back to their pending
//! completions.
//!
//! Grounded on `backends/io_uring.rs`'s `IoUringSubmitter`/`IoUringHandler`
//! (build entry, tag with an id, push, submit; drain completions by id) and
//! on `uring_async.hpp`'s `operator()(uring&)` initiators
//! (`get_sqe()` → `io_uring_prep_*` → `submit()`). Unlike the teacher, this
//! talks to the local `ioring` crate directly rather than the external
//! `io_uring` crate the teacher's `backends/io_uring.rs` depends on (a
//! dependency never actually listed in its own `Cargo.toml` — a drift this
//! rewrite resolves instead of reproducing).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::sync::Mutex as StdMutex;
use std::sync::OnceLock;

use ioring::completion::CompletionQueue;
use ioring::submission::SubmissionQueue;

use crate::async_op::{compose, raw_result, Initiator, PendingCompletion};

/// `user_data` tag used for the internal wake-up NOP pushed by
/// [`RingCore::wake`]. Real submissions get ids from [`RingCore::alloc_id`],
/// which starts at 0 and never produces `u64::MAX` within the lifetime of
/// any one ring (monotonic, process-realistic workloads never submit
/// `2^64` operations on a single ring).
const WAKE_TOKEN: u64 = u64::MAX;

/// Process-wide registry of ring fds available to share an async worker
/// pool with, via `IORING_SETUP_ATTACH_WQ`. Grounded on C8's "shared ring
/// work queues" feature: any ring can publish its fd here for later rings
/// to attach to, guarded by one mutex since it's touched rarely (ring
/// construction) compared to steady-state submit/complete traffic.
static SHARED_WORK_QUEUES: OnceLock<StdMutex<Vec<i32>>> = OnceLock::new();

fn shared_work_queues() -> &'static StdMutex<Vec<i32>> {
  SHARED_WORK_QUEUES.get_or_init(|| StdMutex::new(Vec::new()))
}

/// Publishes `fd` so a later [`RingCore::new_attached`] call can share its
/// worker pool.
pub fn publish_work_queue(fd: i32) {
  shared_work_queues().lock().unwrap_or_else(|e| e.into_inner()).push(fd);
}

/// Returns the most recently published ring fd, if any, to attach to.
pub fn any_shared_work_queue() -> Option<i32> {
  shared_work_queues()
    .lock()
    .unwrap_or_else(|e| e.into_inner())
    .last()
    .copied()
}

pub struct RingCore {
  sq: RefCell<SubmissionQueue>,
  cq: RefCell<CompletionQueue>,
  pending: RefCell<HashMap<u64, Box<dyn PendingCompletion>>>,
  next_id: Cell<u64>,
}

impl RingCore {
  /// Stands up a ring with `entries` submission-queue slots.
  pub fn new(entries: u32) -> io::Result<Self> {
    let (sq, cq) = ioring::with_capacity(entries)?;
    Ok(Self {
      sq: RefCell::new(sq),
      cq: RefCell::new(cq),
      pending: RefCell::new(HashMap::new()),
      next_id: Cell::new(0),
    })
  }

  /// Stands up a ring sharing another ring's async worker pool, if one has
  /// been published via [`publish_work_queue`]. Falls back to an
  /// unattached ring otherwise.
  pub fn new_attached(entries: u32) -> io::Result<Self> {
    let params = ioring::IoUringParams { sq_entries: entries, ..Default::default() };
    let params = match any_shared_work_queue() {
      Some(fd) => params.attach_wq(fd),
      None => params,
    };
    let (sq, cq) = ioring::with_params(params)?;
    publish_work_queue(sq.raw_fd());
    Ok(Self {
      sq: RefCell::new(sq),
      cq: RefCell::new(cq),
      pending: RefCell::new(HashMap::new()),
      next_id: Cell::new(0),
    })
  }

  fn alloc_id(&self) -> u64 {
    let id = self.next_id.get();
    self.next_id.set(id.wrapping_add(1));
    if id == WAKE_TOKEN {
      self.next_id.set(0);
      return self.alloc_id();
    }
    id
  }

  /// Stages `initiator`'s entry and registers `completer` to run, on this
  /// worker, once the matching completion arrives. Does not flush to the
  /// kernel by itself — call [`Self::flush`] (the worker loop does this
  /// once per iteration after draining the task queue, batching whatever
  /// operations were staged in between).
  pub fn submit<I, F>(&self, initiator: I, completer: F) -> io::Result<()>
  where
    I: Initiator,
    F: FnOnce(I::Output) + Send + 'static,
  {
    let id = self.alloc_id();
    let (entry, pending) = compose(initiator, completer);
    self.pending.borrow_mut().insert(id, pending);
    let result = unsafe { self.sq.borrow_mut().push(entry, id) };
    if result.is_err() {
      self.pending.borrow_mut().remove(&id);
    }
    result
  }

  /// Flushes staged submissions to the kernel.
  pub fn flush(&self) -> io::Result<usize> {
    self.sq.borrow_mut().submit()
  }

  /// True if this ring has operations registered that haven't completed
  /// yet. The worker loop uses this to decide whether it can block
  /// indefinitely on the task queue or must poll this ring periodically.
  pub fn has_outstanding(&self) -> bool {
    !self.pending.borrow().is_empty()
  }

  /// Drains every completion currently available without blocking, routing
  /// each to its registered completer. Returns the number handled.
  pub fn poll_completions(&self) -> io::Result<usize> {
    let mut handled = 0;
    loop {
      let completion = self.cq.borrow_mut().try_next()?;
      let Some(completion) = completion else { break };
      handled += 1;
      if completion.user_data() == WAKE_TOKEN {
        continue;
      }
      if completion.has_more() {
        // Multi-shot completion: more are still coming for this same
        // submission. The pending entry stays registered; nothing here
        // consumes it. See SPEC_FULL.md's open question on multi-shot
        // completions — no user-facing per-shot callback exists yet.
        tracing::trace!(
          user_data = completion.user_data(),
          "multi-shot completion, pending entry left registered"
        );
        continue;
      }
      let pending = self.pending.borrow_mut().remove(&completion.user_data());
      match pending {
        Some(p) => p.complete(raw_result(completion.result())),
        None => panic!(
          "stray completion with user_data {} has no matching pending entry",
          completion.user_data()
        ),
      }
    }
    Ok(handled)
  }

  /// Forces a blocked kernel wait on this ring to return, by pushing and
  /// submitting a tagged no-op. Grounded on `IoUringSubmitter::notify` in
  /// the teacher, which does the same with `user_data = u64::MAX`. Unused
  /// while the worker loop only polls this ring non-blockingly, but kept
  /// as the documented extension point for a future blocking
  /// `submit_and_wait`-based loop (see the open question on CQE_F_MORE and
  /// blocking waits in SPEC_FULL.md).
  pub fn wake(&self) -> io::Result<()> {
    let entry = ioring::operation::Nop {}.build();
    unsafe { self.sq.borrow_mut().push(entry, WAKE_TOKEN)? };
    self.sq.borrow_mut().submit()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // RingCore::new requires a real io_uring-capable kernel; these exercise
  // the id-allocation and pending-registry bookkeeping in isolation instead
  // of standing up a real ring, mirroring how `op_registration.rs`'s own
  // tests exercise the registration state machine without a real backend.

  #[test]
  fn wake_token_is_never_handed_out_by_alloc_id() {
    // alloc_id must skip WAKE_TOKEN even if next_id wraps onto it.
    let core = RingCoreIdOnly { next_id: Cell::new(u64::MAX) };
    assert_ne!(core.alloc_id(), WAKE_TOKEN);
  }

  struct RingCoreIdOnly {
    next_id: Cell<u64>,
  }

  impl RingCoreIdOnly {
    fn alloc_id(&self) -> u64 {
      let id = self.next_id.get();
      self.next_id.set(id.wrapping_add(1));
      if id == WAKE_TOKEN {
        self.next_id.set(0);
        return self.alloc_id();
      }
      id
    }
  }
}
