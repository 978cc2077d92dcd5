//! Async posters: façades that package an initiator/completer pair into a
//! task and hand it to an executor's [`Service::dispatch`], so that staging
//! happens inline when the caller already is a worker of that executor.
//!
//! Grounded on `uring_async.hpp`'s two post forms — one that stages a ring
//! operation, one that runs an arbitrary computation on the executor and
//! hands the result to a completer. The ring form keeps the original's
//! split between "build the submission" and "handle the result" via
//! [`crate::async_op::Initiator`]; the compute form collapses the
//! original's `op()` / `comp(async_result<T>)` pair into a single posted
//! closure, since both run on the same dispatch with nothing in between
//! worth modeling as a separate result cell.

use crate::async_op::Initiator;
use crate::error::ServiceError;
use crate::service::Service;

/// Stages `initiator`'s submission-queue entry on `service`'s calling
/// worker thread (or, if the caller isn't currently one of `service`'s
/// workers, posts the staging itself so it happens on whichever worker
/// picks up the task) and arranges for `completer` to run once the kernel
/// completion lands.
pub fn post_ring<I, F>(
  service: &Service,
  initiator: I,
  completer: F,
) -> Result<(), ServiceError>
where
  I: Initiator,
  F: FnOnce(I::Output) + Send + 'static,
{
  service.dispatch(move || match Service::submit_ring(initiator, completer) {
    Some(Ok(())) => {}
    Some(Err(err)) => {
      tracing::error!(error = %err, "ring submission failed");
    }
    None => {
      tracing::error!(
        "post_ring's task ran on a thread with no worker ring core installed"
      );
    }
  })
}

/// Runs `op` on `service` (inline if already a worker, else posted) and
/// passes its result to `comp`, on the same dispatch.
pub fn post_compute<T, F, C>(
  service: &Service,
  op: F,
  comp: C,
) -> Result<(), ServiceError>
where
  T: Send + 'static,
  F: FnOnce() -> T + Send + 'static,
  C: FnOnce(T) + Send + 'static,
{
  service.dispatch(move || comp(op()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicI32, Ordering};
  use std::sync::Arc;

  #[test]
  fn post_compute_delivers_result_on_the_owning_service() {
    let service = Arc::new(Service::new());
    let seen = Arc::new(AtomicI32::new(0));
    let seen2 = seen.clone();
    post_compute(&service, || 2 + 2, move |v| seen2.store(v, Ordering::SeqCst))
      .unwrap();
    assert!(service.run_pending_task());
    assert_eq!(seen.load(Ordering::SeqCst), 4);
  }
}
