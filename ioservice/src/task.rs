//! The unit of work posted to a [`crate::Service`].

/// A single unit of deferred work: a type-erased, move-only, run-exactly-once
/// closure.
///
/// Grounded on the teacher's `op_registration::OpCallback` type-erasure idiom,
/// simplified here to a boxed `FnOnce` since `Task` carries no completion
/// payload of its own (that's [`crate::async_result::AsyncResult`]'s job).
pub struct Task {
  body: Box<dyn FnOnce() + Send + 'static>,
}

impl Task {
  /// Wraps `f` as a task. `f` runs at most once, when [`Task::invoke`] is
  /// called.
  pub fn new<F>(f: F) -> Self
  where
    F: FnOnce() + Send + 'static,
  {
    Self { body: Box::new(f) }
  }

  /// Runs the task, consuming it. There is no `run()` that takes `&self`:
  /// a `Task` is affine, exactly like the handlers `strand`/`io_service`
  /// schedule in the original — it is invoked exactly once.
  pub fn invoke(self) {
    (self.body)()
  }
}

impl std::fmt::Debug for Task {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Task").finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::Arc;

  #[test]
  fn invoke_runs_the_closure_once() {
    let ran = Arc::new(AtomicBool::new(false));
    let ran2 = ran.clone();
    let task = Task::new(move || ran2.store(true, Ordering::SeqCst));
    task.invoke();
    assert!(ran.load(Ordering::SeqCst));
  }

  #[test]
  fn task_is_sendable_across_threads() {
    let task = Task::new(|| {});
    let handle = std::thread::spawn(move || task.invoke());
    handle.join().unwrap();
  }
}
