//! The proactor executor: `post`/`dispatch` a task, `run` a worker loop on
//! the calling thread, `stop`/`restart` the whole service.
//!
//! Grounded on `Lio`'s `run`/`try_run`/`run_timeout` naming (`lio.rs`) and on
//! `Driver`'s worker-thread loop (`driver.rs`'s `spawn_worker`), recombined
//! around [`crate::queue::TaskQueue`] and [`crate::interrupt::InterruptFlag`]
//! into the multi-threaded `post`/`dispatch` model: many callers enqueue
//! work, any number of threads may call [`Service::run`] to become workers,
//! and each worker alternates between draining its own ring core and
//! blocking on the shared task queue.

use std::cell::RefCell;
use std::sync::mpsc;
use std::time::Duration;

use crate::async_op::Initiator;
use crate::callstack::CallstackMarker;
use crate::error::ServiceError;
use crate::interrupt::InterruptFlag;
use crate::queue::TaskQueue;
use crate::ring::RingCore;
use crate::sync::Mutex;
use crate::task::Task;
use crate::waitable::Waitable;

/// Submission-queue entries a worker's ring core is created with. Chosen to
/// comfortably hold a busy echo server's in-flight reads/writes/accepts
/// without forcing a `submit()` mid-batch; workers that never touch the
/// ring pay only the cost of an empty `io_uring_queue_init`.
const RING_ENTRIES: u32 = 256;

/// How long a worker with outstanding ring operations blocks on the task
/// queue before giving up and re-polling its ring. Ring completions don't
/// wake the queue's condvar, so this bounds the latency between a
/// completion landing and its completer running while the queue itself
/// stays quiet.
const RING_POLL_INTERVAL: Duration = Duration::from_millis(10);

thread_local! {
  static WORKER_RING: RefCell<Option<RingCore>> = const { RefCell::new(None) };
}

/// Runs `f` with the calling thread's current worker ring core, if it is
/// currently inside some [`Service::run`]. Used by [`crate::poster`] to
/// stage ring operations without needing the `Service` itself threaded
/// through every call site.
pub(crate) fn with_worker_ring<R>(f: impl FnOnce(&RingCore) -> R) -> Option<R> {
  WORKER_RING.with(|cell| cell.borrow().as_ref().map(f))
}

struct RingGuard;

impl Drop for RingGuard {
  fn drop(&mut self) {
    WORKER_RING.with(|cell| *cell.borrow_mut() = None);
  }
}

/// The proactor executor: a shared task queue plus a lifecycle flag.
///
/// Grounded on `driver::Driver`'s process-wide singleton, generalized here
/// to an ordinary value so a program can run more than one `Service` (see
/// the cross-service dispatch scenario this crate's tests exercise).
pub struct Service {
  queue: std::sync::Arc<TaskQueue>,
  flag: Mutex<InterruptFlag>,
  share_ring_work_queue: bool,
}

impl Default for Service {
  fn default() -> Self {
    Self::new()
  }
}

impl std::fmt::Debug for Service {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Service").finish_non_exhaustive()
  }
}

impl Service {
  pub fn new() -> Self {
    let queue = std::sync::Arc::new(TaskQueue::new());
    let flag = Self::fresh_flag(&queue);
    Self { queue, flag: Mutex::new(flag), share_ring_work_queue: false }
  }

  /// Like [`Self::new`], except every worker's ring core is built with
  /// [`RingCore::new_attached`] instead of [`RingCore::new`]: its kernel
  /// async worker pool is shared with whatever ring (in this process, any
  /// service) last published its fd, and its own fd is published in turn
  /// for the next one. Lets several services avoid spinning up a kernel
  /// worker pool each, at the cost of those services' in-flight work
  /// competing for the same pool.
  pub fn new_sharing_ring_work_queue() -> Self {
    let queue = std::sync::Arc::new(TaskQueue::new());
    let flag = Self::fresh_flag(&queue);
    Self { queue, flag: Mutex::new(flag), share_ring_work_queue: true }
  }

  fn fresh_flag(queue: &std::sync::Arc<TaskQueue>) -> InterruptFlag {
    let flag = InterruptFlag::new();
    let queue = queue.clone();
    flag.add_callback_on_stop(move || queue.signal());
    flag
  }

  fn current_flag(&self) -> InterruptFlag {
    self.flag.lock().clone()
  }

  /// True if the calling thread is currently inside this exact service's
  /// [`Service::run`] loop (possibly several frames up, e.g. running a
  /// task that is itself calling `dispatch`). Exposed to
  /// [`crate::strand::Strand`], which needs the same "am I on a worker of
  /// the backing executor" check to decide whether inline dispatch is even
  /// possible.
  pub(crate) fn is_worker_of_this(&self) -> bool {
    CallstackMarker::<Service, ()>::contains(self).is_some()
  }

  /// Enqueues a task built from `f`. Fails if the service is stopped and
  /// has not been `restart`ed since.
  pub fn post<F>(&self, f: F) -> Result<(), ServiceError>
  where
    F: FnOnce() + Send + 'static,
  {
    if self.current_flag().is_stopped() {
      return Err(ServiceError::Stopped);
    }
    self.queue.push(Task::new(f));
    Ok(())
  }

  /// Runs `f` inline if the calling thread is already a worker of this
  /// service; otherwise behaves exactly like [`Service::post`].
  pub fn dispatch<F>(&self, f: F) -> Result<(), ServiceError>
  where
    F: FnOnce() + Send + 'static,
  {
    if self.is_worker_of_this() {
      f();
      return Ok(());
    }
    self.post(f)
  }

  /// Like [`Service::post`], but returns a [`Waitable`] for `f`'s result
  /// instead of discarding it.
  pub fn post_waitable<F, T>(&self, f: F) -> Result<Waitable<T>, ServiceError>
  where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
  {
    let (tx, rx) = mpsc::channel();
    self.post(move || {
      let _ = tx.send(f());
    })?;
    Ok(Waitable::new(rx))
  }

  /// Like [`Service::dispatch`], but returns a [`Waitable`] for `f`'s
  /// result instead of discarding it.
  pub fn dispatch_waitable<F, T>(&self, f: F) -> Result<Waitable<T>, ServiceError>
  where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
  {
    let (tx, rx) = mpsc::channel();
    self.dispatch(move || {
      let _ = tx.send(f());
    })?;
    Ok(Waitable::new(rx))
  }

  /// Pops and runs at most one pending task without blocking. Returns
  /// `true` if a task ran. Meant to be called in a loop by a thread that's
  /// waiting on a [`Waitable`] and wants to help drain the queue instead of
  /// sitting idle.
  pub fn run_pending_task(&self) -> bool {
    match self.queue.try_pop() {
      Some(task) => {
        task.invoke();
        true
      }
      None => {
        std::thread::yield_now();
        false
      }
    }
  }

  /// Stages `initiator`'s submission-queue entry on the calling thread's
  /// worker ring core and arranges for `completer` to run, on this worker,
  /// once the kernel completion lands. Must be called from inside
  /// [`Service::run`] on some service (any service, not necessarily this
  /// one — the ring core is per worker thread, not per `Service`).
  ///
  /// Returns `None` if the calling thread is not currently running any
  /// service's worker loop.
  pub(crate) fn submit_ring<I, F>(initiator: I, completer: F) -> Option<std::io::Result<()>>
  where
    I: Initiator,
    F: FnOnce(I::Output) + Send + 'static,
  {
    with_worker_ring(|ring| ring.submit(initiator, completer))
  }

  /// Runs the worker loop on the calling thread until the service is
  /// stopped. Installs this thread's ring core and call-stack marker for
  /// the duration of the loop; both are released, in reverse order, when
  /// this returns.
  pub fn run(&self) -> Result<(), ServiceError> {
    let flag = self.current_flag();
    if flag.is_stopped() {
      return Err(ServiceError::Stopped);
    }
    let Some(_handle) = flag.make_handle() else {
      // Lost the race with a concurrent stop(); nothing to do.
      return Ok(());
    };
    let _marker = CallstackMarker::push(self, &());

    let ring = if self.share_ring_work_queue {
      RingCore::new_attached(RING_ENTRIES)?
    } else {
      RingCore::new(RING_ENTRIES)?
    };
    WORKER_RING.with(|cell| *cell.borrow_mut() = Some(ring));
    let _ring_guard = RingGuard;

    loop {
      let ring_busy = with_worker_ring(|ring| {
        if ring.has_outstanding() {
          if let Err(err) = ring.poll_completions() {
            tracing::error!(error = %err, "ring completion poll failed");
          }
          if let Err(err) = ring.flush() {
            tracing::error!(error = %err, "ring flush failed");
          }
        }
        ring.has_outstanding()
      })
      .unwrap_or(false);

      if let Some(task) = self.queue.try_pop() {
        task.invoke();
        continue;
      }

      if ring_busy {
        match self.queue.wait_and_pop_timeout(|| flag.is_stopped(), RING_POLL_INTERVAL) {
          Some(task) => task.invoke(),
          None if flag.is_stopped() => break,
          None => continue,
        }
      } else {
        match self.queue.wait_and_pop(|| flag.is_stopped()) {
          Some(task) => task.invoke(),
          None => break,
        }
      }
    }

    Ok(())
  }

  /// Signals stop, wakes every worker blocked on the queue, waits for all
  /// of them to leave [`Service::run`], then drains whatever tasks were
  /// still queued.
  pub fn stop(&self) {
    let flag = self.current_flag();
    flag.signal_stop();
    flag.wait_all();
    self.queue.clear();
  }

  /// Stops the service (if not already stopped) and resets its lifecycle
  /// so `post`/`run` work again.
  pub fn restart(&self) {
    self.stop();
    let mut guard = self.flag.lock();
    *guard = Self::fresh_flag(&self.queue);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  #[test]
  fn post_then_run_executes_the_task_and_stop_returns() {
    let service = Arc::new(Service::new());
    let counter = Arc::new(AtomicUsize::new(0));
    for _ in 0..50 {
      let counter = counter.clone();
      service.post(move || { counter.fetch_add(1, Ordering::SeqCst); }).unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..5 {
      let service = service.clone();
      handles.push(std::thread::spawn(move || service.run().unwrap()));
    }

    // Give workers a moment to drain, then stop.
    std::thread::sleep(Duration::from_millis(50));
    service.stop();
    for h in handles {
      h.join().unwrap();
    }

    assert_eq!(counter.load(Ordering::SeqCst), 50);
  }

  #[test]
  fn post_after_stop_fails() {
    let service = Service::new();
    service.stop();
    assert!(matches!(service.post(|| {}), Err(ServiceError::Stopped)));
  }

  #[test]
  fn restart_allows_posting_again() {
    let service = Arc::new(Service::new());
    service.stop();
    assert!(service.post(|| {}).is_err());

    service.restart();
    let counter = Arc::new(AtomicUsize::new(0));
    let counter2 = counter.clone();
    service.post(move || { counter2.fetch_add(1, Ordering::SeqCst); }).unwrap();

    let service2 = service.clone();
    let handle = std::thread::spawn(move || service2.run().unwrap());
    std::thread::sleep(Duration::from_millis(20));
    service.stop();
    handle.join().unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn sharing_services_run_tasks_and_publish_a_shared_ring_fd() {
    // The first service to run publishes its ring fd; the second attaches
    // to it via `RingCore::new_attached` instead of spinning up its own
    // kernel worker pool.
    let first = Arc::new(Service::new_sharing_ring_work_queue());
    let second = Arc::new(Service::new_sharing_ring_work_queue());

    let counter = Arc::new(AtomicUsize::new(0));
    for service in [&first, &second] {
      let counter = counter.clone();
      service.post(move || { counter.fetch_add(1, Ordering::SeqCst); }).unwrap();
    }

    let h1 = {
      let first = first.clone();
      std::thread::spawn(move || first.run().unwrap())
    };
    let h2 = {
      let second = second.clone();
      std::thread::spawn(move || second.run().unwrap())
    };
    std::thread::sleep(Duration::from_millis(20));
    first.stop();
    second.stop();
    h1.join().unwrap();
    h2.join().unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert!(crate::ring::any_shared_work_queue().is_some());
  }

  #[test]
  fn dispatch_runs_inline_from_a_worker_thread() {
    let service = Arc::new(Service::new());
    let order = Arc::new(Mutex::new(Vec::new()));
    let order2 = order.clone();
    let service2 = service.clone();
    service
      .post(move || {
        order2.lock().push("before");
        service2.dispatch(|| {}).unwrap();
        order2.lock().push("after");
      })
      .unwrap();

    let service3 = service.clone();
    let handle = std::thread::spawn(move || service3.run().unwrap());
    std::thread::sleep(Duration::from_millis(20));
    service.stop();
    handle.join().unwrap();

    assert_eq!(*order.lock(), vec!["before", "after"]);
  }

  #[test]
  fn dispatch_from_outside_any_worker_posts_instead_of_running_inline() {
    let service = Service::new();
    let ran_inline = Arc::new(std::sync::atomic::AtomicBool::new(true));
    let ran_inline2 = ran_inline.clone();
    ran_inline.store(false, Ordering::SeqCst);
    service.dispatch(move || ran_inline2.store(true, Ordering::SeqCst)).unwrap();
    // Nothing ran it yet: dispatch from a non-worker thread just posts.
    assert!(!ran_inline.load(Ordering::SeqCst));
    assert!(service.run_pending_task());
    assert!(ran_inline.load(Ordering::SeqCst));
  }

  #[test]
  fn post_waitable_returns_the_closures_result() {
    let service = Arc::new(Service::new());
    let waitable = service.post_waitable(|| 2 + 2).unwrap();

    let service2 = service.clone();
    let handle = std::thread::spawn(move || service2.run().unwrap());
    assert_eq!(waitable.get(), 4);
    service.stop();
    handle.join().unwrap();
  }
}
