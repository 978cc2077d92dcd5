//! Multi-producer, multi-consumer task queue.
//!
//! Structurally this is the dummy-node, split head/tail-lock queue from
//! `threadsafe_queue.hpp`: a singly linked chain where the tail lock and the
//! head lock are independent, so a producer pushing and a consumer popping
//! rarely contend on the same mutex. The blocking-wait half is grounded on
//! the teacher's `blocking_queue::BlockingCoordinator`, which pairs a
//! `Condvar` with a mutex that holds no data of its own, only coordinating.
//!
//! The C++ original aliases the tail pointer without the tail lock inside
//! `try_pop`'s emptiness check (a known rough edge of that textbook
//! algorithm). This port always takes the tail lock to read the current
//! tail, trading a little contention for a queue with no informal reasoning
//! about cross-lock visibility.

use std::sync::Arc;

use crate::sync::{Condvar, Mutex};
use crate::task::Task;

struct Node {
  data: Mutex<Option<Task>>,
  next: Mutex<Option<Arc<Node>>>,
}

impl Node {
  fn dummy() -> Arc<Node> {
    Arc::new(Node { data: Mutex::new(None), next: Mutex::new(None) })
  }
}

/// The MPMC queue backing [`crate::Service`]. One instance is created per
/// service and shared by all its posters and workers.
pub struct TaskQueue {
  head: Mutex<Arc<Node>>,
  tail: Mutex<Arc<Node>>,
  not_empty: Condvar,
  wait_lock: Mutex<()>,
}

impl Default for TaskQueue {
  fn default() -> Self {
    Self::new()
  }
}

impl TaskQueue {
  pub fn new() -> Self {
    let dummy = Node::dummy();
    Self {
      head: Mutex::new(dummy.clone()),
      tail: Mutex::new(dummy),
      not_empty: Condvar::new(),
      wait_lock: Mutex::new(()),
    }
  }

  fn current_tail(&self) -> Arc<Node> {
    self.tail.lock().clone()
  }

  /// Appends `task` to the end of the queue and wakes exactly one blocked
  /// consumer, if any — one task posted should wake one worker, not all of
  /// them.
  pub fn push(&self, task: Task) {
    let new_tail = Node::dummy();
    let mut tail_guard = self.tail.lock();
    *tail_guard.data.lock() = Some(task);
    *tail_guard.next.lock() = Some(new_tail.clone());
    *tail_guard = new_tail;
    drop(tail_guard);

    let _guard = self.wait_lock.lock();
    self.not_empty.notify_one();
  }

  /// Pops the front task without blocking. Returns `None` if the queue is
  /// currently empty.
  pub fn try_pop(&self) -> Option<Task> {
    let mut head_guard = self.head.lock();
    let tail = self.current_tail();
    if Arc::ptr_eq(&head_guard, &tail) {
      return None;
    }
    let data = head_guard.data.lock().take();
    let next = head_guard
      .next
      .lock()
      .take()
      .expect("queue invariant: a non-dummy head always has a successor");
    *head_guard = next;
    data
  }

  /// Blocks until a task is available, `predicate` becomes true, or an
  /// external [`TaskQueue::signal`] wakes this waiter. Returns `None` if it
  /// woke because of `predicate` with the queue still empty, `Some` if it
  /// popped a task.
  pub fn wait_and_pop<P>(&self, predicate: P) -> Option<Task>
  where
    P: Fn() -> bool,
  {
    if let Some(t) = self.try_pop() {
      return Some(t);
    }
    let mut guard = self.wait_lock.lock();
    loop {
      if let Some(t) = self.try_pop() {
        return Some(t);
      }
      if predicate() {
        return None;
      }
      guard = crate::sync::wait(&self.not_empty, guard);
    }
  }

  /// Like [`Self::wait_and_pop`], but gives up and returns `None` after
  /// `timeout` even if neither a task arrived nor `predicate` became true.
  /// Used by a worker with an outstanding ring operation: it cannot block
  /// indefinitely on this queue alone, since a kernel completion on its own
  /// ring never touches this condvar.
  pub fn wait_and_pop_timeout<P>(
    &self,
    predicate: P,
    timeout: std::time::Duration,
  ) -> Option<Task>
  where
    P: Fn() -> bool,
  {
    if let Some(t) = self.try_pop() {
      return Some(t);
    }
    let mut guard = self.wait_lock.lock();
    let deadline = std::time::Instant::now() + timeout;
    loop {
      if let Some(t) = self.try_pop() {
        return Some(t);
      }
      if predicate() {
        return None;
      }
      let remaining = deadline.saturating_duration_since(std::time::Instant::now());
      if remaining.is_zero() {
        return None;
      }
      let (next_guard, timed_out) =
        crate::sync::wait_timeout(&self.not_empty, guard, remaining);
      guard = next_guard;
      if timed_out {
        return self.try_pop();
      }
    }
  }

  /// Wakes every blocked consumer without pushing a task. Used by
  /// [`crate::Service::stop`]'s stop-callback to break all workers out of
  /// `wait_and_pop` at once.
  pub fn signal(&self) {
    let _guard = self.wait_lock.lock();
    self.not_empty.notify_all();
  }

  /// True if the queue currently holds no tasks. Racy by nature in an MPMC
  /// queue; useful for diagnostics, not for synchronization.
  pub fn is_empty(&self) -> bool {
    let head_guard = self.head.lock();
    let tail = self.current_tail();
    Arc::ptr_eq(&head_guard, &tail)
  }

  /// Drains every currently-queued task without running them. Used by
  /// `Service::stop` to discard whatever was left pending.
  pub fn clear(&self) {
    while self.try_pop().is_some() {}
  }

  /// Exchanges the contents of two queues under a canonical lock order (by
  /// address) so two concurrent `swap` calls on the same pair never
  /// deadlock.
  pub fn swap(&self, other: &TaskQueue) {
    let (a, b) = if (self as *const Self as usize)
      < (other as *const Self as usize)
    {
      (self, other)
    } else {
      (other, self)
    };
    let mut a_head = a.head.lock();
    let mut a_tail = a.tail.lock();
    let mut b_head = b.head.lock();
    let mut b_tail = b.tail.lock();
    std::mem::swap(&mut *a_head, &mut *b_head);
    std::mem::swap(&mut *a_tail, &mut *b_tail);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc as StdArc;
  use std::time::Duration;

  #[test]
  fn push_then_try_pop_is_fifo() {
    let q = TaskQueue::new();
    let order = StdArc::new(Mutex::new(Vec::new()));
    for i in 0..5 {
      let order = order.clone();
      q.push(Task::new(move || order.lock().push(i)));
    }
    while let Some(t) = q.try_pop() {
      t.invoke();
    }
    assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
  }

  #[test]
  fn try_pop_on_empty_queue_returns_none() {
    let q = TaskQueue::new();
    assert!(q.try_pop().is_none());
    assert!(q.is_empty());
  }

  #[test]
  fn wait_and_pop_wakes_on_push() {
    let q = StdArc::new(TaskQueue::new());
    let q2 = q.clone();
    let handle = std::thread::spawn(move || {
      q2.wait_and_pop(|| false).expect("a task should arrive")
    });
    std::thread::sleep(Duration::from_millis(20));
    q.push(Task::new(|| {}));
    let task = handle.join().unwrap();
    task.invoke();
  }

  #[test]
  fn wait_and_pop_wakes_on_predicate_without_a_task() {
    let q = TaskQueue::new();
    let stopped = std::sync::atomic::AtomicBool::new(false);
    let result = std::thread::scope(|scope| {
      let handle = scope.spawn(|| q.wait_and_pop(|| stopped.load(Ordering::SeqCst)));
      std::thread::sleep(Duration::from_millis(20));
      stopped.store(true, Ordering::SeqCst);
      q.signal();
      handle.join().unwrap()
    });
    assert!(result.is_none());
  }

  #[test]
  fn many_producers_many_consumers_account_for_every_task() {
    let q = StdArc::new(TaskQueue::new());
    let produced = 2000;
    let consumed = StdArc::new(AtomicUsize::new(0));

    std::thread::scope(|scope| {
      for _ in 0..4 {
        let q = q.clone();
        scope.spawn(move || {
          for _ in 0..(produced / 4) {
            q.push(Task::new(|| {}));
          }
        });
      }
      for _ in 0..4 {
        let q = q.clone();
        let consumed = consumed.clone();
        scope.spawn(move || loop {
          match q.wait_and_pop(|| consumed.load(Ordering::SeqCst) >= produced) {
            Some(t) => {
              t.invoke();
              consumed.fetch_add(1, Ordering::SeqCst);
            }
            None => break,
          }
        });
      }
    });

    assert_eq!(consumed.load(Ordering::SeqCst), produced);
    assert!(q.is_empty());
  }

  #[test]
  fn wait_and_pop_timeout_expires_when_nothing_arrives() {
    let q = TaskQueue::new();
    let result = q.wait_and_pop_timeout(|| false, Duration::from_millis(20));
    assert!(result.is_none());
  }

  #[test]
  fn wait_and_pop_timeout_returns_task_if_pushed_in_time() {
    let q = StdArc::new(TaskQueue::new());
    let q2 = q.clone();
    let handle = std::thread::spawn(move || {
      q2.wait_and_pop_timeout(|| false, Duration::from_secs(5))
    });
    std::thread::sleep(Duration::from_millis(10));
    q.push(Task::new(|| {}));
    assert!(handle.join().unwrap().is_some());
  }

  #[test]
  fn swap_exchanges_contents() {
    let a = TaskQueue::new();
    let b = TaskQueue::new();
    a.push(Task::new(|| {}));
    a.push(Task::new(|| {}));
    b.push(Task::new(|| {}));

    a.swap(&b);

    assert!(a.try_pop().is_some());
    assert!(a.try_pop().is_none());
    assert!(b.try_pop().is_some());
    assert!(b.try_pop().is_some());
    assert!(b.try_pop().is_none());
  }
}
