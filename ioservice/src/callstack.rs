//! Thread-local call-stack marker, used by [`crate::strand::Strand`] to
//! detect reentrant `dispatch` calls.
//!
//! Grounded on `callstack.hpp`'s `template<Key, Value> class callstack`: a
//! thread-local, LIFO, intrusive linked stack of `(key, value)` contexts.
//! Each frame borrows its key/value for the duration of a scope and pushes
//! itself onto the thread's stack; `contains` walks the stack looking for a
//! matching key. No allocation, no locking — it only ever touches the
//! current thread's own stack.

use std::cell::Cell;
use std::marker::PhantomData;

struct Frame<K: 'static, V: 'static> {
  key: *const K,
  value: *const V,
  parent: *const Frame<K, V>,
}

/// A scoped marker identifying that `key` is currently being run with
/// `value` as context, on this thread. Dropping it pops the frame.
///
/// `K`/`V` are almost always `()`-sized marker types or the strand itself;
/// see [`crate::strand::Strand::in_running_handle`] for the only consumer.
pub struct CallstackMarker<'a, K: 'static, V: 'static> {
  _frame: Box<Frame<K, V>>,
  _owner: PhantomData<&'a ()>,
}

// A `thread_local!` declared inside a generic function is monomorphized
// once per (K, V) instantiation, giving every distinct CallstackMarker<K, V>
// its own independent thread-local stack instead of one shared, type-erased
// slot that different (K, V) pairs would trample on.
fn top_for<K: 'static, V: 'static>() -> *const Frame<K, V> {
  thread_local! {
    static TOP: Cell<*const ()> = const { Cell::new(std::ptr::null()) };
  }
  TOP.with(|t| t.get().cast())
}

fn set_top_for<K: 'static, V: 'static>(p: *const Frame<K, V>) {
  thread_local! {
    static TOP: Cell<*const ()> = const { Cell::new(std::ptr::null()) };
  }
  TOP.with(|t| t.set(p.cast()))
}

impl<'a, K: 'static, V: 'static> CallstackMarker<'a, K, V> {
  /// Pushes a new frame for `key`/`value` onto this thread's callstack.
  /// The frame is popped when the returned marker is dropped.
  pub fn push(key: &'a K, value: &'a V) -> Self {
    let parent = top_for::<K, V>();
    let frame = Box::new(Frame { key, value, parent });
    set_top_for(frame.as_ref() as *const _);
    Self { _frame: frame, _owner: PhantomData }
  }

  /// Walks the current thread's callstack looking for a frame whose key is
  /// `key` (by pointer identity). Returns the value that frame was pushed
  /// with, if found.
  pub fn contains(key: &K) -> Option<&'a V> {
    let mut cursor = top_for::<K, V>();
    while !cursor.is_null() {
      // SAFETY: frames are only ever unlinked (on drop, below) after every
      // frame pushed on top of them has already been dropped, because
      // pushing/popping is strictly LIFO on a single thread. `cursor` is
      // always either null or a frame still alive further down this
      // thread's call stack.
      let frame = unsafe { &*cursor };
      if std::ptr::eq(frame.key, key) {
        // SAFETY: the value outlives the frame, which outlives this call
        // (the frame is still on the stack, i.e. its owning scope hasn't
        // returned yet).
        return Some(unsafe { &*frame.value });
      }
      cursor = frame.parent;
    }
    None
  }
}

impl<K: 'static, V: 'static> Drop for CallstackMarker<'_, K, V> {
  fn drop(&mut self) {
    set_top_for(self._frame.parent);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contains_finds_value_while_frame_is_live() {
    let key = 1u8;
    let value = 42u32;
    assert!(CallstackMarker::contains(&key).is_none());
    let marker = CallstackMarker::push(&key, &value);
    assert_eq!(CallstackMarker::contains(&key), Some(&42));
    drop(marker);
    assert!(CallstackMarker::contains(&key).is_none());
  }

  #[test]
  fn nested_frames_are_lifo() {
    let outer_key = 1u8;
    let inner_key = 2u8;
    let outer_value = "outer".to_string();
    let inner_value = "inner".to_string();

    let _outer = CallstackMarker::push(&outer_key, &outer_value);
    assert_eq!(
      CallstackMarker::contains(&outer_key).map(String::as_str),
      Some("outer")
    );
    {
      let _inner = CallstackMarker::push(&inner_key, &inner_value);
      assert_eq!(
        CallstackMarker::contains(&inner_key).map(String::as_str),
        Some("inner")
      );
      assert_eq!(
        CallstackMarker::contains(&outer_key).map(String::as_str),
        Some("outer")
      );
    }
    assert!(CallstackMarker::contains(&inner_key).is_none());
    assert_eq!(
      CallstackMarker::contains(&outer_key).map(String::as_str),
      Some("outer")
    );
  }

  #[test]
  fn each_thread_has_its_own_stack() {
    let key = 7u8;
    let value = 100u32;
    let _marker = CallstackMarker::push(&key, &value);
    let seen_on_other_thread = std::thread::spawn(move || {
      CallstackMarker::<u8, u32>::contains(&key).is_some()
    })
    .join()
    .unwrap();
    assert!(!seen_on_other_thread);
    assert!(CallstackMarker::contains(&key).is_some());
  }
}
