//! Synchronization primitives that wrap both `parking_lot` and `std::sync`.
//!
//! This module provides a unified API for synchronization primitives that:
//! - Uses `parking_lot` when the `parking_lot` feature is enabled
//! - Falls back to `std::sync` when the feature is disabled
//! - Removes poisoning by unwrapping poisoned locks

#[cfg(feature = "parking_lot")]
pub use parking_lot::{Condvar, Mutex, MutexGuard};

#[cfg(not(feature = "parking_lot"))]
pub use self::std_sync::*;

#[cfg(not(feature = "parking_lot"))]
mod std_sync {
  use std::sync as std_sync;

  pub use std_sync::Condvar;

  /// A mutual exclusion primitive that wraps `std::sync::Mutex`.
  ///
  /// Unlike `std::sync::Mutex`, this does not support poisoning.
  pub struct Mutex<T: ?Sized> {
    inner: std_sync::Mutex<T>,
  }

  impl<T> Mutex<T> {
    /// Creates a new mutex in an unlocked state ready for use.
    #[inline]
    pub const fn new(value: T) -> Self {
      Self { inner: std_sync::Mutex::new(value) }
    }
  }

  impl<T: ?Sized> Mutex<T> {
    /// Acquires a mutex, blocking the current thread until it is able to do so.
    ///
    /// This function does not propagate poisoning, so it will always succeed.
    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, T> {
      MutexGuard { inner: self.inner.lock().unwrap_or_else(|e| e.into_inner()) }
    }

    /// Acquires a mutex, blocking the current thread until it is able to do so.
    ///
    /// This function does not propagate poisoning, so it will always succeed.
    #[inline]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
      match self.inner.try_lock() {
        Ok(value) => Some(MutexGuard { inner: value }),
        Err(err) => match err {
          std_sync::TryLockError::WouldBlock => None,
          std_sync::TryLockError::Poisoned(e) => {
            Some(MutexGuard { inner: e.into_inner() })
          }
        },
      }
    }
  }

  /// An RAII implementation of a "scoped lock" of a mutex.
  ///
  /// When this structure is dropped (falls out of scope), the lock will be unlocked.
  pub struct MutexGuard<'a, T: ?Sized> {
    pub(crate) inner: std_sync::MutexGuard<'a, T>,
  }

  impl<T: ?Sized> std::ops::Deref for MutexGuard<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
      &self.inner
    }
  }

  impl<T: ?Sized> std::ops::DerefMut for MutexGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
      &mut self.inner
    }
  }

  /// Blocks `guard` on `condvar` until `predicate` is false, unwrapping
  /// poisoning the same way `Mutex::lock` does.
  pub fn wait_while<'a, T: ?Sized>(
    condvar: &Condvar,
    mut guard: MutexGuard<'a, T>,
    mut predicate: impl FnMut(&mut T) -> bool,
  ) -> MutexGuard<'a, T> {
    loop {
      if !predicate(&mut guard.inner) {
        return guard;
      }
      guard.inner = condvar.wait(guard.inner).unwrap_or_else(|e| e.into_inner());
    }
  }

  /// Blocks on `condvar`, unwrapping poisoning like the rest of this module.
  pub fn wait<'a, T: ?Sized>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
  ) -> MutexGuard<'a, T> {
    MutexGuard { inner: condvar.wait(guard.inner).unwrap_or_else(|e| e.into_inner()) }
  }

  /// Blocks on `condvar` for at most `timeout`. The returned bool is `true`
  /// if the wait returned because of the timeout rather than a wakeup.
  pub fn wait_timeout<'a, T: ?Sized>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    timeout: std::time::Duration,
  ) -> (MutexGuard<'a, T>, bool) {
    let (inner, result) = condvar
      .wait_timeout(guard.inner, timeout)
      .unwrap_or_else(|e| e.into_inner());
    (MutexGuard { inner }, result.timed_out())
  }
}

#[cfg(feature = "parking_lot")]
pub fn wait_while<'a, T: ?Sized>(
  condvar: &Condvar,
  mut guard: MutexGuard<'a, T>,
  mut predicate: impl FnMut(&mut T) -> bool,
) -> MutexGuard<'a, T> {
  condvar.wait_while(&mut guard, |v| predicate(v));
  guard
}

#[cfg(feature = "parking_lot")]
pub fn wait<'a, T: ?Sized>(
  condvar: &Condvar,
  mut guard: MutexGuard<'a, T>,
) -> MutexGuard<'a, T> {
  condvar.wait(&mut guard);
  guard
}

#[cfg(feature = "parking_lot")]
pub fn wait_timeout<'a, T: ?Sized>(
  condvar: &Condvar,
  mut guard: MutexGuard<'a, T>,
  timeout: std::time::Duration,
) -> (MutexGuard<'a, T>, bool) {
  let result = condvar.wait_for(&mut guard, timeout);
  (guard, result.timed_out())
}
