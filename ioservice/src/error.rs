use std::fmt;
use std::io;

/// Errors surfaced by [`crate::Service`] itself (as opposed to individual
/// operation results, which travel as `io::Result<T>` to completers).
///
/// Mirrors the teacher's `driver::TryInitError`: a hand-rolled enum with
/// manual `Display`/`Error` impls rather than a derive-macro crate.
#[derive(Debug)]
pub enum ServiceError {
  /// The service's interrupt flag is already stopped; the call was
  /// rejected instead of being silently dropped.
  Stopped,
  /// A worker thread failed to stand up its per-thread ring core.
  RingSetup(io::Error),
}

impl fmt::Display for ServiceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Stopped => write!(f, "service is stopped"),
      Self::RingSetup(e) => write!(f, "failed to set up worker ring: {e}"),
    }
  }
}

impl std::error::Error for ServiceError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Stopped => None,
      Self::RingSetup(e) => Some(e),
    }
  }
}

impl From<io::Error> for ServiceError {
  fn from(e: io::Error) -> Self {
    Self::RingSetup(e)
  }
}
