//! Name resolution: a synchronous `resolve` for callers on a worker thread
//! that can afford to block, and an `async_resolve` that offloads the
//! blocking lookup to a posted compute task so it doesn't stall a worker's
//! ring polling.
//!
//! `getaddrinfo(3)` has no `io_uring` opcode, so unlike accept/connect/
//! read/write this never touches the ring — it's staged through
//! [`ioservice::post_compute`], the same path [`ioservice::Service`] uses
//! for ordinary CPU-bound work.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use ioservice::{Service, ServiceError};

/// Resolves a host/port pair (or anything else implementing
/// [`ToSocketAddrs`]) to its candidate addresses.
pub struct Resolver;

impl Resolver {
  /// Blocking resolution on the calling thread. Thin wrapper around
  /// [`ToSocketAddrs`] — exists so callers go through one API for both the
  /// sync and async paths.
  pub fn resolve(query: impl ToSocketAddrs) -> io::Result<Vec<SocketAddr>> {
    Ok(query.to_socket_addrs()?.collect())
  }

  /// Runs [`Self::resolve`] on `service`'s task queue and delivers the
  /// result to `comp`. `query` must already be owned (`'static`) since
  /// resolution happens on whichever worker thread picks up the posted
  /// task.
  pub fn async_resolve<Q, F>(service: &Service, query: Q, comp: F) -> Result<(), ServiceError>
  where
    Q: ToSocketAddrs + Send + 'static,
    F: FnOnce(io::Result<Vec<SocketAddr>>) + Send + 'static,
  {
    ioservice::post_compute(service, move || Self::resolve(query), comp)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::mpsc;

  #[test]
  fn resolve_localhost_yields_a_loopback_address() {
    let addrs = Resolver::resolve(("localhost", 0)).unwrap();
    assert!(addrs.iter().any(|a| a.ip().is_loopback()));
  }

  #[test]
  fn async_resolve_delivers_its_result_through_the_posted_task() {
    let service = Service::new();
    let (tx, rx) = mpsc::channel();
    Resolver::async_resolve(&service, ("localhost", 0), move |result| {
      let _ = tx.send(result);
    })
    .unwrap();

    assert!(service.run_pending_task());
    let addrs = rx.recv().unwrap().unwrap();
    assert!(addrs.iter().any(|a| a.ip().is_loopback()));
  }
}
