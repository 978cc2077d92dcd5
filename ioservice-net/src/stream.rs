//! TCP stream: `async_connect`/`async_read_some`/`async_write_some`, as
//! specified in §4.11. `async_connect` over an address list tries each
//! candidate in order until one succeeds, per spec — implemented as a
//! chain of posted connect attempts rather than a loop, since each attempt
//! is itself asynchronous.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::os::fd::{AsRawFd, RawFd};
use std::sync::Arc;
use std::vec;

use ioservice::{Service, ServiceError};

use crate::ops::{ConnectInit, ReadInit, WriteInit};
use crate::raw;

/// A connected TCP stream. Owns its file descriptor exclusively.
pub struct TcpStream {
  fd: RawFd,
}

impl std::fmt::Debug for TcpStream {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TcpStream").field("fd", &self.fd).finish()
  }
}

impl AsRawFd for TcpStream {
  fn as_raw_fd(&self) -> RawFd {
    self.fd
  }
}

impl TcpStream {
  pub(crate) fn from_raw_fd(fd: RawFd) -> Self {
    Self { fd }
  }

  /// Resolves `addrs` and tries to connect to each candidate in turn,
  /// stopping at the first success. `comp` runs once, with either the
  /// connected stream or the last candidate's error (or the resolution
  /// error, if `addrs` yielded nothing).
  ///
  /// `service` is an `Arc` because each failed candidate reposts the next
  /// attempt — the chain has to keep the service reachable across however
  /// many hops that takes, which a borrowed reference can't promise across
  /// worker threads.
  pub fn async_connect<A, F>(service: &Arc<Service>, addrs: A, comp: F) -> Result<(), ServiceError>
  where
    A: ToSocketAddrs,
    F: FnOnce(io::Result<TcpStream>) + Send + 'static,
  {
    let candidates: Vec<SocketAddr> = match addrs.to_socket_addrs() {
      Ok(iter) => iter.collect(),
      Err(err) => return service.dispatch(move || comp(Err(err))),
    };
    connect_chain(service.clone(), candidates.into_iter(), None, Box::new(comp))
  }

  /// Stages one read into `buf`, up to `buf.len()` bytes. `comp` receives
  /// the number of bytes read (`0` means the peer shut down its write
  /// side) or the kernel error, plus `buf` back for reuse.
  pub fn async_read_some<F>(
    &self,
    service: &Service,
    buf: Vec<u8>,
    comp: F,
  ) -> Result<(), ServiceError>
  where
    F: FnOnce(io::Result<usize>, Vec<u8>) + Send + 'static,
  {
    ioservice::post_ring(service, ReadInit::new(self.fd, buf), move |(res, buf)| {
      comp(res, buf)
    })
  }

  /// Stages one write of `buf`. `comp` receives the number of bytes
  /// written or the kernel error, plus `buf` back for reuse.
  pub fn async_write_some<F>(
    &self,
    service: &Service,
    buf: Vec<u8>,
    comp: F,
  ) -> Result<(), ServiceError>
  where
    F: FnOnce(io::Result<usize>, Vec<u8>) + Send + 'static,
  {
    ioservice::post_ring(service, WriteInit::new(self.fd, buf), move |(res, buf)| {
      comp(res, buf)
    })
  }
}

impl Drop for TcpStream {
  fn drop(&mut self) {
    unsafe { libc::close(self.fd) };
  }
}

fn connect_chain(
  service: Arc<Service>,
  mut remaining: vec::IntoIter<SocketAddr>,
  last_err: Option<io::Error>,
  comp: Box<dyn FnOnce(io::Result<TcpStream>) + Send>,
) -> Result<(), ServiceError> {
  let Some(addr) = remaining.next() else {
    let err = last_err.unwrap_or_else(|| {
      io::Error::new(io::ErrorKind::InvalidInput, "no addresses to connect to")
    });
    return service.dispatch(move || comp(Err(err)));
  };

  let fd = match raw::new_tcp_socket(addr) {
    Ok(fd) => fd,
    Err(err) => return connect_chain(service, remaining, Some(err), comp),
  };

  let service_for_retry = service.clone();
  ioservice::post_ring(&service, ConnectInit::new(fd, addr), move |result| {
    match result {
      Ok(()) => comp(Ok(TcpStream::from_raw_fd(fd))),
      Err(err) => {
        unsafe { libc::close(fd) };
        tracing::debug!(%addr, error = %err, "connect candidate failed, trying next address");
        // A dropped completer here (service stopped between staging and
        // now) is the same "give up" outcome as exhausting the list; the
        // retry attempt just never runs, which is an acceptable silent
        // drop during shutdown, matching `Service::stop`'s own semantics
        // for abandoned queued work.
        let _ = connect_chain(service_for_retry, remaining, Some(err), comp);
      }
    }
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::acceptor::TcpAcceptor;
  use std::sync::atomic::{AtomicBool, Ordering};
  use std::sync::mpsc;

  #[test]
  fn connect_to_a_listening_acceptor_succeeds() {
    let service = Arc::new(Service::new());
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let acceptor = TcpAcceptor::bind(addr).unwrap();
    acceptor.listen(16).unwrap();
    let bound = acceptor.local_addr().unwrap();

    let (accept_tx, accept_rx) = mpsc::channel();
    acceptor
      .async_accept(&service, move |result| {
        let _ = accept_tx.send(result.map(|(_stream, addr)| addr));
      })
      .unwrap();

    let connected = Arc::new(AtomicBool::new(false));
    let connected2 = connected.clone();
    TcpStream::async_connect(&service, bound, move |result| {
      connected2.store(result.is_ok(), Ordering::SeqCst);
    })
    .unwrap();

    let worker = {
      let service = service.clone();
      std::thread::spawn(move || service.run().unwrap())
    };
    let accepted = accept_rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
    assert!(accepted.is_ok());
    service.stop();
    worker.join().unwrap();
    assert!(connected.load(Ordering::SeqCst));
  }
}
