//! TCP acceptor: `bind`/`listen` are synchronous OS calls; `async_accept`
//! stages one `IORING_OP_ACCEPT` per call, exactly as specified in §4.11.

use std::io;
use std::net::SocketAddr;
use std::os::fd::{AsRawFd, RawFd};

use ioservice::{Service, ServiceError};

use crate::ops::AcceptInit;
use crate::raw;
use crate::stream::TcpStream;

/// A bound, listening TCP socket. Owns its file descriptor exclusively —
/// dropping it closes the listening socket.
pub struct TcpAcceptor {
  fd: RawFd,
}

impl std::fmt::Debug for TcpAcceptor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TcpAcceptor").field("fd", &self.fd).finish()
  }
}

impl AsRawFd for TcpAcceptor {
  fn as_raw_fd(&self) -> RawFd {
    self.fd
  }
}

impl TcpAcceptor {
  /// Creates a socket, sets `SO_REUSEADDR`/`SO_REUSEPORT`, and binds it to
  /// `addr`. Does not start listening yet — call [`Self::listen`].
  pub fn bind(addr: SocketAddr) -> io::Result<Self> {
    Ok(Self { fd: raw::bind_listener(addr)? })
  }

  /// Marks the bound socket as listening, with `backlog` pending
  /// connections.
  pub fn listen(&self, backlog: i32) -> io::Result<()> {
    raw::listen(self.fd, backlog)
  }

  /// The address this acceptor is bound to — in particular, the port the
  /// kernel picked if it was bound to port `0`.
  pub fn local_addr(&self) -> io::Result<SocketAddr> {
    let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
    let mut len = std::mem::size_of::<libc::sockaddr_storage>() as libc::socklen_t;
    let ret = unsafe {
      libc::getsockname(self.fd, (&mut storage as *mut libc::sockaddr_storage).cast(), &mut len)
    };
    if ret < 0 {
      return Err(io::Error::last_os_error());
    }
    crate::net_utils::libc_sockaddr_to_std(&storage)
  }

  /// Stages one accept. `comp` runs, on whichever worker the completion
  /// lands on, with the connected peer and its address on success, or the
  /// kernel's error on failure. To keep accepting, call `async_accept`
  /// again from inside `comp` — this wrapper only ever arms one accept per
  /// call, matching the spec's single-shot contract.
  pub fn async_accept<F>(&self, service: &Service, comp: F) -> Result<(), ServiceError>
  where
    F: FnOnce(io::Result<(TcpStream, SocketAddr)>) + Send + 'static,
  {
    ioservice::post_ring(service, AcceptInit::new(self.fd), move |result| {
      comp(result.map(|(fd, addr)| (TcpStream::from_raw_fd(fd), addr)))
    })
  }
}

impl Drop for TcpAcceptor {
  fn drop(&mut self) {
    unsafe { libc::close(self.fd) };
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bind_to_port_zero_picks_an_ephemeral_port() {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let acceptor = TcpAcceptor::bind(addr).unwrap();
    acceptor.listen(16).unwrap();
  }

  #[test]
  fn rebinding_a_freshly_released_port_succeeds() {
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    let first = TcpAcceptor::bind(addr).unwrap();
    first.listen(16).unwrap();
    let bound = first.local_addr().unwrap();
    drop(first);
    let second = TcpAcceptor::bind(bound).unwrap();
    second.listen(16).unwrap();
  }
}
