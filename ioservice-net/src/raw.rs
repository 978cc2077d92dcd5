//! Synchronous socket setup: `socket(2)`/`setsockopt(2)`/`bind(2)`/`listen(2)`.
//!
//! Per the spec these are OS primitives the acceptor/socket wrappers call
//! directly, outside the ring: only accept/connect/read/write go through
//! `ioservice`'s ring poster. Grounded on the teacher's `op::ops::{bind,
//! listen}::run_blocking` for the syscalls themselves.

use std::io;
use std::mem;
use std::net::SocketAddr;
use std::os::fd::RawFd;

use crate::net_utils;

/// `socket(2)` for `addr`'s address family, `SOCK_STREAM`, close-on-exec.
pub(crate) fn new_tcp_socket(addr: SocketAddr) -> io::Result<RawFd> {
  let fd = unsafe {
    libc::socket(net_utils::domain_of(addr), libc::SOCK_STREAM | libc::SOCK_CLOEXEC, 0)
  };
  if fd < 0 {
    return Err(io::Error::last_os_error());
  }
  Ok(fd)
}

/// `setsockopt(SO_REUSEADDR)` and, on platforms that have it, `SO_REUSEPORT`
/// — the acceptor-setup convention named in the spec's OS-dependency
/// section, so rebinding a just-restarted listener doesn't race `TIME_WAIT`.
pub(crate) fn set_reuse(fd: RawFd) -> io::Result<()> {
  let one: libc::c_int = 1;
  let optlen = mem::size_of_val(&one) as libc::socklen_t;
  unsafe {
    if libc::setsockopt(
      fd,
      libc::SOL_SOCKET,
      libc::SO_REUSEADDR,
      &one as *const _ as *const libc::c_void,
      optlen,
    ) < 0
    {
      return Err(io::Error::last_os_error());
    }
  }
  #[cfg(any(target_os = "linux", target_os = "android"))]
  unsafe {
    if libc::setsockopt(
      fd,
      libc::SOL_SOCKET,
      libc::SO_REUSEPORT,
      &one as *const _ as *const libc::c_void,
      optlen,
    ) < 0
    {
      return Err(io::Error::last_os_error());
    }
  }
  Ok(())
}

pub(crate) fn bind(fd: RawFd, addr: SocketAddr) -> io::Result<()> {
  let (storage, len) = net_utils::std_sockaddr_to_libc(addr);
  let ret =
    unsafe { libc::bind(fd, (&storage as *const libc::sockaddr_storage).cast(), len) };
  if ret < 0 {
    return Err(io::Error::last_os_error());
  }
  Ok(())
}

pub(crate) fn listen(fd: RawFd, backlog: i32) -> io::Result<()> {
  let ret = unsafe { libc::listen(fd, backlog) };
  if ret < 0 {
    return Err(io::Error::last_os_error());
  }
  Ok(())
}

/// Creates, configures for reuse, and binds a listening socket in one call.
/// Closes the fd and returns the error if any step fails.
pub(crate) fn bind_listener(addr: SocketAddr) -> io::Result<RawFd> {
  let fd = new_tcp_socket(addr)?;
  if let Err(e) = set_reuse(fd).and_then(|()| bind(fd, addr)) {
    unsafe { libc::close(fd) };
    return Err(e);
  }
  Ok(fd)
}
