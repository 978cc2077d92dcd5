//! [`Initiator`] implementations backing the acceptor/socket wrappers:
//! accept, connect, read, write. Each stages one `io_uring` submission and
//! translates its raw completion result into the wrapper's output type.
//!
//! Grounded on `ioservice::ring`'s `RingCore::submit`, which requires the
//! storage any submitted entry points into to stay at a fixed address from
//! `build()` (called on a stack-local value) until `translate()` consumes
//! it (called after the initiator has been boxed into the pending
//! registry, at a different address). `AcceptInit`/`ConnectInit` box their
//! `sockaddr_storage` for exactly that reason; `ReadInit`/`WriteInit` don't
//! need to, since a `Vec<u8>`'s backing buffer already lives on the heap,
//! independent of the `Vec` handle's own address.

use std::io;
use std::net::SocketAddr;
use std::os::fd::RawFd;

use ioservice::Initiator;

use crate::net_utils;

pub(crate) struct AcceptInit {
  fd: RawFd,
  storage: Box<(libc::sockaddr_storage, libc::socklen_t)>,
}

impl AcceptInit {
  pub(crate) fn new(fd: RawFd) -> Self {
    let storage = unsafe { std::mem::zeroed::<libc::sockaddr_storage>() };
    let len = size_of::<libc::sockaddr_storage>() as libc::socklen_t;
    Self { fd, storage: Box::new((storage, len)) }
  }
}

impl Initiator for AcceptInit {
  type Output = io::Result<(RawFd, SocketAddr)>;

  fn build(&mut self) -> ioring::submission::Entry {
    let addr_ptr = &raw mut self.storage.0 as *mut libc::sockaddr;
    let len_ptr = &raw mut self.storage.1;
    ioring::operation::Accept::new(self.fd, addr_ptr, len_ptr).build()
  }

  fn translate(self, raw: io::Result<i32>) -> Self::Output {
    let peer_fd = raw?;
    let addr = net_utils::libc_sockaddr_to_std(&self.storage.0)?;
    Ok((peer_fd as RawFd, addr))
  }
}

pub(crate) struct ConnectInit {
  fd: RawFd,
  storage: Box<(libc::sockaddr_storage, libc::socklen_t)>,
}

impl ConnectInit {
  pub(crate) fn new(fd: RawFd, addr: SocketAddr) -> Self {
    let (storage, len) = net_utils::std_sockaddr_to_libc(addr);
    Self { fd, storage: Box::new((storage, len)) }
  }
}

impl Initiator for ConnectInit {
  type Output = io::Result<()>;

  fn build(&mut self) -> ioring::submission::Entry {
    let addr_ptr = &raw const self.storage.0 as *const libc::sockaddr;
    ioring::operation::Connect::new(self.fd, addr_ptr, self.storage.1).build()
  }

  fn translate(self, raw: io::Result<i32>) -> Self::Output {
    raw.map(|_| ())
  }
}

pub(crate) struct ReadInit {
  fd: RawFd,
  buf: Vec<u8>,
}

impl ReadInit {
  pub(crate) fn new(fd: RawFd, buf: Vec<u8>) -> Self {
    Self { fd, buf }
  }
}

impl Initiator for ReadInit {
  type Output = (io::Result<usize>, Vec<u8>);

  fn build(&mut self) -> ioring::submission::Entry {
    let len = self.buf.len() as u32;
    ioring::operation::Read::new(self.fd, self.buf.as_mut_ptr(), len).build()
  }

  fn translate(self, raw: io::Result<i32>) -> Self::Output {
    (raw.map(|n| n as usize), self.buf)
  }
}

pub(crate) struct WriteInit {
  fd: RawFd,
  buf: Vec<u8>,
}

impl WriteInit {
  pub(crate) fn new(fd: RawFd, buf: Vec<u8>) -> Self {
    Self { fd, buf }
  }
}

impl Initiator for WriteInit {
  type Output = (io::Result<usize>, Vec<u8>);

  fn build(&mut self) -> ioring::submission::Entry {
    let len = self.buf.len() as u32;
    ioring::operation::Write::new(self.fd, self.buf.as_ptr(), len).build()
  }

  fn translate(self, raw: io::Result<i32>) -> Self::Output {
    (raw.map(|n| n as usize), self.buf)
  }
}
