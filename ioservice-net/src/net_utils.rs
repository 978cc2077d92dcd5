//! `sockaddr` conversions shared by the acceptor/socket/resolver wrappers.
//!
//! Grounded on `ioservice`'s (unused, pre-rewrite) `net_utils.rs`, which
//! itself traces back to the teacher's `op::net_utils` helpers used by
//! `Accept`/`Bind`/`Connect`. Kept as plain functions rather than a trait
//! since there's exactly one direction each way and no third address family
//! in scope.

use std::mem;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

/// Reads a `sockaddr_storage` the kernel has just filled in (e.g. via
/// `accept4(2)`/`IORING_OP_ACCEPT`) back into a [`SocketAddr`].
pub(crate) fn libc_sockaddr_to_std(
  storage: &libc::sockaddr_storage,
) -> std::io::Result<SocketAddr> {
  if storage.ss_family == libc::AF_INET as libc::sa_family_t {
    // SAFETY: `ss_family` says this storage holds a `sockaddr_in`.
    let sin: libc::sockaddr_in =
      unsafe { *(storage as *const _ as *const libc::sockaddr_in) };
    let ip = Ipv4Addr::from(u32::from_be(sin.sin_addr.s_addr));
    let port = u16::from_be(sin.sin_port);
    Ok(SocketAddr::V4(SocketAddrV4::new(ip, port)))
  } else if storage.ss_family == libc::AF_INET6 as libc::sa_family_t {
    // SAFETY: `ss_family` says this storage holds a `sockaddr_in6`.
    let sin6: libc::sockaddr_in6 =
      unsafe { *(storage as *const _ as *const libc::sockaddr_in6) };
    let ip = Ipv6Addr::from(sin6.sin6_addr.s6_addr);
    let port = u16::from_be(sin6.sin6_port);
    Ok(SocketAddr::V6(SocketAddrV6::new(
      ip,
      port,
      sin6.sin6_flowinfo,
      sin6.sin6_scope_id,
    )))
  } else {
    Err(std::io::Error::from_raw_os_error(libc::EAFNOSUPPORT))
  }
}

/// Builds the `sockaddr_storage` + length pair `bind(2)`/`connect(2)`/the
/// `IORING_OP_CONNECT` submission expect.
pub(crate) fn std_sockaddr_to_libc(
  addr: SocketAddr,
) -> (libc::sockaddr_storage, libc::socklen_t) {
  // SAFETY: `sockaddr_storage` is a plain-old-data struct; every field
  // accepts an all-zero bit pattern.
  let mut storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
  let len = match addr {
    SocketAddr::V4(v4) => {
      let sin = libc::sockaddr_in {
        sin_family: libc::AF_INET as libc::sa_family_t,
        sin_port: v4.port().to_be(),
        sin_addr: libc::in_addr { s_addr: u32::from(*v4.ip()).to_be() },
        sin_zero: [0; 8],
        #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
        sin_len: mem::size_of::<libc::sockaddr_in>() as u8,
      };
      // SAFETY: `sockaddr_in` fits inside `sockaddr_storage` by
      // definition; both are POD.
      unsafe {
        std::ptr::write(&mut storage as *mut _ as *mut libc::sockaddr_in, sin)
      };
      mem::size_of::<libc::sockaddr_in>()
    }
    SocketAddr::V6(v6) => {
      let sin6 = libc::sockaddr_in6 {
        sin6_family: libc::AF_INET6 as libc::sa_family_t,
        sin6_port: v6.port().to_be(),
        sin6_flowinfo: v6.flowinfo(),
        sin6_addr: libc::in6_addr { s6_addr: v6.ip().octets() },
        sin6_scope_id: v6.scope_id(),
        #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
        sin6_len: mem::size_of::<libc::sockaddr_in6>() as u8,
      };
      // SAFETY: same as the V4 arm.
      unsafe {
        std::ptr::write(&mut storage as *mut _ as *mut libc::sockaddr_in6, sin6)
      };
      mem::size_of::<libc::sockaddr_in6>()
    }
  };
  (storage, len as libc::socklen_t)
}

/// The `AF_INET`/`AF_INET6` domain to pass to `socket(2)` for `addr`.
pub(crate) fn domain_of(addr: SocketAddr) -> libc::c_int {
  match addr {
    SocketAddr::V4(_) => libc::AF_INET,
    SocketAddr::V6(_) => libc::AF_INET6,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn v4_round_trips() {
    let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
    let (storage, _len) = std_sockaddr_to_libc(addr);
    assert_eq!(libc_sockaddr_to_std(&storage).unwrap(), addr);
  }

  #[test]
  fn v6_round_trips() {
    let addr: SocketAddr = "[::1]:9090".parse().unwrap();
    let (storage, _len) = std_sockaddr_to_libc(addr);
    assert_eq!(libc_sockaddr_to_std(&storage).unwrap(), addr);
  }

  #[test]
  fn unknown_family_is_an_error() {
    // SAFETY: zeroed `sockaddr_storage` has `ss_family == 0`, which is
    // neither `AF_INET` nor `AF_INET6` on any target this crate builds for.
    let storage: libc::sockaddr_storage = unsafe { mem::zeroed() };
    assert!(libc_sockaddr_to_std(&storage).is_err());
  }
}
