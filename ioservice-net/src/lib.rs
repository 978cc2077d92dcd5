//! TCP acceptor/socket/resolver wrappers over [`ioservice`]'s async
//! operation protocol (§4.11's external-wrapper contract: only accept,
//! connect, read, and write go through the kernel ring; everything else —
//! socket setup, bind, listen, name resolution — is a synchronous OS call
//! or a posted compute task).
//!
//! | Type | Responsibility |
//! |---|---|
//! | [`TcpAcceptor`] | `bind`/`listen` synchronously, `async_accept` via the ring |
//! | [`TcpStream`] | `async_connect` (tries each resolved address in turn), `async_read_some`, `async_write_some` |
//! | [`Resolver`] | synchronous and posted-async name resolution |

mod acceptor;
mod net_utils;
mod ops;
mod raw;
mod resolver;
mod stream;

pub use acceptor::TcpAcceptor;
pub use resolver::Resolver;
pub use stream::TcpStream;
