#![cfg_attr(docsrs, feature(doc_cfg))]

//! # ioservice
//!
//! A proactor-style, multi-threaded execution framework layered over Linux
//! io_uring. A [`Service`] owns a shared task queue; any number of threads
//! call [`Service::run`] to become workers, each alternating between
//! draining its own per-thread ring core ([`ring::RingCore`], via [`ioring`])
//! and blocking on the shared queue. [`Strand`] serializes a subset of work
//! on top of a service without dedicating a thread to it.
//!
//! ## Getting started
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use ioservice::Service;
//!
//! let service = Arc::new(Service::new());
//! let counter = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..50 {
//!     let counter = counter.clone();
//!     service.post(move || { counter.fetch_add(100, Ordering::SeqCst); }).unwrap();
//! }
//!
//! let mut workers = Vec::new();
//! for _ in 0..5 {
//!     let service = service.clone();
//!     workers.push(std::thread::spawn(move || service.run().unwrap()));
//! }
//!
//! std::thread::sleep(std::time::Duration::from_millis(50));
//! service.stop();
//! for w in workers { w.join().unwrap(); }
//!
//! assert_eq!(counter.load(Ordering::SeqCst), 5000);
//! ```
//!
//! ## Module map
//!
//! | Module | Role |
//! |---|---|
//! | [`task`] | The unit of deferred work (C1) |
//! | [`queue`] | MPMC task queue backing every service (C2) |
//! | [`interrupt`] | Reference-counted lifecycle flag (C3) |
//! | [`callstack`] | Thread-local reentrancy marker (C4) |
//! | [`service`] | The executor itself (C5); [`Service::new_sharing_ring_work_queue`] attaches to the process's shared ring work queue |
//! | [`async_result`] | One-shot result cell (C6) |
//! | [`async_op`] | Initiator/completer protocol (C7) |
//! | [`ring`] | Per-worker io_uring core (C8) |
//! | [`poster`] | `post_ring`/`post_compute` façades (C9) |
//! | [`strand`] | Serialized execution context (C10) |
//!
//! External wrappers (acceptor/socket/resolver, C11) live in the sibling
//! `ioservice-net` crate.

mod async_op;
mod async_result;
mod callstack;
mod error;
mod interrupt;
mod poster;
mod queue;
mod ring;
mod service;
mod strand;
mod sync;
mod task;
mod waitable;

pub use async_op::Initiator;
pub use async_result::AsyncResult;
pub use error::ServiceError;
pub use interrupt::{InterruptFlag, InterruptHandle};
pub use poster::{post_compute, post_ring};
pub use queue::TaskQueue;
pub use service::Service;
pub use strand::Strand;
pub use task::Task;
pub use waitable::Waitable;
