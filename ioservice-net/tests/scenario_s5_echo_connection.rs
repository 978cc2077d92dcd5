//! Echo connection: an acceptor arms one `async_accept`; each accepted
//! connection gets a read -> write -> read loop that echoes whatever it
//! reads until the peer shuts down its write side (a zero-length read).
//! Clients are plain synchronous `std::net::TcpStream`s — only the server
//! side exercises this crate's async wrappers.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use ioservice::Service;
use ioservice_net::{TcpAcceptor, TcpStream};

fn arm_acceptor(acceptor: Arc<TcpAcceptor>, service: Arc<Service>) {
  let service_for_accept = service.clone();
  acceptor
    .async_accept(&service, move |result| {
      let (stream, _peer) = result.expect("accept failed");
      echo_loop(Arc::new(stream), service_for_accept.clone());
      arm_acceptor(acceptor, service_for_accept);
    })
    .unwrap();
}

fn echo_loop(stream: Arc<TcpStream>, service: Arc<Service>) {
  let buf = vec![0u8; 1024];
  let stream_for_write = stream.clone();
  let service_for_write = service.clone();
  stream
    .async_read_some(&service, buf, move |result, buf| {
      let n = match result {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
      };
      let to_write = buf[..n].to_vec();
      let stream_for_next = stream_for_write.clone();
      let service_for_next = service_for_write.clone();
      stream_for_write
        .async_write_some(&service_for_write, to_write, move |result, _buf| {
          result.expect("write failed");
          echo_loop(stream_for_next, service_for_next);
        })
        .unwrap();
    })
    .unwrap();
}

fn run_server(
  addr: SocketAddr,
  workers: usize,
) -> (Arc<Service>, SocketAddr, Vec<thread::JoinHandle<()>>) {
  let acceptor = Arc::new(TcpAcceptor::bind(addr).unwrap());
  acceptor.listen(128).unwrap();
  let bound = acceptor.local_addr().unwrap();
  let service = Arc::new(Service::new());

  arm_acceptor(acceptor, service.clone());

  let handles = (0..workers)
    .map(|_| {
      let service = service.clone();
      thread::spawn(move || service.run().unwrap())
    })
    .collect();

  (service, bound, handles)
}

#[test]
fn single_client_echoes_hello_then_sees_a_clean_close() {
  let (service, addr, workers) = run_server("127.0.0.1:0".parse().unwrap(), 1);

  let mut client = std::net::TcpStream::connect(addr).unwrap();
  client.write_all(b"hello").unwrap();
  let mut buf = [0u8; 5];
  client.read_exact(&mut buf).unwrap();
  assert_eq!(&buf, b"hello");

  client.shutdown(std::net::Shutdown::Write).unwrap();
  let mut trailing = Vec::new();
  client.read_to_end(&mut trailing).unwrap();
  assert!(trailing.is_empty());

  service.stop();
  for w in workers {
    w.join().unwrap();
  }
}

#[test]
fn ten_concurrent_clients_each_send_a_hundred_messages() {
  let (service, addr, workers) = run_server("127.0.0.1:0".parse().unwrap(), 4);

  let successes = Arc::new(AtomicUsize::new(0));
  let clients: Vec<_> = (0..10)
    .map(|i| {
      let successes = successes.clone();
      thread::spawn(move || {
        let mut client = std::net::TcpStream::connect(addr).unwrap();
        for msg in 0..100 {
          let padding = "x".repeat(fastrand::usize(0..64));
          let payload = format!("client-{i}-msg-{msg}-{padding}");
          client.write_all(payload.as_bytes()).unwrap();
          let mut buf = vec![0u8; payload.len()];
          client.read_exact(&mut buf).unwrap();
          assert_eq!(buf, payload.as_bytes());
          successes.fetch_add(1, Ordering::SeqCst);
        }
      })
    })
    .collect();

  for client in clients {
    client.join().unwrap();
  }

  assert_eq!(successes.load(Ordering::SeqCst), 1000);

  service.stop();
  for w in workers {
    w.join().unwrap();
  }
}
