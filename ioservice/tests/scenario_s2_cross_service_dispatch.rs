//! Cross-service dispatch: two independently-running services, 20 workers
//! each, each posted task either dispatches onto its own service (inline)
//! or the other one (reposted). Proves `dispatch`'s local/foreign split by
//! comparing a shared counter's value immediately before and after the
//! dispatch call returns.
//!
//! A foreign dispatch only posts its increment — nothing stops the other
//! service's worker from picking it up before the posting task samples the
//! counter again. Each foreign increment is gated behind an `AtomicBool`
//! the poster only opens after taking its "after" sample, so the proof
//! doesn't depend on scheduling luck.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use ioservice::Service;

const WORKERS: usize = 20;
const TASKS_PER_SERVICE: usize = 50;
const INCREMENT: usize = 100;

fn spawn_workers(service: &Arc<Service>, count: usize) -> Vec<thread::JoinHandle<()>> {
  (0..count)
    .map(|_| {
      let service = service.clone();
      thread::spawn(move || service.run().unwrap())
    })
    .collect()
}

#[test]
fn local_dispatch_runs_inline_foreign_dispatch_reposts() {
  let s1 = Arc::new(Service::new());
  let s2 = Arc::new(Service::new());
  let counter = Arc::new(AtomicUsize::new(0));
  let proofs_ok = Arc::new(AtomicUsize::new(0));
  let proofs_total = Arc::new(AtomicUsize::new(0));

  for i in 0..TASKS_PER_SERVICE {
    let dispatch_local = i % 2 == 0;
    schedule_task(&s1, &s2, dispatch_local, &counter, &proofs_ok, &proofs_total);
    schedule_task(&s2, &s1, dispatch_local, &counter, &proofs_ok, &proofs_total);
  }

  let workers1 = spawn_workers(&s1, WORKERS);
  let workers2 = spawn_workers(&s2, WORKERS);

  thread::sleep(std::time::Duration::from_millis(200));
  s1.stop();
  s2.stop();
  for w in workers1 {
    w.join().unwrap();
  }
  for w in workers2 {
    w.join().unwrap();
  }

  assert_eq!(counter.load(Ordering::SeqCst), 2 * TASKS_PER_SERVICE * INCREMENT);
  assert_eq!(proofs_total.load(Ordering::SeqCst), 2 * TASKS_PER_SERVICE);
  assert_eq!(proofs_ok.load(Ordering::SeqCst), proofs_total.load(Ordering::SeqCst));
}

fn schedule_task(
  owner: &Arc<Service>,
  other: &Arc<Service>,
  dispatch_local: bool,
  counter: &Arc<AtomicUsize>,
  proofs_ok: &Arc<AtomicUsize>,
  proofs_total: &Arc<AtomicUsize>,
) {
  let owner_for_task = owner.clone();
  let other_for_task = other.clone();
  let counter = counter.clone();
  let proofs_ok = proofs_ok.clone();
  let proofs_total = proofs_total.clone();

  owner
    .post(move || {
      let target = if dispatch_local { &owner_for_task } else { &other_for_task };
      let before = counter.load(Ordering::SeqCst);

      if dispatch_local {
        // Inline: the increment has already happened by the time
        // `dispatch` returns, no gate needed.
        let counter = counter.clone();
        target.dispatch(move || {
          counter.fetch_add(INCREMENT, Ordering::SeqCst);
        })
        .unwrap();
        let after = counter.load(Ordering::SeqCst);
        proofs_total.fetch_add(1, Ordering::SeqCst);
        if after == before + INCREMENT {
          proofs_ok.fetch_add(1, Ordering::SeqCst);
        }
      } else {
        // Foreign: gate the increment until this task has sampled
        // "after", so an eager remote worker can't race the proof.
        let gate = Arc::new((Mutex::new(false), std::sync::Condvar::new()));
        let gate_for_task = gate.clone();
        let counter_for_task = counter.clone();
        target.dispatch(move || {
          let (lock, cvar) = &*gate_for_task;
          let mut opened = lock.lock().unwrap();
          while !*opened {
            opened = cvar.wait(opened).unwrap();
          }
          counter_for_task.fetch_add(INCREMENT, Ordering::SeqCst);
        })
        .unwrap();

        let after = counter.load(Ordering::SeqCst);
        proofs_total.fetch_add(1, Ordering::SeqCst);
        if after == before {
          proofs_ok.fetch_add(1, Ordering::SeqCst);
        }

        let (lock, cvar) = &*gate;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
      }
    })
    .unwrap();
}
