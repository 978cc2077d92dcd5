//! Parallel quicksort: each partition posts its right half via
//! `post_waitable` and sorts its left half inline; the calling thread
//! drains the service's own queue via `run_pending_task` while it waits,
//! instead of just blocking, so a single worker-less caller thread can
//! still make progress on the posted halves.

use std::sync::Arc;

use ioservice::{Service, Waitable};

fn quicksort(service: &Arc<Service>, mut values: Vec<i64>) -> Vec<i64> {
  if values.len() <= 1 {
    return values;
  }
  let pivot = values.remove(0);
  let (left, right): (Vec<i64>, Vec<i64>) = values.into_iter().partition(|v| *v < pivot);

  let service_for_right = service.clone();
  let waitable: Waitable<Vec<i64>> = service
    .post_waitable(move || quicksort(&service_for_right, right))
    .unwrap();

  let mut sorted_left = quicksort(service, left);

  let sorted_right = wait_while_helping(service, waitable);

  sorted_left.push(pivot);
  sorted_left.extend(sorted_right);
  sorted_left
}

fn wait_while_helping<T>(service: &Arc<Service>, waitable: Waitable<T>) -> T {
  loop {
    if let Some(value) = waitable.try_get() {
      return value;
    }
    service.run_pending_task();
  }
}

#[test]
fn quicksort_matches_the_standard_library_sort() {
  let service = Arc::new(Service::new());
  let input = vec![312, 23, 512, 12, 42, 512, 0, -1];

  let mut expected = input.clone();
  expected.sort();

  let service_for_sort = service.clone();
  let result = quicksort(&service_for_sort, input);

  assert_eq!(result, expected);
  assert_eq!(result, vec![-1, 0, 12, 23, 42, 312, 512, 512]);
}

#[test]
fn quicksort_handles_already_sorted_and_empty_input() {
  let service = Arc::new(Service::new());
  assert_eq!(quicksort(&service, vec![]), Vec::<i64>::new());
  assert_eq!(quicksort(&service, vec![1]), vec![1]);
  assert_eq!(quicksort(&service, vec![1, 2, 3, 4, 5]), vec![1, 2, 3, 4, 5]);
}

#[test]
fn quicksort_matches_the_standard_library_sort_on_random_input() {
  let service = Arc::new(Service::new());
  for _ in 0..20 {
    let len = fastrand::usize(0..200);
    let input: Vec<i64> = (0..len).map(|_| fastrand::i64(-1000..1000)).collect();
    let mut expected = input.clone();
    expected.sort();
    assert_eq!(quicksort(&service, input), expected);
  }
}
