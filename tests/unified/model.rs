use std::collections::VecDeque;
use slist::List;
use slist::allocator::Budget;
use crate::Rng;

fn contents<A: allocator_api2::alloc::Allocator>(list: &List<u64, A>) -> VecDeque<u64> {
  let mut r = VecDeque::new();
  let _ = list.for_each(|&x| { r.push_back(x); true });
  r
}

#[test]
fn test_against_vec_deque() {
  for seed in 1 .. 20 {
    let mut rng = Rng::new(seed);
    let mut list = List::new();
    let mut model = VecDeque::new();

    for step in 0 .. 500 {
      let x = rng.below(1000);
      let n = model.len() as u64;

      match rng.below(9) {
        0 => { let _ = list.append(x); model.push_back(x); }
        1 => { let _ = list.prepend(x); model.push_front(x); }
        2 => assert!(list.pop_front() == model.pop_front()),
        3 => assert!(list.pop_back() == model.pop_back()),
        4 => {
          let i = rng.below(n + 2) as usize;
          assert!(list.get_at(i) == model.get(i));
        }
        5 => {
          let i = rng.below(n + 2) as usize;
          match model.get_mut(i) {
            Some(y) => assert!(list.set_at(i, x) == Ok(std::mem::replace(y, x))),
            None => assert!(list.set_at(i, x) == Err(x)),
          }
        }
        6 => {
          let i = rng.below(n + 2) as usize;
          if i <= model.len() {
            assert!(list.insert_at(i, x).is_ok());
            model.insert(i, x);
          } else {
            assert!(list.insert_at(i, x) == Err(x));
          }
        }
        7 => {
          let i = rng.below(n + 2) as usize;
          assert!(list.remove_at(i) == model.remove(i));
        }
        _ => {
          if step % 50 == 0 { list.destroy(); model.clear(); }
        }
      }

      assert!(list.len() == model.len());
      assert!(list.front() == model.front());
      assert!(list.back() == model.back());
    }

    assert!(contents(&list) == model);
  }
}

#[test]
fn test_against_vec_deque_with_failures() {
  let mut rng = Rng::new(7);
  let budget = Budget::new(0);
  let mut list = List::new_in(&budget);
  let mut model = VecDeque::new();

  for _ in 0 .. 2000 {
    let x = rng.below(1000);

    if rng.below(4) == 0 {
      budget.refill(rng.below(3) as usize);
    }

    match rng.below(4) {
      0 => if list.try_append(x).is_ok() { model.push_back(x) },
      1 => if list.try_prepend(x).is_ok() { model.push_front(x) },
      2 => assert!(list.pop_front() == model.pop_front()),
      _ => assert!(list.pop_back() == model.pop_back()),
    }

    assert!(contents(&list) == model);
  }
}
