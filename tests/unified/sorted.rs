use slist::List;
use crate::Rng;

#[test]
fn test_insert_sorted_stays_sorted() {
  for seed in 1 .. 50 {
    let mut rng = Rng::new(seed);
    let mut list = List::new();

    for _ in 0 .. rng.below(64) {
      let _ = list.insert_sorted(rng.below(16), u64::cmp);

      let mut prev = None;
      let sorted = list.for_each(|&x| {
        let ok = prev.map_or(true, |p| p <= x);
        prev = Some(x);
        ok
      });

      assert!(sorted);
    }
  }
}

#[test]
fn test_insert_sorted_is_stable() {
  let mut rng = Rng::new(3);
  let mut list = List::new();
  let mut model: Vec<(u64, usize)> = Vec::new();

  for i in 0 .. 200 {
    let x = (rng.below(8), i);
    let _ = list.insert_sorted(x, |a, b| a.0.cmp(&b.0));
    model.push(x);
  }

  // `sort_by_key` is stable, so equal keys keep insertion order.

  model.sort_by_key(|x| x.0);

  let mut r = Vec::new();
  let _ = list.for_each(|&x| { r.push(x); true });
  assert!(r == model);
}
