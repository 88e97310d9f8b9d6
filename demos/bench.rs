use std::time::Instant;
use std::hint;
use slist::List;

const COUNT: usize = 1_000_000;

fn warmup() {
  let mut s = 1u64;
  for i in 0 .. 1_000_000_000 { s = s.wrapping_mul(i); }
  let _: u64 = hint::black_box(s);
}

fn timeit<A, F>(f: F) -> f64 where F: FnOnce() -> A {
  let start = Instant::now();
  let _: A = hint::black_box(f());
  let stop = Instant::now();
  stop.saturating_duration_since(start).as_nanos() as f64
}

fn run_bench<F, A, B>(name: &str, t: A, f: F) where F: Fn(A, usize) -> B {
  let elapsed = timeit(|| f(t, hint::black_box(COUNT)));
  print!("{:25} {:.3} ns\n", name, elapsed / (COUNT as f64));
}

#[inline(never)]
fn bench_prepend_global(_: (), count: usize) -> u64 {
  let mut list = List::new();
  for i in 0 .. count { let _ = list.prepend(i as u64); }
  let mut s = 0;
  while let Some(x) = list.pop_front() { s = s + x; }
  s
}

#[inline(never)]
fn bench_prepend_bumpalo(bump: &bumpalo::Bump, count: usize) -> u64 {
  let mut list = List::new_in(bump);
  for i in 0 .. count { let _ = list.prepend(i as u64); }
  let mut s = 0;
  while let Some(x) = list.pop_front() { s = s + x; }
  s
}

#[inline(never)]
fn bench_sorted_global(_: (), count: usize) -> usize {
  // Ordered insert is quadratic, so keep this one short.

  let mut list = List::new();
  let mut x = 1_u64;
  for _ in 0 .. count / 1000 {
    x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    let _ = list.insert_sorted(x >> 48, u64::cmp);
  }
  list.len()
}

fn main() {
  warmup();

  let bump = &bumpalo::Bump::new();

  run_bench("prepend/pop (global)", (), bench_prepend_global);
  run_bench("prepend/pop (bumpalo)", bump, bench_prepend_bumpalo);
  run_bench("insert_sorted (global)", (), bench_sorted_global);
}
