#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

mod model;
mod sorted;

// A small xorshift generator so that runs are reproducible without pulling in
// a randomness crate.

pub(crate) struct Rng(u64);

impl Rng {
  pub(crate) fn new(seed: u64) -> Self {
    Self(seed | 1)
  }

  pub(crate) fn next(&mut self) -> u64 {
    let mut x = self.0;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    self.0 = x;
    x
  }

  pub(crate) fn below(&mut self, n: u64) -> u64 {
    self.next() % n
  }
}
