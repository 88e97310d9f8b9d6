//! Allocator adaptors for bounding node storage.
//!
//! Every [`List`](crate::List) takes its nodes from an
//! [`Allocator`](allocator_api2::alloc::Allocator). The [`Budget`] adaptor
//! wraps a parent allocator and grants it a fixed number of allocations, after
//! which every request fails. This gives a hard cap on the number of nodes a
//! list may hold, and a deterministic way to exercise the `try_` operations.

use allocator_api2::alloc::AllocError;
use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use core::alloc::Layout;
use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;

/// An allocator that permits a fixed number of allocations from its parent.
///
/// Deallocation is always forwarded and does not give budget back; use
/// [`refill`](Self::refill) for that.

pub struct Budget<A: Allocator = Global> {
  remaining: Cell<usize>,
  parent: A,
}

impl Budget<Global> {
  /// A budget of `count` allocations from the global allocator.

  pub fn new(count: usize) -> Self {
    Self::new_in(count, Global)
  }
}

impl<A: Allocator> Budget<A> {
  /// A budget of `count` allocations from `parent`.

  pub fn new_in(count: usize, parent: A) -> Self {
    Self { remaining: Cell::new(count), parent }
  }

  /// The number of allocations that will still succeed, assuming the parent
  /// allocator does not fail first.

  pub fn remaining(&self) -> usize {
    self.remaining.get()
  }

  /// Resets the number of remaining allocations to `count`.

  pub fn refill(&self, count: usize) {
    self.remaining.set(count)
  }

  /// A reference to the parent allocator.

  pub fn parent(&self) -> &A {
    &self.parent
  }
}

unsafe impl<A: Allocator> Allocator for Budget<A> {
  #[inline(always)]
  fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
    let n = self.remaining.get();

    if n == 0 {
      return Err(AllocError);
    }

    // Only a successful parent allocation is charged against the budget.

    let p = self.parent.allocate(layout)?;
    self.remaining.set(n - 1);
    Ok(p)
  }

  #[inline(always)]
  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    self.parent.deallocate(ptr, layout)
  }
}

impl<A: Allocator> fmt::Debug for Budget<A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Budget")
      .field("remaining", &self.remaining.get())
      .finish()
  }
}
