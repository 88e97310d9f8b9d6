#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use core::alloc::Layout;
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

pub mod allocator;

mod ptr;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A singly-linked list whose nodes are obtained from the allocator `A`.
///
/// The list is either empty or a chain of nodes starting at the head. Its
/// length is not stored; [`len`](Self::len) walks the chain.
///
/// Every operation that creates a node comes in two forms. The plain form
/// panics through [`handle_alloc_error`](alloc::alloc::handle_alloc_error)
/// when the allocator fails, and the `try_` form returns [`AllocError`]. In
/// both cases a failed operation leaves the list exactly as it was.
///
/// Removing from an empty list, or addressing an index past the end, is not an
/// error. Those operations report an absent result instead.

pub struct List<T, A: Allocator = Global> {
  head: Link<T>,
  allocator: A,
  marker: PhantomData<T>,
}

unsafe impl<T, A: Allocator> Send for List<T, A> where T: Send, A: Send { }

unsafe impl<T, A: Allocator> Sync for List<T, A> where T: Sync, A: Sync { }

/// The allocator could not provide storage for a new node.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AllocError;

/// The ways an indexed insertion can fail.

#[derive(Debug)]
pub enum InsertError<T> {
  /// The index was greater than the length of the list. The value is handed
  /// back.
  OutOfRange(T),
  /// The allocator could not provide storage for the new node.
  Alloc(AllocError),
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
  value: T,
  next: Link<T>,
}

enum Error {
  AllocFailed(Layout),
}

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(_: Error) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Error) -> Result<T, Self> {
    match e {
      Error::AllocFailed(layout) =>
        alloc::alloc::handle_alloc_error(layout),
    }
  }
}

impl Fail for AllocError {
  #[inline(always)]
  fn fail<T>(_: Error) -> Result<T, Self> {
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Errors                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for AllocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("slist: failed to allocate a list node")
  }
}

impl core::error::Error for AllocError { }

impl From<allocator_api2::alloc::AllocError> for AllocError {
  fn from(_: allocator_api2::alloc::AllocError) -> Self {
    AllocError
  }
}

impl<T> fmt::Display for InsertError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InsertError::OutOfRange(_) => f.write_str("slist: insertion index out of range"),
      InsertError::Alloc(e) => fmt::Display::fmt(e, f),
    }
  }
}

impl<T: fmt::Debug> core::error::Error for InsertError<T> { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Node                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn alloc_node<T, A, E>(allocator: &A, value: T, next: Link<T>) -> Result<NonNull<Node<T>>, E>
where
  A: Allocator,
  E: Fail,
{
  // `Node<T>` always holds a link, so the layout is never zero-sized.

  let l = Layout::new::<Node<T>>();

  let Ok(p) = allocator.allocate(l) else {
    return E::fail(Error::AllocFailed(l));
  };

  let p = ptr::cast(p);
  unsafe { ptr::write(p, Node { value, next }) };
  Ok(p)
}

unsafe fn free_node<T, A>(allocator: &A, p: NonNull<Node<T>>) -> Node<T>
where
  A: Allocator,
{
  // SAFETY:
  //
  // - `p` was returned by `alloc_node` with this allocator.
  // - `p` has been unlinked, or is about to be, and is never read again.

  let node = ptr::read(p);
  allocator.deallocate(ptr::cast(p), Layout::new::<Node<T>>());
  node
}

// The functions below walk a chain starting from a link.
//
// SAFETY:
//
// `head` must be the head link of a well-formed chain whose nodes are all
// exclusively owned through it.

/// The link at position `index`, which is the link after the last node when
/// `index` is the length of the chain.

unsafe fn seek<T>(head: &mut Link<T>, index: usize) -> Option<&mut Link<T>> {
  let mut link = head;
  let mut i = index;

  while i > 0 {
    let p = (*link)?;
    link = &mut ptr::as_mut_ref(p).next;
    i = i - 1;
  }

  Some(link)
}

/// The link holding the last node, or `head` itself for an empty chain.

unsafe fn last<T>(head: &mut Link<T>) -> &mut Link<T> {
  let mut link = head;

  while let Some(p) = *link {
    let node = ptr::as_mut_ref(p);
    if node.next.is_none() { break; }
    link = &mut node.next;
  }

  link
}

/// The empty link after the last node.

unsafe fn tail<T>(head: &mut Link<T>) -> &mut Link<T> {
  let mut link = head;

  while let Some(p) = *link {
    link = &mut ptr::as_mut_ref(p).next;
  }

  link
}

/// The link before the first node that is strictly greater than `value`.

unsafe fn seek_sorted<'a, T, F>(head: &'a mut Link<T>, value: &T, compare: &mut F) -> &'a mut Link<T>
where
  F: FnMut(&T, &T) -> Ordering
{
  let mut link = head;

  while let Some(p) = *link {
    let node = ptr::as_mut_ref(p);
    if compare(value, &node.value) == Ordering::Less { break; }
    link = &mut node.next;
  }

  link
}

unsafe fn node_at<T>(head: Link<T>, index: usize) -> Link<T> {
  let mut link = head;
  let mut i = index;

  while let Some(p) = link {
    if i == 0 { return Some(p); }
    link = ptr::as_ref(p).next;
    i = i - 1;
  }

  None
}

/// Removes the node held by `link`, if any, and relinks its successor.

unsafe fn unlink<T, A>(allocator: &A, link: &mut Link<T>) -> Option<T>
where
  A: Allocator,
{
  let p = (*link)?;
  let node = free_node(allocator, p);
  *link = node.next;
  Some(node.value)
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn new_with<T, A, E>(value: T, allocator: A) -> Result<List<T, A>, E>
where
  A: Allocator,
  E: Fail,
{
  let p = alloc_node::<T, A, E>(&allocator, value, None)?;
  Ok(List { head: Some(p), allocator, marker: PhantomData })
}

fn append<T, A, E>(list: &mut List<T, A>, value: T) -> Result<&mut T, E>
where
  A: Allocator,
  E: Fail,
{
  // Allocate before touching the chain so that failure changes nothing.

  let p = alloc_node::<T, A, E>(&list.allocator, value, None)?;
  let link = unsafe { tail(&mut list.head) };
  *link = Some(p);
  Ok(unsafe { &mut ptr::as_mut_ref(p).value })
}

fn prepend<T, A, E>(list: &mut List<T, A>, value: T) -> Result<&mut T, E>
where
  A: Allocator,
  E: Fail,
{
  let p = alloc_node::<T, A, E>(&list.allocator, value, list.head)?;
  list.head = Some(p);
  Ok(unsafe { &mut ptr::as_mut_ref(p).value })
}

fn insert_at<T, A, E>(list: &mut List<T, A>, index: usize, value: T) -> Result<Result<&mut T, T>, E>
where
  A: Allocator,
  E: Fail,
{
  let Some(link) = (unsafe { seek(&mut list.head, index) }) else {
    return Ok(Err(value));
  };

  let p = alloc_node::<T, A, E>(&list.allocator, value, *link)?;
  *link = Some(p);
  Ok(Ok(unsafe { &mut ptr::as_mut_ref(p).value }))
}

fn insert_sorted<T, A, E, F>(list: &mut List<T, A>, value: T, compare: F) -> Result<&mut T, E>
where
  A: Allocator,
  E: Fail,
  F: FnMut(&T, &T) -> Ordering
{
  let mut compare = compare;
  let link = unsafe { seek_sorted(&mut list.head, &value, &mut compare) };
  let p = alloc_node::<T, A, E>(&list.allocator, value, *link)?;
  *link = Some(p);
  Ok(unsafe { &mut ptr::as_mut_ref(p).value })
}

impl<T> List<T, Global> {
  /// Creates an empty list backed by the global allocator. Does not allocate.

  pub const fn new() -> Self {
    Self { head: None, allocator: Global, marker: PhantomData }
  }

  /// Creates a list holding `value` backed by the global allocator.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn new_with(value: T) -> Self {
    unwrap(new_with(value, Global))
  }

  /// Creates a list holding `value` backed by the global allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_new_with(value: T) -> Result<Self, AllocError> {
    new_with(value, Global)
  }
}

impl<T, A: Allocator> List<T, A> {
  /// Creates an empty list backed by `allocator`. Does not allocate.

  pub const fn new_in(allocator: A) -> Self {
    Self { head: None, allocator, marker: PhantomData }
  }

  /// Creates a list holding `value` backed by `allocator`.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn new_with_in(value: T, allocator: A) -> Self {
    unwrap(new_with(value, allocator))
  }

  /// Creates a list holding `value` backed by `allocator`.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_new_with_in(value: T, allocator: A) -> Result<Self, AllocError> {
    new_with(value, allocator)
  }

  /// A reference to the allocator backing the list.

  pub fn allocator(&self) -> &A {
    &self.allocator
  }

  /// Releases every node, dropping the values they still hold, and leaves the
  /// list empty. Calling this on an empty list does nothing.

  pub fn destroy(&mut self) {
    while let Some(p) = self.head {
      let node = unsafe { free_node(&self.allocator, p) };
      self.head = node.next;
      drop::<T>(node.value);
    }
  }

  /// Returns `true` if the list holds no values.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.head.is_none()
  }

  /// The number of values in the list. This walks the whole chain.

  pub fn len(&self) -> usize {
    let mut n = 0;
    let _ = self.for_each(|_| { n = n + 1; true });
    n
  }

  /// Adds `value` at the tail and returns a reference to it.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn append(&mut self, value: T) -> &mut T {
    unwrap(append(self, value))
  }

  /// Adds `value` at the tail and returns a reference to it.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. The list is left
  /// unchanged.

  pub fn try_append(&mut self, value: T) -> Result<&mut T, AllocError> {
    append(self, value)
  }

  /// Adds `value` at the head and returns a reference to it.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn prepend(&mut self, value: T) -> &mut T {
    unwrap(prepend(self, value))
  }

  /// Adds `value` at the head and returns a reference to it.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. The list is left
  /// unchanged.

  pub fn try_prepend(&mut self, value: T) -> Result<&mut T, AllocError> {
    prepend(self, value)
  }

  /// Removes the first value, or returns `None` if the list is empty.

  pub fn pop_front(&mut self) -> Option<T> {
    unsafe { unlink(&self.allocator, &mut self.head) }
  }

  /// Removes the last value, or returns `None` if the list is empty.

  pub fn pop_back(&mut self) -> Option<T> {
    let link = unsafe { last(&mut self.head) };
    unsafe { unlink(&self.allocator, link) }
  }

  /// The first value, if any.

  pub fn front(&self) -> Option<&T> {
    self.head.map(|p| &unsafe { ptr::as_ref(p) }.value)
  }

  /// The last value, if any.

  pub fn back(&self) -> Option<&T> {
    let mut p = self.head?;

    loop {
      let node = unsafe { ptr::as_ref(p) };
      match node.next {
        Some(q) => p = q,
        None => return Some(&node.value),
      }
    }
  }

  /// The value at `index`, or `None` if `index` is out of range.

  pub fn get_at(&self, index: usize) -> Option<&T> {
    let p = unsafe { node_at(self.head, index) }?;
    Some(&unsafe { ptr::as_ref(p) }.value)
  }

  /// The value at `index`, or `None` if `index` is out of range.

  pub fn get_at_mut(&mut self, index: usize) -> Option<&mut T> {
    let p = unsafe { node_at(self.head, index) }?;
    Some(&mut unsafe { ptr::as_mut_ref(p) }.value)
  }

  /// Replaces the value at `index` and returns the previous one.
  ///
  /// If `index` is out of range the list is unchanged and `value` is handed
  /// back as the error.

  pub fn set_at(&mut self, index: usize, value: T) -> Result<T, T> {
    match unsafe { node_at(self.head, index) } {
      None => Err(value),
      Some(p) => Ok(mem::replace(&mut unsafe { ptr::as_mut_ref(p) }.value, value)),
    }
  }

  /// Inserts `value` so that it ends up at position `index`, shifting later
  /// values back by one. An `index` equal to the length appends.
  ///
  /// If `index` is greater than the length the list is unchanged and `value`
  /// is handed back as the error.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn insert_at(&mut self, index: usize, value: T) -> Result<&mut T, T> {
    unwrap(insert_at(self, index, value))
  }

  /// Inserts `value` so that it ends up at position `index`, shifting later
  /// values back by one. An `index` equal to the length appends.
  ///
  /// # Errors
  ///
  /// [`InsertError::OutOfRange`] is returned, with `value`, if `index` is
  /// greater than the length. [`InsertError::Alloc`] is returned on failure to
  /// allocate memory. The list is left unchanged in both cases.

  pub fn try_insert_at(&mut self, index: usize, value: T) -> Result<&mut T, InsertError<T>> {
    match insert_at::<T, A, AllocError>(self, index, value) {
      Ok(Ok(x)) => Ok(x),
      Ok(Err(value)) => Err(InsertError::OutOfRange(value)),
      Err(e) => Err(InsertError::Alloc(e)),
    }
  }

  /// Removes the value at `index`, or returns `None` if `index` is out of
  /// range.

  pub fn remove_at(&mut self, index: usize) -> Option<T> {
    let link = unsafe { seek(&mut self.head, index) }?;
    unsafe { unlink(&self.allocator, link) }
  }

  /// Inserts `value` into a list that is already sorted under `compare`,
  /// keeping it sorted.
  ///
  /// `compare(a, b)` follows the [`Ord::cmp`] convention. A value that
  /// compares equal to existing values is placed after all of them.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn insert_sorted<F>(&mut self, value: T, compare: F) -> &mut T
  where
    F: FnMut(&T, &T) -> Ordering
  {
    unwrap(insert_sorted(self, value, compare))
  }

  /// Inserts `value` into a list that is already sorted under `compare`,
  /// keeping it sorted. See [`insert_sorted`](Self::insert_sorted).
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. The list is left
  /// unchanged.

  pub fn try_insert_sorted<F>(&mut self, value: T, compare: F) -> Result<&mut T, AllocError>
  where
    F: FnMut(&T, &T) -> Ordering
  {
    insert_sorted(self, value, compare)
  }

  /// Calls `apply` on each value from head to tail until it returns `false`.
  ///
  /// Returns `true` if every value was visited.

  pub fn for_each<F>(&self, apply: F) -> bool
  where
    F: FnMut(&T) -> bool
  {
    let mut apply = apply;
    let mut link = self.head;

    while let Some(p) = link {
      let node = unsafe { ptr::as_ref(p) };
      if ! apply(&node.value) { return false; }
      link = node.next;
    }

    true
  }

  /// Calls `apply` on each value from head to tail until it returns `false`.
  /// The values may be modified but the chain itself is not.
  ///
  /// Returns `true` if every value was visited.

  pub fn for_each_mut<F>(&mut self, apply: F) -> bool
  where
    F: FnMut(&mut T) -> bool
  {
    let mut apply = apply;
    let mut link = self.head;

    while let Some(p) = link {
      let node = unsafe { ptr::as_mut_ref(p) };
      if ! apply(&mut node.value) { return false; }
      link = node.next;
    }

    true
  }
}

impl<T> Default for List<T, Global> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, A: Allocator> Drop for List<T, A> {
  fn drop(&mut self) {
    self.destroy()
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut d = f.debug_list();
    let _ = self.for_each(|x| { let _ = d.entry(x); true });
    d.finish()
  }
}
