mod error;
pub use error::StackError;

mod render;
pub use render::Render;

#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

use std::fmt::Debug;

/// A LIFO container over a contiguous buffer that doubles when full.
///
/// The buffer is absent until [`Stack::init`] is called and again after
/// [`Stack::teardown`]. `capacity` is tracked separately from the buffer so
/// that growth follows the doubling policy exactly, whatever the allocator
/// hands back.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    buffer: Option<Vec<T>>,
    capacity: usize,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self {
            buffer: None,
            capacity: 0,
        }
    }
}

impl<T: Copy + Debug> Stack<T> {
    /// An uninitialized stack. Every operation except `init` and `teardown`
    /// fails with [`StackError::Uninitialized`] until it is initialized.
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_capacity(capacity: usize) -> Result<Self, StackError> {
        let mut stack = Self::new();
        stack.init(capacity)?;

        Ok(stack)
    }

    /// Allocate a fresh buffer of `capacity` slots, releasing any previous one.
    ///
    /// The previous buffer is only released once the new one is in hand, so a
    /// failed allocation leaves the stack as it was.
    pub fn init(&mut self, capacity: usize) -> Result<(), StackError> {
        trace!("action: init, capacity {:?}", capacity);

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| StackError::AllocationFailure {
                requested: capacity,
            })?;

        self.teardown();
        self.buffer = Some(buffer);
        self.capacity = capacity;

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, Vec::len)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&mut self, v: T) -> Result<(), StackError> {
        trace!("action: push, value {:?}", v);

        let full = self.is_full();
        let capacity = self.capacity;
        let buffer = self.buffer.as_mut().ok_or(StackError::Uninitialized)?;

        if full {
            self.capacity = Self::grow(buffer, capacity).map_err(|e| {
                warn!("push of {:?} failed: {}", v, e);
                e
            })?;
        }

        buffer.push(v);

        Ok(())
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        trace!("action: pop");

        let res = match self.buffer.as_mut() {
            Some(buffer) => buffer.pop().ok_or(StackError::EmptyStack),
            None => Err(StackError::Uninitialized),
        };

        if let Err(e) = &res {
            warn!("pop failed: {}", e);
        }

        res
    }

    pub fn peek(&self) -> Result<T, StackError> {
        trace!("action: peek");

        let res = match self.buffer.as_ref() {
            Some(buffer) => buffer.last().copied().ok_or(StackError::EmptyStack),
            None => Err(StackError::Uninitialized),
        };

        if let Err(e) = &res {
            warn!("peek failed: {}", e);
        }

        res
    }

    pub fn render(&self) -> Result<Render<T>, StackError> {
        trace!("action: render");

        if !self.is_initialized() {
            return Err(StackError::Uninitialized);
        }

        if self.is_empty() {
            Ok(Render::Empty)
        } else {
            Ok(Render::Elements(self.iter().copied().collect()))
        }
    }

    /// Occupied elements from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buffer.as_deref().unwrap_or(&[]).iter().rev()
    }

    /// Release the buffer. Calling this on an uninitialized stack does nothing.
    pub fn teardown(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            debug!(
                "releasing buffer: length {}, capacity {}",
                buffer.len(),
                self.capacity
            );
        }

        self.capacity = 0;
    }

    // Either the buffer ends up with room for twice `capacity` elements and
    // the new capacity is returned, or the buffer is left untouched.
    fn grow(buffer: &mut Vec<T>, capacity: usize) -> Result<usize, StackError> {
        let new_capacity = capacity
            .checked_mul(2)
            .ok_or(StackError::AllocationFailure {
                requested: usize::MAX,
            })?;

        if new_capacity == 0 {
            return Err(StackError::CannotGrow);
        }

        buffer
            .try_reserve_exact(new_capacity - buffer.len())
            .map_err(|_| StackError::AllocationFailure {
                requested: new_capacity,
            })?;

        debug!("grew buffer: capacity {} -> {}", capacity, new_capacity);

        Ok(new_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(stack: &Stack<i32>) -> Vec<i32> {
        stack.render().unwrap().elements().to_vec()
    }

    #[test]
    fn empty_after_init() {
        let stack: Stack<i32> = Stack::with_capacity(3).unwrap();

        assert!(stack.is_initialized());
        assert!(stack.is_empty());
        assert!(!stack.is_full());
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.capacity(), 3);
        assert_eq!(stack.render(), Ok(Render::Empty));
    }

    #[test]
    fn grows_by_doubling() {
        let mut stack = Stack::with_capacity(2).unwrap();

        stack.push(10).unwrap();
        stack.push(20).unwrap();
        assert!(stack.is_full());

        stack.push(30).unwrap();
        assert_eq!(stack.capacity(), 4);
        assert_eq!(stack.len(), 3);
        assert!(!stack.is_full());

        assert_eq!(elements(&stack), vec![30, 20, 10]);
        assert_eq!(stack.pop(), Ok(30));
        assert_eq!(elements(&stack), vec![20, 10]);
        assert_eq!(stack.peek(), Ok(20));
        assert_eq!(stack.capacity(), 4);
    }

    #[test]
    fn growth_past_initial_capacity_keeps_order() {
        for k in 1..=9usize {
            let mut stack = Stack::with_capacity(k).unwrap();

            for v in 0..=k as i32 {
                stack.push(v).unwrap();
            }

            assert!(stack.capacity() >= k + 1);
            let expected: Vec<i32> = (0..=k as i32).rev().collect();
            assert_eq!(elements(&stack), expected);
        }
    }

    #[test]
    fn push_then_pop_restores_length() {
        let mut stack = Stack::with_capacity(4).unwrap();
        stack.push(1).unwrap();
        stack.push(2).unwrap();

        let before = stack.len();
        stack.push(-7).unwrap();
        assert_eq!(stack.pop(), Ok(-7));
        assert_eq!(stack.len(), before);
    }

    #[test]
    fn pop_last_element_leaves_empty() {
        let mut stack = Stack::with_capacity(1).unwrap();
        stack.push(42).unwrap();

        assert_eq!(stack.pop(), Ok(42));
        assert!(stack.is_empty());
        assert_eq!(stack.render(), Ok(Render::Empty));
    }

    #[test]
    fn pop_on_empty_fails() {
        let mut stack: Stack<i32> = Stack::with_capacity(1).unwrap();

        assert_eq!(stack.pop(), Err(StackError::EmptyStack));
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.peek(), Err(StackError::EmptyStack));
    }

    #[test]
    fn zero_capacity_cannot_grow() {
        let mut stack = Stack::with_capacity(0).unwrap();

        assert!(stack.is_empty());
        assert!(stack.is_full());
        assert_eq!(stack.push(5), Err(StackError::CannotGrow));
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.capacity(), 0);
    }

    #[test]
    fn uninitialized_operations_fail() {
        let mut stack: Stack<i32> = Stack::new();

        assert!(!stack.is_initialized());
        assert!(stack.is_empty());
        assert_eq!(stack.push(1), Err(StackError::Uninitialized));
        assert_eq!(stack.pop(), Err(StackError::Uninitialized));
        assert_eq!(stack.peek(), Err(StackError::Uninitialized));
        assert_eq!(stack.render(), Err(StackError::Uninitialized));
        assert_eq!(stack.iter().count(), 0);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut stack = Stack::with_capacity(2).unwrap();
        stack.push(1).unwrap();

        stack.teardown();
        assert!(!stack.is_initialized());
        assert_eq!(stack.len(), 0);
        assert_eq!(stack.capacity(), 0);

        stack.teardown();
        assert!(!stack.is_initialized());
        assert_eq!(stack.capacity(), 0);
        assert_eq!(stack.pop(), Err(StackError::Uninitialized));
    }

    #[test]
    fn reinit_replaces_previous_buffer() {
        let mut stack = Stack::with_capacity(2).unwrap();
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        stack.push(3).unwrap();

        stack.init(5).unwrap();
        assert_eq!(stack.capacity(), 5);
        assert!(stack.is_empty());
    }

    #[test]
    fn failed_init_keeps_previous_buffer() {
        let mut stack = Stack::with_capacity(2).unwrap();
        stack.push(9).unwrap();

        let err = stack.init(usize::MAX).unwrap_err();
        assert_eq!(
            err,
            StackError::AllocationFailure {
                requested: usize::MAX
            }
        );
        assert_eq!(stack.capacity(), 2);
        assert_eq!(stack.peek(), Ok(9));
    }

    #[test]
    fn overflowing_growth_leaves_buffer_untouched() {
        let mut v: Vec<u64> = vec![4, 5, 6];

        let res = Stack::<u64>::grow(&mut v, usize::MAX / 2 + 1);

        assert_eq!(
            res,
            Err(StackError::AllocationFailure {
                requested: usize::MAX
            })
        );
        assert_eq!(v.len(), 3);
        assert_eq!(v, vec![4, 5, 6]);
    }

    #[test]
    fn unallocatable_growth_leaves_buffer_untouched() {
        let mut v: Vec<u64> = vec![4, 5, 6];
        let before = v.capacity();

        // doubles to a byte size past isize::MAX
        let res = Stack::<u64>::grow(&mut v, usize::MAX / 4);

        assert!(matches!(res, Err(StackError::AllocationFailure { .. })));
        assert_eq!(v.len(), 3);
        assert_eq!(v, vec![4, 5, 6]);
        assert_eq!(v.capacity(), before);
    }

    #[test]
    fn iter_runs_top_to_bottom() {
        let mut stack = Stack::with_capacity(3).unwrap();
        for v in [1u8, 2, 3] {
            stack.push(v).unwrap();
        }

        let seen: Vec<u8> = stack.iter().copied().collect();
        assert_eq!(seen, vec![3, 2, 1]);
    }
}
