use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// The allocator refused a buffer of `requested` slots, or the size overflowed.
    #[error("Could not allocate a buffer for {requested} elements.")]
    AllocationFailure { requested: usize },

    /// Doubling a capacity of zero stays zero.
    #[error("Stack has zero capacity and cannot grow.")]
    CannotGrow,

    #[error("Stack is empty.")]
    EmptyStack,

    #[error("No stack has been created yet.")]
    Uninitialized,
}
