use std::fmt;

/// Snapshot of a stack's occupied slots, top first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Render<T> {
    Empty,
    Elements(Vec<T>),
}

#[cfg(test)]
impl<T> Render<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Render::Empty)
    }

    pub fn elements(&self) -> &[T] {
        match self {
            Render::Empty => &[],
            Render::Elements(elems) => elems,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Render<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Render::Empty => write!(f, "Stack is empty."),
            Render::Elements(elems) => {
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", e)?;
                }

                Ok(())
            }
        }
    }
}
