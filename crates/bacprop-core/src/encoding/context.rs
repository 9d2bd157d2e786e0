use core::fmt;
use thiserror::Error;

/// Deepest nesting of named contexts a reader or writer accepts.
///
/// Nested constructed data recurses through the context stack, so this also
/// bounds recursion on hostile input.
pub const MAX_CONTEXT_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("context nesting deeper than {max}")]
    TooDeep { max: usize },
    #[error("closing context '{found}' while '{expected}' is open")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("closing context '{expected}' with no context open")]
    Empty { expected: &'static str },
}

/// Fixed-capacity stack of context names, used for trace output and to check
/// that every pulled context is closed in order.
#[derive(Clone, Copy)]
pub struct ContextStack {
    names: [&'static str; MAX_CONTEXT_DEPTH],
    depth: usize,
}

impl ContextStack {
    pub const fn new() -> Self {
        Self {
            names: [""; MAX_CONTEXT_DEPTH],
            depth: 0,
        }
    }

    pub const fn depth(&self) -> usize {
        self.depth
    }

    pub fn current(&self) -> Option<&'static str> {
        self.path().last().copied()
    }

    /// Open contexts, outermost first.
    pub fn path(&self) -> &[&'static str] {
        &self.names[..self.depth]
    }

    pub fn push(&mut self, name: &'static str) -> Result<(), ContextError> {
        if self.depth == MAX_CONTEXT_DEPTH {
            return Err(ContextError::TooDeep {
                max: MAX_CONTEXT_DEPTH,
            });
        }
        self.names[self.depth] = name;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self, name: &'static str) -> Result<(), ContextError> {
        match self.current() {
            None => Err(ContextError::Empty { expected: name }),
            Some(open) if open != name => Err(ContextError::Mismatch {
                expected: open,
                found: name,
            }),
            Some(_) => {
                self.depth -= 1;
                Ok(())
            }
        }
    }
}

impl Default for ContextStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.path()).finish()
    }
}
