use std::fmt::Display;

use itertools::Itertools;

use crate::automaton::Letter;

/// What a PDA transition does to the stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StackOp<G: Letter> {
    Push(G),
    /// Removes the top symbol. Popping an empty stack leaves it empty.
    Pop,
    Keep,
}

impl<G: Letter> StackOp<G> {
    pub fn pushed_symbol(&self) -> Option<&G> {
        match self {
            StackOp::Push(g) => Some(g),
            _ => None,
        }
    }
}

impl<G: Letter> Display for StackOp<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackOp::Push(g) => write!(f, "push {:?}", g),
            StackOp::Pop => write!(f, "pop"),
            StackOp::Keep => write!(f, "keep"),
        }
    }
}

/// The stack of a running PDA. Only the top is ever inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<G: Letter> {
    symbols: Vec<G>,
}

impl<G: Letter> Stack<G> {
    pub fn new() -> Self {
        Stack { symbols: vec![] }
    }

    pub fn top(&self) -> Option<&G> {
        self.symbols.last()
    }

    pub fn push(&mut self, symbol: G) {
        self.symbols.push(symbol);
    }

    pub fn pop(&mut self) -> Option<G> {
        self.symbols.pop()
    }

    pub fn apply(&mut self, op: &StackOp<G>) {
        match op {
            StackOp::Push(g) => self.push(g.clone()),
            StackOp::Pop => {
                self.pop();
            }
            StackOp::Keep => {}
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<G: Letter> Default for Stack<G> {
    fn default() -> Self {
        Stack::new()
    }
}

impl<G: Letter> Display for Stack<G> {
    /// Bottom first, so the top is the rightmost symbol.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.symbols.iter().map(|g| format!("{:?}", g)).join(" ")
        )
    }
}
