//! Wire entries and the circuit table.
//!
//! The circuit owns every wire entry. Each entry keeps the definition
//! as parsed (restored on invalidation) next to its current evaluation
//! state, which is exactly one of: the pending expression, or the
//! memoized 16-bit signal.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::Error;
use crate::token::{BinaryOp, UnaryOp};

/// Narrow a full-width literal to the 16-bit signal range.
#[inline]
pub(crate) fn truncate(value: u64) -> u16 {
    (value & 0xffff) as u16
}

/// A wire's defining expression.
///
/// The grammar only produces flat operands (literals and references),
/// but the operand positions accept arbitrary nesting and the evaluator
/// handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Constant 16-bit signal.
    Literal(u16),
    /// The signal on another wire.
    Wire(String),
    /// Unary gate over an operand.
    Unary {
        /// The gate.
        op: UnaryOp,
        /// Its operand.
        operand: Box<Expr>,
    },
    /// Binary gate over two operands.
    Binary {
        /// The gate.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(value) => write!(f, "{value}"),
            Expr::Wire(name) => write!(f, "{name}"),
            Expr::Unary { op, operand } => write!(f, "{} {operand}", op.keyword()),
            Expr::Binary { op, lhs, rhs } => write!(f, "{lhs} {} {rhs}", op.keyword()),
        }
    }
}

/// Evaluation state of a wire entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Not yet resolved; holds the expression to evaluate.
    Pending(Expr),
    /// Memoized 16-bit signal.
    Resolved(u16),
}

/// One named node of the circuit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    /// The definition as parsed, or as installed by an override.
    /// Invalidation restores `state` from this.
    pub(crate) def: Expr,
    /// Current evaluation state.
    pub(crate) state: Signal,
    /// 1-based source line of the defining statement.
    pub(crate) line: u32,
}

impl Wire {
    pub(crate) fn new(def: Expr, line: u32) -> Self {
        Self {
            state: Signal::Pending(def.clone()),
            def,
            line,
        }
    }

    /// The definition as parsed, or as installed by an override.
    pub fn definition(&self) -> &Expr {
        &self.def
    }

    /// Current evaluation state.
    pub fn state(&self) -> &Signal {
        &self.state
    }

    /// The memoized signal, if this wire has been resolved.
    pub fn signal(&self) -> Option<u16> {
        match self.state {
            Signal::Resolved(value) => Some(value),
            Signal::Pending(_) => None,
        }
    }

    /// 1-based source line of the defining statement.
    pub fn line(&self) -> u32 {
        self.line
    }
}

/// The circuit: an owning table of wire entries.
///
/// Entries are created exactly once, by the parser. Resolution memoizes
/// signals in place; [`Circuit::set_signal`] overrides a definition and
/// discards memoized signals so the next resolution is consistent.
#[derive(Debug, Clone)]
pub struct Circuit {
    wires: HashMap<String, Wire>,
    /// Set once any resolution has stored a memo; drives the override
    /// invalidation protocol.
    evaluated: bool,
}

impl Circuit {
    pub(crate) fn new() -> Self {
        Self {
            wires: HashMap::new(),
            evaluated: false,
        }
    }

    /// Install `def` as the entry for `name`, replacing any earlier
    /// statement for the same target.
    pub(crate) fn assign(&mut self, name: &str, def: Expr, line: u32) {
        if self.wires.insert(name.to_string(), Wire::new(def, line)).is_some() {
            debug!(wire = name, line, "redefinition replaces earlier statement");
        }
    }

    pub(crate) fn wire_mut(&mut self, name: &str) -> Option<&mut Wire> {
        self.wires.get_mut(name)
    }

    pub(crate) fn mark_evaluated(&mut self) {
        self.evaluated = true;
    }

    /// Number of wires.
    pub fn len(&self) -> usize {
        self.wires.len()
    }

    /// Whether the circuit has no wires at all.
    pub fn is_empty(&self) -> bool {
        self.wires.is_empty()
    }

    /// Whether a statement assigned `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.wires.contains_key(name)
    }

    /// Iterate wire names, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.wires.keys().map(String::as_str)
    }

    /// Look up a wire entry.
    pub fn wire(&self, name: &str) -> Option<&Wire> {
        self.wires.get(name)
    }

    /// The memoized signal on `name`, never forcing evaluation.
    pub fn peek(&self, name: &str) -> Option<u16> {
        self.wire(name).and_then(Wire::signal)
    }

    /// Snapshot every wire's state without forcing any evaluation.
    ///
    /// Unresolved wires map to `None`. Useful for inspection only;
    /// resolve the wire to get a definitive answer.
    pub fn peek_all(&self) -> HashMap<&str, Option<u16>> {
        self.wires
            .iter()
            .map(|(name, wire)| (name.as_str(), wire.signal()))
            .collect()
    }

    /// Discard every memoized signal, restoring each entry to its
    /// stored definition.
    fn reset(&mut self) {
        for wire in self.wires.values_mut() {
            wire.state = Signal::Pending(wire.def.clone());
        }
        self.evaluated = false;
    }

    /// Override `name` with a literal signal, narrowed to 16 bits.
    ///
    /// Wires resolved earlier may have observed the old definition, so
    /// if any resolution has happened every memoized signal in the
    /// circuit is discarded before the override is installed; the next
    /// resolution recomputes a consistent set of values. An override
    /// issued before any evaluation replaces the entry in place.
    ///
    /// Fails with [`Error::UndefinedWire`] when no statement ever
    /// assigned `name`: overrides change existing wires, they do not
    /// create new ones.
    pub fn set_signal(&mut self, name: &str, value: u64) -> Result<(), Error> {
        if !self.contains(name) {
            return Err(Error::UndefinedWire {
                name: name.to_string(),
                referenced_by: None,
            });
        }
        if self.evaluated {
            debug!(wire = name, "override after evaluation, discarding memoized signals");
            self.reset();
        }
        let literal = Expr::Literal(truncate(value));
        if let Some(wire) = self.wires.get_mut(name) {
            wire.state = Signal::Pending(literal.clone());
            wire.def = literal;
        }
        Ok(())
    }
}

impl fmt::Display for Circuit {
    /// Renders the signal table, shortest names first: resolved wires
    /// as their value, pending wires as their definition.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wires.is_empty() {
            return write!(f, "circuit with no wires");
        }
        write!(f, "circuit with wire signals:")?;
        let mut names: Vec<&String> = self.wires.keys().collect();
        names.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        for name in names {
            match &self.wires[name].state {
                Signal::Resolved(value) => write!(f, "\n  {name}: {value}")?,
                Signal::Pending(expr) => write!(f, "\n  {name}: {expr}")?,
            }
        }
        Ok(())
    }
}
