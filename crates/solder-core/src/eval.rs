//! Lazy, memoizing resolution of wire signals.
//!
//! Relative to one top-level [`resolve`] call a wire is in one of three
//! states: unvisited (its entry is pending or already memoized), active
//! (its name is on the ordered path of wires currently being resolved),
//! or resolved. Reaching a wire that is already active closes a cycle;
//! the call aborts with the full ordered path. Every successfully
//! computed signal is memoized in place, so later resolutions of the
//! same wire are lookups.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::circuit::{Circuit, Expr, Signal};
use crate::error::Error;

/// Resolve the signal on `name`, computing and memoizing every wire it
/// depends on and nothing else.
pub fn resolve(circuit: &mut Circuit, name: &str) -> Result<u16, Error> {
    let mut active = Vec::new();
    resolve_wire(circuit, &mut active, name)
}

/// Resolve every wire in the circuit.
///
/// Already-memoized wires cost a lookup. The result maps each wire
/// name to its signal.
pub fn resolve_all(circuit: &mut Circuit) -> Result<HashMap<String, u16>, Error> {
    let names: Vec<String> = circuit.names().map(str::to_string).collect();
    let mut signals = HashMap::with_capacity(names.len());
    for name in names {
        let value = resolve(circuit, &name)?;
        signals.insert(name, value);
    }
    Ok(signals)
}

/// Resolve one wire against the current active path.
fn resolve_wire(circuit: &mut Circuit, active: &mut Vec<String>, name: &str) -> Result<u16, Error> {
    let Some(wire) = circuit.wire(name) else {
        // Dangling references surface here, lazily, with the wire that
        // held the reference when one is on the path.
        let referenced_by = active
            .last()
            .and_then(|from| circuit.wire(from).map(|wire| (from.clone(), wire.line())));
        return Err(Error::UndefinedWire {
            name: name.to_string(),
            referenced_by,
        });
    };

    let def = match wire.state() {
        Signal::Resolved(value) => {
            trace!(wire = name, value = *value, "memoized");
            return Ok(*value);
        }
        Signal::Pending(def) => def.clone(),
    };

    if let Some(start) = active.iter().position(|visited| visited == name) {
        let mut cycle = active[start..].to_vec();
        cycle.push(name.to_string());
        return Err(Error::CircularDependency { cycle });
    }

    active.push(name.to_string());
    let value = eval_expr(circuit, active, &def)?;
    active.pop();

    if let Some(wire) = circuit.wire_mut(name) {
        wire.state = Signal::Resolved(value);
    }
    circuit.mark_evaluated();
    debug!(wire = name, value, "resolved");
    Ok(value)
}

/// Evaluate an expression, resolving referenced wires as needed.
///
/// The grammar only produces flat operands, but nested operands
/// evaluate the same way. Gate arithmetic is `u16`-typed throughout,
/// so every result is already in the 16-bit signal range.
fn eval_expr(circuit: &mut Circuit, active: &mut Vec<String>, expr: &Expr) -> Result<u16, Error> {
    match expr {
        Expr::Literal(value) => Ok(*value),
        Expr::Wire(name) => resolve_wire(circuit, active, name),
        Expr::Unary { op, operand } => Ok(op.apply(eval_expr(circuit, active, operand)?)),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval_expr(circuit, active, lhs)?;
            let rhs = eval_expr(circuit, active, rhs)?;
            Ok(op.apply(lhs, rhs))
        }
    }
}
