//! solder: a lazy resolver for a tiny wire-circuit language.
//!
//! # Overview
//!
//! A circuit is described by assignment statements, one per line. Each
//! statement defines a named 16-bit wire from a literal, a reference to
//! another wire, or a bitwise gate:
//!
//! ```text
//! 123 -> x
//! 456 -> y
//! x AND y -> d
//! p LSHIFT 2 -> q
//! NOT e -> f
//! ```
//!
//! [`parse`] builds the circuit without evaluating anything. [`resolve`]
//! computes one wire on demand, walking only the wires it depends on and
//! memoizing every signal along the way; a wire reached twice on the
//! same resolution path aborts with the full ordered cycle.
//! [`Circuit::set_signal`] overrides a wire with a literal, discarding
//! memoized signals first so the next resolution is computed against
//! the override.
//!
//! # Example
//!
//! ```
//! use solder_core::{parse, resolve};
//!
//! let source = "123 -> x\nNOT x -> h\nx OR 456 -> e";
//! let (mut circuit, warnings) = parse(source).unwrap();
//! assert!(warnings.is_empty());
//!
//! assert_eq!(resolve(&mut circuit, "h").unwrap(), 65412);
//!
//! // Lazy: only `h` and `x` were computed.
//! assert_eq!(circuit.peek("e"), None);
//!
//! // Override and re-resolve against the new signal.
//! circuit.set_signal("x", 1).unwrap();
//! assert_eq!(resolve(&mut circuit, "h").unwrap(), 65534);
//! ```
//!
//! All signals are unsigned 16-bit: wider literals are narrowed with a
//! [`Warning::LiteralTruncated`], gate results are masked by type, and
//! shift counts of 16 or more clear the result.

pub mod circuit;
pub mod error;
pub mod eval;
pub mod parse;
pub mod token;

pub use circuit::{Circuit, Expr, Signal, Wire};
pub use error::{Error, Warning};
pub use eval::{resolve, resolve_all};
pub use parse::parse;
pub use token::{BinaryOp, Token, UnaryOp};
