//! Diagnostics for circuit loading and resolution.

use thiserror::Error;

/// Errors that abort the current load or resolve call.
///
/// A failed call never corrupts the circuit: entries memoized before the
/// failure stay valid and remain usable by later calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A wire name containing anything but lowercase ASCII letters.
    #[error("line {line}: invalid wire identifier '{name}'")]
    InvalidIdentifier {
        /// The offending word.
        name: String,
        /// 1-based source line.
        line: u32,
    },

    /// A statement that fits no form of the grammar.
    #[error("line {line}: malformed statement")]
    MalformedStatement {
        /// 1-based source line.
        line: u32,
    },

    /// A reference to a wire no statement ever assigned.
    #[error("wire '{name}' is undefined{}", .referenced_by.as_ref().map(|(wire, line)| format!(" (referenced from '{wire}', line {line})")).unwrap_or_default())]
    UndefinedWire {
        /// The missing wire.
        name: String,
        /// The wire whose expression held the dangling reference, and
        /// the line that defined it, when the reference was reached
        /// through another wire rather than requested directly.
        referenced_by: Option<(String, u32)>,
    },

    /// A wire that depends on itself.
    #[error("circuit contains a circular dependency between wires {}", .cycle.join(", "))]
    CircularDependency {
        /// The ordered path, from the first occurrence of the repeated
        /// wire through its recurrence.
        cycle: Vec<String>,
    },
}

/// Non-fatal conditions surfaced alongside a successful parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A literal wider than 16 bits, narrowed at the point of storage.
    #[error("line {line}: literal {value} is wider than 16 bits, truncated to {}", .value & 0xffff)]
    LiteralTruncated {
        /// The literal as written.
        value: u64,
        /// 1-based source line.
        line: u32,
    },
}
