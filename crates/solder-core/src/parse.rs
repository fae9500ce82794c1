//! Statement parser: source text to an unevaluated [`Circuit`].
//!
//! One statement per line, `<lhs> -> <wire>`. The left-hand side is
//! classified by token count: a bare operand, `NOT <operand>`, or
//! `<operand> <gate> <operand>`, where an operand is a literal or a
//! wire reference. Parsing populates the circuit and evaluates nothing.

use tracing::warn;

use crate::circuit::{truncate, Circuit, Expr};
use crate::error::{Error, Warning};
use crate::token::{is_identifier, Token};

/// Parse a full statement set into a circuit.
///
/// Blank lines are skipped. Returns the populated circuit together
/// with any non-fatal warnings raised along the way; a malformed
/// statement or identifier aborts the whole load with the offending
/// 1-based line number.
pub fn parse(source: &str) -> Result<(Circuit, Vec<Warning>), Error> {
    let mut circuit = Circuit::new();
    let mut warnings = Vec::new();

    for (index, text) in source.lines().enumerate() {
        let line = index as u32 + 1;
        if text.trim().is_empty() {
            continue;
        }
        let (target, def) = parse_statement(text, line, &mut warnings)?;
        circuit.assign(target, def, line);
    }

    Ok((circuit, warnings))
}

/// Parse one `<lhs> -> <wire>` statement.
fn parse_statement<'a>(
    text: &'a str,
    line: u32,
    warnings: &mut Vec<Warning>,
) -> Result<(&'a str, Expr), Error> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let count = words.len();
    if count < 3 || words[count - 2] != "->" {
        return Err(Error::MalformedStatement { line });
    }

    let target = words[count - 1];
    if !is_identifier(target) {
        return Err(Error::InvalidIdentifier {
            name: target.to_string(),
            line,
        });
    }

    let lhs = words[..count - 2]
        .iter()
        .map(|word| Token::from_word(word, line))
        .collect::<Result<Vec<_>, _>>()?;

    let def = match lhs.as_slice() {
        [operand] => operand_expr(operand, line, warnings)?,
        [Token::Unary(op), operand] => Expr::Unary {
            op: *op,
            operand: Box::new(operand_expr(operand, line, warnings)?),
        },
        [lhs, Token::Binary(op), rhs] => Expr::Binary {
            op: *op,
            lhs: Box::new(operand_expr(lhs, line, warnings)?),
            rhs: Box::new(operand_expr(rhs, line, warnings)?),
        },
        _ => return Err(Error::MalformedStatement { line }),
    };

    Ok((target, def))
}

/// Lower an operand token, narrowing wide literals with a warning.
fn operand_expr(token: &Token, line: u32, warnings: &mut Vec<Warning>) -> Result<Expr, Error> {
    match token {
        Token::Literal(value) => {
            if *value >> 16 != 0 {
                warn!(line, value = *value, "literal wider than 16 bits, truncating");
                warnings.push(Warning::LiteralTruncated {
                    value: *value,
                    line,
                });
            }
            Ok(Expr::Literal(truncate(*value)))
        }
        Token::Ident(name) => Ok(Expr::Wire(name.clone())),
        _ => Err(Error::MalformedStatement { line }),
    }
}
