//! Argument interpolation for log output.
//!
//! **Never execute the output of this module.** It splices values into SQL
//! text with naive quoting and exists only to make log lines readable.

use std::iter::Peekable;
use std::str::Chars;

use super::value::SqlValue;
use crate::dialect::Dialect;

/// Replaces `?` and `$N` placeholders in `sql` with inline literals.
///
/// `?` markers consume `params` sequentially, `$N` refers to `params[N - 1]`.
/// Text inside single-quoted literals is copied unchanged. Placeholders
/// without a matching value are left as they are.
#[must_use]
pub fn interpolate(sql: &str, params: &[SqlValue], dialect: &dyn Dialect) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut sequential = 0;
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '?' => {
                match params.get(sequential) {
                    Some(value) => out.push_str(&value.to_sql_inline(dialect)),
                    None => out.push('?'),
                }
                sequential += 1;
            }
            '$' if chars.peek().is_some_and(char::is_ascii_digit) => {
                let digits = take_digits(&mut chars);
                let value = digits
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| params.get(i));
                match value {
                    Some(value) => out.push_str(&value.to_sql_inline(dialect)),
                    None => {
                        out.push('$');
                        out.push_str(&digits);
                    }
                }
            }
            '\'' => {
                out.push('\'');
                for inner in chars.by_ref() {
                    out.push(inner);
                    if inner == '\'' {
                        break;
                    }
                }
            }
            _ => out.push(ch),
        }
    }

    out
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits.push(c);
        chars.next();
    }
    digits
}
