//! Parsing of the user-entered room area.
//!
//! Plain decimal numbers are accepted directly; anything else is evaluated
//! as an arithmetic expression (e.g. `3.64 * 2.73` for a measured room).
//! Integer literals are promoted to floats first, so `7/2` yields 3.5.

use evalexpr::Value;

/// Errors while reading the area field
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AreaInputError {
    #[error("area is empty")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("area is not a finite number")]
    NotFinite,
    #[error("area must be greater than zero (got {0})")]
    NotPositive(f64),
}

/// Parse the area field into a finite, strictly positive number.
pub fn parse_area_input(input: &str) -> Result<f64, AreaInputError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(AreaInputError::Empty);
    }

    let value = match text.parse::<f64>() {
        Ok(v) => v,
        Err(_) => evaluate_expression(text)?,
    };

    if !value.is_finite() {
        return Err(AreaInputError::NotFinite);
    }
    if value <= 0.0 {
        return Err(AreaInputError::NotPositive(value));
    }
    Ok(value)
}

/// Append `.0` to bare integer literals so evalexpr stays in float arithmetic.
/// Digits that are part of an identifier (`x2`) are left alone.
fn promote_integer_literals(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let in_identifier = i > 0 && (chars[i - 1].is_alphanumeric() || chars[i - 1] == '_');
        if !c.is_ascii_digit() || in_identifier {
            out.push(c);
            i += 1;
            continue;
        }

        let start = i;
        let mut is_float = false;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i < chars.len() && chars[i] == '.' {
            is_float = true;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
        if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
            let mut j = i + 1;
            if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                j += 1;
            }
            if j < chars.len() && chars[j].is_ascii_digit() {
                is_float = true;
                i = j;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }

        out.extend(&chars[start..i]);
        if !is_float {
            out.push_str(".0");
        }
    }
    out
}

fn evaluate_expression(text: &str) -> Result<f64, AreaInputError> {
    let value = evalexpr::eval(&promote_integer_literals(text))
        .map_err(|_| AreaInputError::NotANumber(text.to_string()))?;
    match value {
        Value::Float(f) => Ok(f),
        Value::Int(i) => Ok(i as f64),
        _ => Err(AreaInputError::NotANumber(text.to_string())),
    }
}
