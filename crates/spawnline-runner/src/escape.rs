//! POSIX shell escaping for single command-line tokens
//!
//! Every character outside a small safe set gets a backslash in front of it.
//! The token is never wrapped in quotes, so its shape does not depend on its
//! content. The two exceptions are the empty string (`''`) and newline
//! (`'\n'`), which a lone backslash cannot represent.

use crate::error::RunnerError;
use crate::params::Scalar;

/// Punctuation that passes through unescaped, besides ASCII alphanumerics.
const SAFE_PUNCTUATION: &[char] = &['_', '-', '.', '/', ',', ':', '@'];

/// True if `ch` needs no escaping in an unquoted POSIX shell word.
#[must_use]
pub fn is_safe_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || SAFE_PUNCTUATION.contains(&ch)
}

/// Escape `token` so a POSIX shell reads it back as exactly one word.
///
/// ```rust
/// use spawnline_runner::escape::escape;
///
/// assert_eq!(escape("some pkg"), "some\\ pkg");
/// assert_eq!(escape("/usr/bin/ruby"), "/usr/bin/ruby");
/// ```
#[must_use]
pub fn escape(token: &str) -> String {
    if token.is_empty() {
        return "''".to_string();
    }

    let mut escaped = String::with_capacity(token.len() * 2);
    for ch in token.chars() {
        match ch {
            '\n' => escaped.push_str("'\n'"),
            c if is_safe_char(c) => escaped.push(c),
            c => {
                escaped.push('\\');
                escaped.push(c);
            }
        }
    }
    escaped
}

/// Render and escape one parameter value.
///
/// Fails for values that cannot reach `exec` intact: paths that are not
/// valid UTF-8 and anything containing a NUL byte.
pub fn escape_scalar(value: &Scalar) -> Result<String, RunnerError> {
    let rendered = value.render()?;
    if rendered.contains('\0') {
        return Err(RunnerError::invalid(format!(
            "value {rendered:?} contains a NUL byte"
        )));
    }
    Ok(escape(&rendered))
}
