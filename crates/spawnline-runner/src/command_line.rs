//! Command-line assembly from a command name and a parameter set

use std::path::Path;

use crate::error::RunnerError;
use crate::escape::{escape, escape_scalar};
use crate::params::{ParamKey, ParamValue, Params};

/// Rendered flag token.
struct Flag {
    token: String,
    /// Ends in `=`: values follow with no separating space.
    glued: bool,
}

impl Flag {
    fn render(key: &ParamKey) -> Result<Option<Self>, RunnerError> {
        let ParamKey::Flag(scalar) = key else {
            return Ok(None);
        };

        let raw = scalar.render()?;
        if raw.contains('\0') {
            return Err(RunnerError::invalid(format!(
                "flag {raw:?} contains a NUL byte"
            )));
        }

        match raw.strip_suffix('=') {
            Some("") => Err(RunnerError::invalid("flag `=` has no name")),
            Some(name) => Ok(Some(Self {
                token: format!("{}=", escape(name)),
                glued: true,
            })),
            None if raw.is_empty() => Err(RunnerError::invalid("flag is empty")),
            None => Ok(Some(Self {
                token: escape(&raw),
                glued: false,
            })),
        }
    }

    fn push_with_value(&self, tokens: &mut Vec<String>, value: String) {
        if self.glued {
            tokens.push(format!("{}{value}", self.token));
        } else {
            tokens.push(self.token.clone());
            tokens.push(value);
        }
    }
}

/// Append the tokens for one `(key, value)` pair.
fn push_pair(
    tokens: &mut Vec<String>,
    key: &ParamKey,
    value: &ParamValue,
) -> Result<(), RunnerError> {
    let flag = Flag::render(key)?;

    let values = match value {
        ParamValue::Absent => {
            if let Some(flag) = flag {
                tokens.push(flag.token);
            }
            return Ok(());
        }
        ParamValue::Scalar(scalar) => vec![escape_scalar(scalar)?],
        ParamValue::List(list) => list
            .iter()
            .map(escape_scalar)
            .collect::<Result<Vec<_>, _>>()?,
    };

    match flag {
        Some(flag) => {
            for value in values {
                flag.push_with_value(tokens, value);
            }
        }
        None => tokens.extend(values),
    }
    Ok(())
}

/// Render the parameter set into escaped tokens, in insertion order.
pub fn build_tokens(params: &Params) -> Result<Vec<String>, RunnerError> {
    let mut tokens = Vec::with_capacity(params.len() * 2);
    for (key, value) in params {
        push_pair(&mut tokens, key, value)?;
    }
    Ok(tokens)
}

/// Build the full command line for `command` with `params`.
///
/// The command itself is taken verbatim; only parameters are escaped.
/// `None` and an empty set both yield the bare command. Invalid parameters
/// fail the whole build, so a partial command line is never returned.
///
/// ```rust
/// use spawnline_runner::{build_command_line, Params};
///
/// let params = Params::new()
///     .with("--desc=", "Some Description")
///     .positional(["pkg1", "some pkg"]);
/// let line = build_command_line("true", Some(&params)).unwrap();
/// assert_eq!(line, "true --desc=Some\\ Description pkg1 some\\ pkg");
/// ```
pub fn build_command_line(
    command: impl AsRef<Path>,
    params: Option<&Params>,
) -> Result<String, RunnerError> {
    let command = command.as_ref();
    let command = command.to_str().ok_or_else(|| {
        RunnerError::invalid(format!("command {} is not valid UTF-8", command.display()))
    })?;
    if command.trim().is_empty() {
        return Err(RunnerError::invalid("command is empty"));
    }

    let mut line = command.to_string();
    if let Some(params) = params {
        for token in build_tokens(params)? {
            line.push(' ');
            line.push_str(&token);
        }
    }
    Ok(line)
}
