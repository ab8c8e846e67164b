//! Property tests for command-line building
//!
//! Every built line must split back, under POSIX shell word rules, into the
//! command followed by exactly the tokens the parameters describe.

use proptest::prelude::*;
use spawnline::{Params, build_command_line};

fn flag_name() -> impl Strategy<Value = String> {
    "--[a-z][a-z0-9-]{0,12}"
}

fn value() -> impl Strategy<Value = String> {
    "[^\\x00]{0,24}"
}

proptest! {
    /// A flag with a list value repeats once per element, in order.
    #[test]
    fn prop_list_values_repeat_flag(
        flag in flag_name(),
        values in proptest::collection::vec(value(), 0..6),
    ) {
        let params = Params::new().with(flag.as_str(), values.clone());
        let line = build_command_line("true", Some(&params)).unwrap();
        let words = shell_words::split(&line).unwrap();

        let mut expected = vec!["true".to_string()];
        for v in &values {
            expected.push(flag.clone());
            expected.push(v.clone());
        }
        prop_assert_eq!(words, expected);
    }

    /// Positional values come back verbatim, one word each.
    #[test]
    fn prop_positionals_survive_shell_splitting(
        values in proptest::collection::vec(value(), 0..6),
    ) {
        let params = Params::new().positional(values.clone());
        let line = build_command_line("true", Some(&params)).unwrap();
        let words = shell_words::split(&line).unwrap();

        prop_assert_eq!(&words[0], "true");
        prop_assert_eq!(&words[1..], values.as_slice());
    }

    /// Glued flags keep `=` literal and attach the value without a space.
    #[test]
    fn prop_glued_flag_is_one_word(flag in flag_name(), v in value()) {
        let key = format!("{flag}=");
        let params = Params::new().with(key.as_str(), v.as_str());
        let line = build_command_line("true", Some(&params)).unwrap();
        let words = shell_words::split(&line).unwrap();

        prop_assert_eq!(words, vec!["true".to_string(), format!("{flag}={v}")]);
    }

    /// Building never mutates the parameter set and is deterministic.
    #[test]
    fn prop_build_is_pure(
        flag in flag_name(),
        values in proptest::collection::vec(value(), 0..4),
    ) {
        let params = Params::new()
            .flag(flag.as_str())
            .with(flag.as_str(), values.clone())
            .positional(values);
        let before = params.clone();

        let first = build_command_line("true", Some(&params)).unwrap();
        let second = build_command_line("true", Some(&params)).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(params, before);
    }
}
