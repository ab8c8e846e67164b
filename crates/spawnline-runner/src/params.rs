//! Parameter set model
//!
//! A [`Params`] is an ordered list of `(key, value)` pairs. Keys are either
//! positional (no flag) or a flag token; values are absent, a single scalar,
//! or a list of scalars. Host types convert into these variants through
//! `From`, so callers can mix strings, numbers and paths freely.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::error::RunnerError;

// ============================================================================
// Scalar
// ============================================================================

/// A single parameter value before escaping.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Path(PathBuf),
}

impl Scalar {
    /// String form of the value, unescaped.
    pub fn render(&self) -> Result<String, RunnerError> {
        match self {
            Self::Str(s) => Ok(s.clone()),
            Self::Int(n) => Ok(n.to_string()),
            Self::UInt(n) => Ok(n.to_string()),
            // `{:?}` keeps a fractional part (`1.0`) and switches to exponent form for
            // very large or small magnitudes (`1e21`).
            Self::Float(n) => Ok(format!("{n:?}")),
            Self::Path(path) => path.to_str().map(str::to_string).ok_or_else(|| {
                RunnerError::invalid(format!("path {} is not valid UTF-8", path.display()))
            }),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<PathBuf> for Scalar {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for Scalar {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<&PathBuf> for Scalar {
    fn from(value: &PathBuf) -> Self {
        Self::Path(value.clone())
    }
}

macro_rules! impl_scalar_from_number {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Scalar {
                #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
                fn from(value: $source) -> Self {
                    Self::$variant(value as $target)
                }
            }
        )+
    };
}

impl_scalar_from_number!(Int as i64: i8, i16, i32, i64, isize);
impl_scalar_from_number!(UInt as u64: u8, u16, u32, u64, usize);
impl_scalar_from_number!(Float as f64: f32, f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawScalar::deserialize(deserializer)? {
            RawScalar::Int(n) => Self::Int(n),
            RawScalar::UInt(n) => Self::UInt(n),
            RawScalar::Float(n) => Self::Float(n),
            RawScalar::Str(s) => Self::Str(s),
        })
    }
}

// ============================================================================
// ParamValue
// ============================================================================

/// Value side of a parameter pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamValue {
    /// Bare flag, nothing follows it.
    #[default]
    Absent,
    Scalar(Scalar),
    /// Flag repeated once per element, in order.
    List(Vec<Scalar>),
}

macro_rules! impl_value_from_scalar {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ParamValue {
                fn from(value: $source) -> Self {
                    Self::Scalar(value.into())
                }
            }
        )+
    };
}

impl_value_from_scalar!(
    Scalar, &str, String, &String, PathBuf, &Path, &PathBuf, i8, i16, i32, i64, isize, u8, u16,
    u32, u64, usize, f32, f64
);

impl From<()> for ParamValue {
    fn from((): ()) -> Self {
        Self::Absent
    }
}

impl<T: Into<Scalar>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, |v| Self::Scalar(v.into()))
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Clone> From<&[T]> for ParamValue {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawValue>::deserialize(deserializer)? {
            None => Self::Absent,
            Some(RawValue::One(scalar)) => Self::Scalar(scalar),
            Some(RawValue::Many(list)) => Self::List(list),
        })
    }
}

// ============================================================================
// ParamKey
// ============================================================================

/// Key side of a parameter pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ParamKey {
    /// No flag; the value is emitted as bare positional arguments.
    #[default]
    Positional,
    Flag(Scalar),
}

impl ParamKey {
    #[must_use]
    pub const fn is_positional(&self) -> bool {
        matches!(self, Self::Positional)
    }
}

macro_rules! impl_key_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ParamKey {
                fn from(value: $source) -> Self {
                    Self::Flag(value.into())
                }
            }
        )+
    };
}

impl_key_from!(&str, String, &String, PathBuf, &Path, &PathBuf);

impl From<()> for ParamKey {
    fn from((): ()) -> Self {
        Self::Positional
    }
}

impl<T: Into<ParamKey>> From<Option<T>> for ParamKey {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Positional, Into::into)
    }
}

impl<'de> Deserialize<'de> for ParamKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.into())
    }
}

// ============================================================================
// Params
// ============================================================================

/// Ordered parameter set.
///
/// ```rust
/// use spawnline_runner::Params;
///
/// let params = Params::new()
///     .with("--user", "bob")
///     .flag("--db")
///     .positional(["pkg1", "some pkg"]);
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pairs: Vec<(ParamKey, ParamValue)>,
}

impl Params {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a pair in place.
    pub fn push(&mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) -> &mut Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a `key value` pair.
    #[must_use]
    pub fn with(mut self, key: impl Into<ParamKey>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a flag that takes no value.
    #[must_use]
    pub fn flag(mut self, key: impl Into<ParamKey>) -> Self {
        self.push(key, ParamValue::Absent);
        self
    }

    /// Append one or more positional arguments.
    #[must_use]
    pub fn positional(mut self, value: impl Into<ParamValue>) -> Self {
        self.push(ParamKey::Positional, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (ParamKey, ParamValue)> {
        self.pairs.iter()
    }
}

impl<K: Into<ParamKey>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<ParamKey>, V: Into<ParamValue>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K: Into<ParamKey>, V: Into<ParamValue>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a (ParamKey, ParamValue);
    type IntoIter = std::slice::Iter<'a, (ParamKey, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

/// Accepts either a list of `[key, value]` pairs (keys may be `null` for
/// positional arguments) or an object, whose entries keep document order.
impl<'de> Deserialize<'de> for Params {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ParamsVisitor;

        impl<'de> Visitor<'de> for ParamsVisitor {
            type Value = Params;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a list of [key, value] pairs or a map of flags")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Params, E> {
                Ok(Params::new())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Params, A::Error> {
                let mut params = Params::new();
                while let Some((key, value)) = seq.next_element::<(ParamKey, ParamValue)>()? {
                    params.pairs.push((key, value));
                }
                Ok(params)
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Params, A::Error> {
                let mut params = Params::new();
                while let Some((key, value)) = map.next_entry::<String, ParamValue>()? {
                    params.pairs.push((ParamKey::from(key), value));
                }
                Ok(params)
            }
        }

        deserializer.deserialize_any(ParamsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Scalar::from("a"), Scalar::Str("a".to_string()));
        assert_eq!(Scalar::from(123_i32), Scalar::Int(123));
        assert_eq!(Scalar::from(456_usize), Scalar::UInt(456));
        assert_eq!(Scalar::from(0.5_f64), Scalar::Float(0.5));
        assert_eq!(
            Scalar::from(Path::new("/usr/bin/ruby")),
            Scalar::Path(PathBuf::from("/usr/bin/ruby"))
        );
    }

    #[test]
    fn test_float_render_keeps_float_form() {
        assert_eq!(Scalar::Float(1.0).render().unwrap(), "1.0");
        assert_eq!(Scalar::Float(-2.0).render().unwrap(), "-2.0");
        assert_eq!(Scalar::Float(0.5).render().unwrap(), "0.5");
        assert_eq!(Scalar::Float(1e21).render().unwrap(), "1e21");
        assert_eq!(Scalar::from(1.5_f32).render().unwrap(), "1.5");
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(ParamValue::from(()), ParamValue::Absent);
        assert_eq!(ParamValue::from(None::<&str>), ParamValue::Absent);
        assert_eq!(
            ParamValue::from(Some("x")),
            ParamValue::Scalar(Scalar::Str("x".to_string()))
        );
        assert_eq!(
            ParamValue::from(vec![1, 2]),
            ParamValue::List(vec![Scalar::Int(1), Scalar::Int(2)])
        );
        assert_eq!(
            ParamValue::from(["a", "b"]),
            ParamValue::List(vec![Scalar::from("a"), Scalar::from("b")])
        );
    }

    #[test]
    fn test_key_conversions() {
        assert_eq!(ParamKey::from(()), ParamKey::Positional);
        assert_eq!(ParamKey::from(None::<&str>), ParamKey::Positional);
        assert_eq!(ParamKey::from("--user"), ParamKey::Flag(Scalar::from("--user")));
        assert!(ParamKey::default().is_positional());
    }

    #[test]
    fn test_params_preserve_insertion_order() {
        let params = Params::new()
            .with("--zeta", 1)
            .with("--alpha", 2)
            .flag("--mid");
        let keys: Vec<&ParamKey> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            [
                &ParamKey::from("--zeta"),
                &ParamKey::from("--alpha"),
                &ParamKey::from("--mid")
            ]
        );
    }

    #[test]
    fn test_params_extend_with_association_list() {
        let mut params = Params::from([("--user", "bob")]);
        params.extend([123, 456].map(|pool| ("--pool", pool)));
        assert_eq!(params.len(), 3);
        assert_eq!(
            params.iter().last(),
            Some(&(ParamKey::from("--pool"), ParamValue::from(456)))
        );
    }

    #[test]
    fn test_deserialize_pairs() {
        let params: Params = serde_json::from_str(
            r#"[["--user", "bob"], ["--db", null], [null, ["pkg1", "some pkg"]], ["--pool", 123]]"#,
        )
        .unwrap();
        let expected = Params::new()
            .with("--user", "bob")
            .flag("--db")
            .positional(["pkg1", "some pkg"])
            .with("--pool", 123_i64);
        assert_eq!(params, expected);
    }

    #[test]
    fn test_deserialize_map_keeps_document_order() {
        let params: Params =
            serde_json::from_str(r#"{"--zeta": "z", "--alpha": 1.5, "-v": null}"#).unwrap();
        let expected = Params::new()
            .with("--zeta", "z")
            .with("--alpha", 1.5)
            .flag("-v");
        assert_eq!(params, expected);
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let params: Params = serde_json::from_str("null").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_nested_lists() {
        let result: Result<Params, _> = serde_json::from_str(r#"[["--x", [[1]]]]"#);
        assert!(result.is_err());
    }
}
