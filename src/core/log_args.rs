//! Key/value arguments attached to a log record
//!
//! This module provides:
//! - `ArgValue`: a dynamically typed argument value
//! - `LogArgs`: an insertion-ordered key/value mapping with a typed builder
//! - `encode_args`: conversion of a flat `key, value, key, value, ...` list
//! - `concat_values`: print-style joining used for concatenated messages

use super::error::{LoggerError, Result};
use std::borrow::Cow;
use std::fmt;

/// Key reused by a `Null` key position before any real key was seen
pub const UNKNOWN_KEY: &str = "_unknown";

/// Value type for log arguments
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Any other value, already rendered through `Display` or `Debug`
    Other(String),
    Null,
}

impl ArgValue {
    /// Capture an arbitrary value through its `Display` implementation
    pub fn display(value: &impl fmt::Display) -> Self {
        ArgValue::Other(value.to_string())
    }

    /// Capture an arbitrary value through its `Debug` implementation
    pub fn debug(value: &impl fmt::Debug) -> Self {
        ArgValue::Other(format!("{:?}", value))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, ArgValue::Str(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ArgValue::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Str(_) => "string",
            ArgValue::Int(_) => "int",
            ArgValue::UInt(_) => "uint",
            ArgValue::Float(_) => "float",
            ArgValue::Bool(_) => "bool",
            ArgValue::Other(_) => "value",
            ArgValue::Null => "nil",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Str(s) => write!(f, "{}", s),
            ArgValue::Int(i) => write!(f, "{}", i),
            ArgValue::UInt(u) => write!(f, "{}", u),
            ArgValue::Float(fl) => write!(f, "{}", fl),
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Other(s) => write!(f, "{}", s),
            ArgValue::Null => write!(f, "<nil>"),
        }
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Str(s)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Str(s.to_string())
    }
}

impl From<&String> for ArgValue {
    fn from(s: &String) -> Self {
        ArgValue::Str(s.clone())
    }
}

impl From<char> for ArgValue {
    fn from(c: char) -> Self {
        ArgValue::Str(c.to_string())
    }
}

macro_rules! arg_value_from {
    ($variant:ident as $target:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for ArgValue {
                fn from(v: $ty) -> Self {
                    ArgValue::$variant(v as $target)
                }
            }
        )+
    };
}

arg_value_from!(Int as i64: i8, i16, i32, i64, isize);
arg_value_from!(UInt as u64: u8, u16, u32, u64, usize);
arg_value_from!(Float as f64: f32, f64);

impl From<bool> for ArgValue {
    fn from(b: bool) -> Self {
        ArgValue::Bool(b)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ArgValue::Null, Into::into)
    }
}

/// Insertion-ordered key/value arguments of a single record
///
/// Setting an existing key replaces its value in place, so the key keeps
/// the position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogArgs {
    fields: Vec<(String, ArgValue)>,
}

impl LogArgs {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add an argument
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ArgValue>,
    {
        self.insert(key, value);
        self
    }

    /// Add an argument (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<ArgValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render as `[ key: value ] ` fragments in insertion order
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.fields {
            let value = value.to_string();
            write!(
                f,
                "[ {}: {} ] ",
                escape_line_breaks(key),
                escape_line_breaks(&value)
            )?;
        }
        Ok(())
    }
}

/// Escape newlines, carriage returns and tabs so text stays on one line
pub(crate) fn escape_line_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t"),
    )
}

impl<K: Into<String>, V: Into<ArgValue>> FromIterator<(K, V)> for LogArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = LogArgs::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

/// Encode a flat `key, value, key, value, ...` list
///
/// A `Null` in a key position reuses the previous key (or [`UNKNOWN_KEY`]
/// if none was seen yet). Fails on odd length or on a key position holding
/// anything other than a string or `Null`.
pub fn encode_args(values: &[ArgValue]) -> Result<LogArgs> {
    let mut args = LogArgs::new();
    if values.is_empty() {
        return Ok(args);
    }
    if values.len() % 2 != 0 {
        return Err(LoggerError::OddArgumentCount {
            count: values.len(),
        });
    }

    let mut key = UNKNOWN_KEY;
    for (pair, chunk) in values.chunks_exact(2).enumerate() {
        match &chunk[0] {
            ArgValue::Str(k) => key = k.as_str(),
            ArgValue::Null => {}
            other => {
                return Err(LoggerError::KeyNotString {
                    position: pair * 2,
                    found: other.type_name(),
                })
            }
        }
        args.insert(key, chunk[1].clone());
    }
    Ok(args)
}

/// Join values the way a plain print does: a space goes between two
/// adjacent operands only when neither of them is a string.
pub fn concat_values(values: &[ArgValue]) -> String {
    let mut out = String::new();
    let mut prev_is_string = true;
    for (idx, value) in values.iter().enumerate() {
        let is_string = value.is_string();
        if idx > 0 && !is_string && !prev_is_string {
            out.push(' ');
        }
        out.push_str(&value.to_string());
        prev_is_string = is_string;
    }
    out
}
