//! # Record Decoding
//!
//! Turns an untyped JSON payload into a strongly typed record, or into a
//! [`ValidationErrors`] listing every field that was wrong.
//!
//! ## Key Types
//!
//! - [`Decode`]: Anything that can be decoded from a `serde_json::Value` at a path.
//! - [`Record`]: A top-level validated record (adds a name and a mapping view).
//! - [`Fields`]: Reads the fields of one JSON object, accumulating errors.
//! - [`FieldPath`]: Dotted location of a value inside the payload (`author.email`).
//! - [`Email`]: A string that matched the email pattern.
//!
//! ## Coercion Rules
//!
//! | Target | Accepts | Rejects |
//! |--------|---------|---------|
//! | `String` | strings | numbers, booleans, null |
//! | `f64` | numbers, numeric strings (`"999.99"`) | booleans, non-finite values |
//! | `i64` | integers, integral floats, integer strings | fractions, booleans |
//! | `bool` | booleans | strings, numbers |
//! | `Duration` | non-negative seconds (number or numeric string) | negatives |

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{ValidationError, ValidationErrors};

// =============================================================================
// 1. FIELD PATHS
// =============================================================================

/// Location of a value inside the payload.
///
/// Object keys and list indices are joined with dots: `author.email`, `tasks.1.delay`.
/// The empty path is the payload itself and renders as `<root>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(key.to_string());
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(index.to_string());
        Self(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

/// Short description of a JSON value for `TypeMismatch` messages.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

fn mismatch(path: &FieldPath, expected: &'static str, value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        field: path.to_string(),
        expected,
        actual: describe(value),
    }
}

// =============================================================================
// 2. THE ABSTRACTION (Decode + Record)
// =============================================================================

/// Anything that can be decoded from a JSON value located at `path`.
pub trait Decode: Sized {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors>;
}

/// A top-level validated record.
///
/// Records are immutable once decoded. [`Record::to_mapping`] gives the plain
/// JSON-object view used for display and comparison.
pub trait Record: Decode + Serialize {
    /// Name used in logs.
    const NAME: &'static str;

    /// Decodes a whole payload.
    fn decode(input: &Value) -> Result<Self, ValidationErrors> {
        let result = Self::decode_at(input, &FieldPath::root());
        if let Err(errors) = &result {
            debug!(record = Self::NAME, errors = errors.len(), "Validation failed");
        }
        result
    }

    /// Plain mapping representation of the record.
    fn to_mapping(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

// =============================================================================
// 3. SCALARS
// =============================================================================

impl Decode for String {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        match input {
            Value::String(s) => Ok(s.clone()),
            other => Err(mismatch(path, "string", other).into()),
        }
    }
}

impl Decode for f64 {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let parsed = match input {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(x) if x.is_finite() => Ok(x),
            _ => Err(mismatch(path, "number", input).into()),
        }
    }
}

impl Decode for i64 {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let parsed = match input {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        };
        parsed.ok_or_else(|| mismatch(path, "integer", input).into())
    }
}

fn integral(x: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if x.is_finite() && x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(x as i64)
    } else {
        None
    }
}

impl Decode for bool {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        match input {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(path, "boolean", other).into()),
        }
    }
}

/// Seconds, as a number or numeric string. Must be non-negative.
impl Decode for Duration {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let secs = f64::decode_at(input, path)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            ValidationError::OutOfRange {
                field: path.to_string(),
                reason: format!("must be a non-negative number of seconds, got {}", secs),
            }
            .into()
        })
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let Value::Array(items) = input else {
            return Err(mismatch(path, "array", input).into());
        };
        let mut errors = ValidationErrors::new();
        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match T::decode_at(item, &path.index(index)) {
                Ok(value) => decoded.push(value),
                Err(e) => errors.extend(e),
            }
        }
        if errors.is_empty() {
            Ok(decoded)
        } else {
            Err(errors)
        }
    }
}

/// A top-level JSON array of records (e.g. a batch of products).
impl<T: Record> Record for Vec<T> {
    const NAME: &'static str = "List";
}

// =============================================================================
// 4. EMAIL
// =============================================================================

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex"));

/// A string shaped like `local@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Option<Self> {
        EMAIL_PATTERN.is_match(raw).then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl Decode for Email {
    fn decode_at(input: &Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        let raw = String::decode_at(input, path)?;
        Email::parse(&raw).ok_or_else(|| {
            ValidationError::FormatError {
                field: path.to_string(),
                reason: format!("{:?} is not a valid email address", raw),
            }
            .into()
        })
    }
}

// =============================================================================
// 5. OBJECT FIELDS
// =============================================================================

/// Reads the fields of one JSON object, collecting every violation.
///
/// Each accessor returns `None` exactly when it recorded an error, so a record
/// is assembled with `?` inside [`Fields::finish`]:
///
/// ```rust
/// use serde_json::json;
/// use typed_gather::record::{Fields, FieldPath};
///
/// let input = json!({"name": "Alice", "age": "30"});
/// let mut fields = Fields::open(&input, &FieldPath::root()).unwrap();
/// let name: Option<String> = fields.required("name");
/// let age: Option<i64> = fields.required("age");
/// let pair = fields.finish(|| Some((name?, age?))).unwrap();
/// assert_eq!(pair, ("Alice".to_string(), 30));
/// ```
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    /// Starts reading `input`, which must be a JSON object.
    pub fn open(input: &'a Value, path: &FieldPath) -> Result<Self, ValidationErrors> {
        match input {
            Value::Object(map) => Ok(Self {
                map,
                path: path.clone(),
                errors: ValidationErrors::new(),
            }),
            other => Err(mismatch(path, "object", other).into()),
        }
    }

    /// A field that must be present.
    pub fn required<T: Decode>(&mut self, name: &str) -> Option<T> {
        let map = self.map;
        let path = self.path.key(name);
        match map.get(name) {
            Some(value) => self.decode(value, &path),
            None => {
                self.errors.push(ValidationError::MissingField(path.to_string()));
                None
            }
        }
    }

    /// A field that takes `default` when absent and is validated when present.
    pub fn or_default<T: Decode>(&mut self, name: &str, default: T) -> Option<T> {
        let map = self.map;
        let path = self.path.key(name);
        match map.get(name) {
            Some(value) => self.decode(value, &path),
            None => Some(default),
        }
    }

    fn decode<T: Decode>(&mut self, value: &Value, path: &FieldPath) -> Option<T> {
        match T::decode_at(value, path) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                self.errors.extend(e);
                None
            }
        }
    }

    /// Builds the record if no field failed.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        build().ok_or(self.errors)
    }
}
