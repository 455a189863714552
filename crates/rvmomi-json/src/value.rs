// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Width-preserving dynamic values.
//!
//! The wire distinguishes `byte`/`short`/`int`/`long` and `float`/`double`,
//! so the value model keeps explicit widths throughout; a single number
//! variant would lose the information the encoder needs to pick the type
//! name back.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A decoded VMOMI value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    /// `byte` on the wire.
    Byte(u8),
    /// `short`.
    Short(i16),
    /// `int`.
    Int(i32),
    /// `long`.
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Raw bytes; base64 on the wire.
    Binary(Vec<u8>),
    DateTime(Timestamp),
    Seq(Vec<Value>),
    Struct(StructValue),
    Enum(EnumValue),
    Null,
}

impl Value {
    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u8.
    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i16.
    pub fn as_short(&self) -> Option<i16> {
        match self {
            Self::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f32.
    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as timestamp.
    pub fn as_datetime(&self) -> Option<&Timestamp> {
        match self {
            Self::DateTime(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Self::Seq(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as struct.
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as enum.
    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Self::Enum(v) => Some(v),
            _ => None,
        }
    }
}

/// Struct value: concrete type name plus fields in wire order.
///
/// Absent optional members are simply missing from the field list; that is
/// distinct from an explicit [`Value::Null`]. Equality compares fields as a
/// set: member order on the wire does not affect value identity.
#[derive(Debug, Clone)]
pub struct StructValue {
    type_name: String,
    fields: Vec<(String, Value)>,
}

impl PartialEq for StructValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl StructValue {
    /// Create an empty struct value of the given concrete type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Concrete type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Set a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Get a field by wire name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Whether the field is present (absent optional fields are not).
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate fields in insertion (wire) order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Enum value: the declared enum type's wire name plus the literal.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    /// Wire name of the enum type (not `string`).
    pub type_name: String,
    /// The literal.
    pub literal: String,
}

impl EnumValue {
    /// Create an enum value.
    pub fn new(type_name: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            literal: literal.into(),
        }
    }
}

/// An RFC 3339 timestamp.
///
/// Decoded timestamps keep the original wire text and re-emit it verbatim,
/// so a peer's precision survives round-trips. Equality compares instants
/// at nanosecond precision.
#[derive(Debug, Clone)]
pub struct Timestamp {
    instant: OffsetDateTime,
    text: Option<String>,
}

impl Timestamp {
    /// Parse an RFC 3339 timestamp, keeping the wire text.
    pub fn parse(text: &str) -> Result<Self, time::error::Parse> {
        let instant = OffsetDateTime::parse(text, &Rfc3339)?;
        Ok(Self {
            instant,
            text: Some(text.to_owned()),
        })
    }

    /// The parsed instant.
    pub fn instant(&self) -> OffsetDateTime {
        self.instant
    }

    /// The original wire text, when this timestamp came off the wire.
    pub fn wire_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The text to emit: the preserved wire form, or the instant formatted
    /// as RFC 3339.
    pub fn to_wire(&self) -> Result<String, time::error::Format> {
        match &self.text {
            Some(text) => Ok(text.clone()),
            None => self.instant.format(&Rfc3339),
        }
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(instant: OffsetDateTime) -> Self {
        Self {
            instant,
            text: None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Byte(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Binary(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Seq(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::DateTime(v)
    }
}

impl From<OffsetDateTime> for Value {
    fn from(v: OffsetDateTime) -> Self {
        Self::DateTime(v.into())
    }
}

impl From<StructValue> for Value {
    fn from(v: StructValue) -> Self {
        Self::Struct(v)
    }
}

impl From<EnumValue> for Value {
    fn from(v: EnumValue) -> Self {
        Self::Enum(v)
    }
}
