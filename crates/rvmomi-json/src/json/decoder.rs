// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discriminator-aware streaming decoder.
//!
//! Decoding is directed by the declared target descriptor. At every object
//! position the decoder looks ahead for the reserved `_typeName` member,
//! resolves it to a concrete descriptor, rewinds, and decodes into that
//! type. Documents in the wild place `_typeName` first by convention, which
//! keeps the look-ahead a near no-op.

use crate::catalog::TypeCatalog;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::error::{Error, Result};
use crate::json::scanner::Scanner;
use crate::json::{TYPE_NAME_MEMBER, VALUE_MEMBER};
use crate::primitive::PrimitiveKind;
use crate::resolve::{resolve, wire_name};
use crate::value::{EnumValue, StructValue, Timestamp, Value};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io;
use std::sync::Arc;

#[derive(Debug)]
enum PathSegment {
    Field(String),
    Index(usize),
}

/// Streaming JSON decoder for VMOMI documents.
///
/// A decoder owns one buffered document and decodes it once; it holds no
/// state beyond the tokenizer position and is disposable afterwards.
#[derive(Debug)]
pub struct Decoder<C> {
    scanner: Scanner,
    catalog: C,
    path: Vec<PathSegment>,
}

impl<C: TypeCatalog> Decoder<C> {
    /// Create a decoder over a reader. The reader is drained up front;
    /// faults surface as `io` errors.
    pub fn from_reader<R: io::Read>(mut reader: R, catalog: C) -> Result<Self> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map_err(Error::io)?;
        Self::from_slice(&buf, catalog)
    }

    /// Create a decoder over raw bytes.
    pub fn from_slice(input: &[u8], catalog: C) -> Result<Self> {
        let text =
            std::str::from_utf8(input).map_err(|_| Error::syntax("utf-8 input", None))?;
        Ok(Self::from_string(text, catalog))
    }

    /// Create a decoder over a string.
    pub fn from_string(input: impl Into<String>, catalog: C) -> Self {
        Self {
            scanner: Scanner::new(input.into()),
            catalog,
            path: Vec::new(),
        }
    }

    /// Decode the document into the declared target type.
    pub fn decode(&mut self, target: &TypeDescriptor) -> Result<Value> {
        match self.decode_document(target) {
            Ok(value) => Ok(value),
            Err(err) => Err(err.at(&self.path_string())),
        }
    }

    fn decode_document(&mut self, target: &TypeDescriptor) -> Result<Value> {
        let value = self.decode_value(target)?;
        self.scanner.skip_whitespace();
        if !self.scanner.at_end() {
            return Err(Error::trailing_characters());
        }
        Ok(value)
    }

    fn decode_value(&mut self, target: &TypeDescriptor) -> Result<Value> {
        self.scanner.skip_whitespace();
        match self.scanner.peek_char() {
            Some('n') => {
                if self.scanner.consume_literal("null") {
                    Ok(Value::Null)
                } else {
                    Err(Error::syntax("'null'", self.scanner.peek_char()))
                }
            }
            Some('{') => self.decode_object(target),
            Some('[') => match target.sequence_element() {
                Some(element) => {
                    let element = element.clone();
                    self.decode_seq(&element)
                }
                None if matches!(target.kind, TypeKind::Any) => {
                    Err(Error::missing_discriminator(wire_name(target)))
                }
                None => Err(Error::type_mismatch(wire_name(target), "array")),
            },
            Some(ch) if !matches!(ch, '"' | 't' | 'f' | '-' | '0'..='9') => {
                Err(Error::syntax("value", Some(ch)))
            }
            Some(ch) => match &target.kind {
                TypeKind::Primitive(kind) => self.decode_scalar(*kind),
                TypeKind::Enum(_) => {
                    if ch == '"' {
                        let literal = self.scanner.parse_string()?;
                        Ok(Value::Enum(EnumValue::new(target.name.clone(), literal)))
                    } else {
                        Err(Error::type_mismatch(wire_name(target), token_name(ch)))
                    }
                }
                TypeKind::Any => Err(Error::missing_discriminator(wire_name(target))),
                TypeKind::Struct(_) | TypeKind::Sequence(_) => {
                    Err(Error::type_mismatch(wire_name(target), token_name(ch)))
                }
            },
            None => Err(Error::syntax("value", None)),
        }
    }

    fn decode_object(&mut self, target: &TypeDescriptor) -> Result<Value> {
        self.scanner.expect_char('{')?;
        match self.find_discriminator()? {
            Some(name) => {
                let concrete = resolve(&self.catalog, &name)
                    .ok_or_else(|| Error::unknown_type_name(&name))?;
                self.check_assignable(&concrete, target)?;
                match &concrete.kind {
                    TypeKind::Primitive(kind) => {
                        let kind = *kind;
                        let mut value =
                            self.decode_envelope(&name, |d| d.decode_scalar(kind))?;
                        // float widens into a declared double position
                        if let (Value::Float(v), Some(PrimitiveKind::F64)) =
                            (&value, target.as_primitive())
                        {
                            value = Value::Double(f64::from(*v));
                        }
                        Ok(value)
                    }
                    TypeKind::Sequence(seq) => {
                        let element = seq.element_type.clone();
                        self.decode_envelope(&name, |d| {
                            d.scanner.skip_whitespace();
                            match d.scanner.peek_char() {
                                Some('[') => d.decode_seq(&element),
                                Some('n') if d.scanner.consume_literal("null") => Ok(Value::Null),
                                other => Err(Error::syntax("array", other)),
                            }
                        })
                    }
                    TypeKind::Enum(_) => {
                        let enum_name = concrete.name.clone();
                        self.decode_envelope(&name, |d| {
                            d.scanner.skip_whitespace();
                            let literal = d.scanner.parse_string()?;
                            Ok(Value::Enum(EnumValue::new(enum_name, literal)))
                        })
                    }
                    TypeKind::Struct(_) => {
                        self.decode_struct_members(&concrete).map(Value::Struct)
                    }
                    TypeKind::Any => {
                        Err(Error::type_mismatch(wire_name(target), "anyType"))
                    }
                }
            }
            None => {
                if target.is_polymorphic() {
                    Err(Error::missing_discriminator(wire_name(target)))
                } else if target.is_struct() {
                    self.decode_struct_members(target).map(Value::Struct)
                } else {
                    Err(Error::type_mismatch(wire_name(target), "object"))
                }
            }
        }
    }

    /// Look ahead over the object head for the `_typeName` member, then
    /// rewind to just after the opening brace.
    fn find_discriminator(&mut self) -> Result<Option<String>> {
        let start = self.scanner.position();
        let found = self.scan_for_discriminator();
        self.scanner.seek(start);
        found
    }

    fn scan_for_discriminator(&mut self) -> Result<Option<String>> {
        self.scanner.skip_whitespace();
        if self.scanner.peek_char() == Some('}') {
            return Ok(None);
        }
        loop {
            self.scanner.skip_whitespace();
            let name = self.scanner.parse_string()?;
            self.scanner.skip_whitespace();
            self.scanner.expect_char(':')?;
            if name == TYPE_NAME_MEMBER {
                self.scanner.skip_whitespace();
                return self.scanner.parse_string().map(Some);
            }
            self.scanner.skip_value()?;
            self.scanner.skip_whitespace();
            match self.scanner.next_char() {
                Some(',') => {}
                Some('}') => return Ok(None),
                other => return Err(Error::syntax("',' or '}'", other)),
            }
        }
    }

    /// Decode an envelope body from just after the opening brace: run `f`
    /// on the `_value` member, skip everything else including the
    /// discriminator itself.
    fn decode_envelope<F>(&mut self, type_name: &str, f: F) -> Result<Value>
    where
        F: FnOnce(&mut Self) -> Result<Value>,
    {
        let mut f = Some(f);
        let mut payload = None;
        self.scanner.skip_whitespace();
        if self.scanner.peek_char() == Some('}') {
            self.scanner.next_char();
        } else {
            loop {
                self.scanner.skip_whitespace();
                let name = self.scanner.parse_string()?;
                self.scanner.skip_whitespace();
                self.scanner.expect_char(':')?;
                match f.take() {
                    Some(f) if name == VALUE_MEMBER => payload = Some(f(self)?),
                    other => {
                        f = other;
                        self.scanner.skip_value()?;
                    }
                }
                self.scanner.skip_whitespace();
                match self.scanner.next_char() {
                    Some(',') => {}
                    Some('}') => break,
                    other => return Err(Error::syntax("',' or '}'", other)),
                }
            }
        }
        payload.ok_or_else(|| {
            Error::malformed_primitive(type_name, "envelope is missing the _value member")
        })
    }

    /// Decode object members as fields of `concrete`, from just after the
    /// opening brace. Unknown members are skipped; a `null` member leaves
    /// an optional field absent and zero-fills a required one.
    fn decode_struct_members(&mut self, concrete: &TypeDescriptor) -> Result<StructValue> {
        let mut value = StructValue::new(concrete.name.clone());
        self.scanner.skip_whitespace();
        if self.scanner.peek_char() == Some('}') {
            self.scanner.next_char();
            return Ok(value);
        }
        loop {
            self.scanner.skip_whitespace();
            let name = self.scanner.parse_string()?;
            self.scanner.skip_whitespace();
            self.scanner.expect_char(':')?;
            if name == TYPE_NAME_MEMBER {
                // Already consumed by the look-ahead.
                self.scanner.skip_value()?;
            } else if let Some(field) = concrete.field(&name) {
                let field_type = Arc::clone(&field.type_desc);
                let optional = field.optional;
                self.path.push(PathSegment::Field(name.clone()));
                self.scanner.skip_whitespace();
                if self.scanner.peek_char() == Some('n') {
                    if !self.scanner.consume_literal("null") {
                        return Err(Error::syntax("'null'", self.scanner.peek_char()));
                    }
                    if !optional {
                        value.set(name, field_type.zero_value());
                    }
                } else {
                    let decoded = self.decode_value(&field_type)?;
                    value.set(name, decoded);
                }
                self.path.pop();
            } else {
                log::debug!("skipping unknown member {name} in {}", concrete.name);
                self.scanner.skip_value()?;
            }
            self.scanner.skip_whitespace();
            match self.scanner.next_char() {
                Some(',') => {}
                Some('}') => break,
                other => return Err(Error::syntax("',' or '}'", other)),
            }
        }
        Ok(value)
    }

    fn decode_seq(&mut self, element: &TypeDescriptor) -> Result<Value> {
        self.scanner.expect_char('[')?;
        let mut items = Vec::new();
        self.scanner.skip_whitespace();
        if self.scanner.peek_char() == Some(']') {
            self.scanner.next_char();
            return Ok(Value::Seq(items));
        }
        loop {
            self.path.push(PathSegment::Index(items.len()));
            let item = self.decode_value(element)?;
            self.path.pop();
            items.push(item);
            self.scanner.skip_whitespace();
            match self.scanner.next_char() {
                Some(',') => {}
                Some(']') => break,
                other => return Err(Error::syntax("',' or ']'", other)),
            }
        }
        Ok(Value::Seq(items))
    }

    fn decode_scalar(&mut self, kind: PrimitiveKind) -> Result<Value> {
        self.scanner.skip_whitespace();
        let token = match self.scanner.peek_char() {
            Some(ch) => ch,
            None => return Err(Error::syntax("value", None)),
        };
        match kind {
            PrimitiveKind::Bool => match token {
                't' | 'f' => {
                    if self.scanner.consume_literal("true") {
                        Ok(Value::Bool(true))
                    } else if self.scanner.consume_literal("false") {
                        Ok(Value::Bool(false))
                    } else {
                        Err(Error::syntax("boolean", Some(token)))
                    }
                }
                _ => Err(Error::type_mismatch("boolean", token_name(token))),
            },
            PrimitiveKind::U8 | PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64 => {
                if !matches!(token, '-' | '0'..='9') {
                    return Err(Error::type_mismatch(kind.wire_name(), token_name(token)));
                }
                self.decode_integer(kind)
            }
            PrimitiveKind::F32 | PrimitiveKind::F64 => {
                if !matches!(token, '-' | '0'..='9') {
                    return Err(Error::type_mismatch(kind.wire_name(), token_name(token)));
                }
                self.decode_float(kind)
            }
            PrimitiveKind::String => {
                if token != '"' {
                    return Err(Error::type_mismatch("string", token_name(token)));
                }
                self.scanner.parse_string().map(Value::String)
            }
            PrimitiveKind::Binary => {
                if token != '"' {
                    return Err(Error::type_mismatch("binary", token_name(token)));
                }
                let text = self.scanner.parse_string()?;
                BASE64
                    .decode(text.as_bytes())
                    .map(Value::Binary)
                    .map_err(|err| Error::malformed_primitive("binary", err.to_string()))
            }
            PrimitiveKind::DateTime => {
                if token != '"' {
                    return Err(Error::type_mismatch("dateTime", token_name(token)));
                }
                let text = self.scanner.parse_string()?;
                Timestamp::parse(&text)
                    .map(Value::DateTime)
                    .map_err(|err| Error::malformed_primitive("dateTime", err.to_string()))
            }
        }
    }

    fn decode_integer(&mut self, kind: PrimitiveKind) -> Result<Value> {
        let span = match self.scanner.parse_number_span() {
            Ok(span) => span.to_owned(),
            Err(err) => return Err(err),
        };
        let parsed: i128 = span.parse().map_err(|_| {
            Error::malformed_primitive(kind.wire_name(), format!("invalid integer {span}"))
        })?;
        let overflow = || Error::numeric_overflow(span.clone(), kind.wire_name());
        match kind {
            PrimitiveKind::U8 => u8::try_from(parsed)
                .map(Value::Byte)
                .map_err(|_| overflow()),
            PrimitiveKind::I16 => i16::try_from(parsed)
                .map(Value::Short)
                .map_err(|_| overflow()),
            PrimitiveKind::I32 => i32::try_from(parsed)
                .map(Value::Int)
                .map_err(|_| overflow()),
            PrimitiveKind::I64 => i64::try_from(parsed)
                .map(Value::Long)
                .map_err(|_| overflow()),
            _ => unreachable!("decode_integer called for integer widths only"),
        }
    }

    fn decode_float(&mut self, kind: PrimitiveKind) -> Result<Value> {
        let span = match self.scanner.parse_number_span() {
            Ok(span) => span.to_owned(),
            Err(err) => return Err(err),
        };
        let parsed: f64 = span.parse().map_err(|_| {
            Error::malformed_primitive(kind.wire_name(), format!("invalid number {span}"))
        })?;
        match kind {
            PrimitiveKind::F32 => {
                let narrowed = parsed as f32;
                if narrowed.is_infinite() && parsed.is_finite() {
                    return Err(Error::numeric_overflow(span, "float"));
                }
                Ok(Value::Float(narrowed))
            }
            PrimitiveKind::F64 => Ok(Value::Double(parsed)),
            _ => unreachable!("decode_float called for float widths only"),
        }
    }

    fn check_assignable(&self, concrete: &TypeDescriptor, target: &TypeDescriptor) -> Result<()> {
        if concrete.assignable_to(target) {
            Ok(())
        } else {
            Err(Error::type_mismatch(wire_name(target), wire_name(concrete)))
        }
    }

    fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }
}

fn token_name(ch: char) -> &'static str {
    match ch {
        '{' => "object",
        '[' => "array",
        '"' => "string",
        't' | 'f' => "boolean",
        'n' => "null",
        '-' | '0'..='9' => "number",
        _ => "value",
    }
}
