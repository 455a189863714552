// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Discriminator-emitting encoder.
//!
//! Emits `_typeName` ahead of object members and wraps primitives,
//! sequences and enums in `_typeName`/`_value` envelopes at polymorphic
//! positions. Numeric type names come from the value's storage width, never
//! from its magnitude.

use crate::catalog::TypeCatalog;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::error::{Error, Result};
use crate::json::{TYPE_NAME_MEMBER, VALUE_MEMBER};
use crate::resolve::{first_to_upper, wire_name, ARRAY_OF_PREFIX};
use crate::value::{StructValue, Value};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::io;

/// Encoder configuration.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Pretty-print indent; `None` renders compact output.
    pub indent: Option<String>,
    /// Emit `_typeName` on the top-level value.
    pub type_name_at_root: bool,
    /// Emit `_typeName` on every object, not only at polymorphic positions.
    pub type_name_on_all_objects: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: Some("  ".to_string()),
            type_name_at_root: true,
            type_name_on_all_objects: true,
        }
    }
}

impl EncodeOptions {
    /// Default flags without pretty printing.
    pub fn compact() -> Self {
        Self {
            indent: None,
            ..Self::default()
        }
    }
}

/// JSON encoder for VMOMI values.
///
/// The encoder owns its writer for the duration of the call and holds no
/// other state; it is disposable after the document is written.
pub struct Encoder<W, C> {
    writer: W,
    catalog: C,
    options: EncodeOptions,
}

impl<W: io::Write, C: TypeCatalog> Encoder<W, C> {
    /// Create an encoder with the default options (two-space indent, type
    /// names at root and on all objects).
    pub fn new(writer: W, catalog: C) -> Self {
        Self::with_options(writer, catalog, EncodeOptions::default())
    }

    /// Create an encoder with explicit options.
    pub fn with_options(writer: W, catalog: C, options: EncodeOptions) -> Self {
        Self {
            writer,
            catalog,
            options,
        }
    }

    /// Encode one value as a complete document.
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        let out = self.render(value)?;
        self.writer.write_all(out.as_bytes()).map_err(Error::io)?;
        self.writer.write_all(b"\n").map_err(Error::io)
    }

    /// Consume the encoder and return the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, value: &Value) -> Result<String> {
        let mut out = String::new();
        self.write_value(&mut out, value, None, self.options.type_name_at_root, 0)?;
        Ok(out)
    }

    fn write_value(
        &self,
        out: &mut String,
        value: &Value,
        declared: Option<&TypeDescriptor>,
        poly: bool,
        depth: usize,
    ) -> Result<()> {
        match value {
            Value::Null => {
                out.push_str("null");
                Ok(())
            }
            Value::Bool(v) => {
                self.write_scalar(out, "boolean", if *v { "true" } else { "false" }, poly, depth)
            }
            Value::Byte(v) => self.write_scalar(out, "byte", &v.to_string(), poly, depth),
            Value::Short(v) => self.write_scalar(out, "short", &v.to_string(), poly, depth),
            Value::Int(v) => self.write_scalar(out, "int", &v.to_string(), poly, depth),
            Value::Long(v) => self.write_scalar(out, "long", &v.to_string(), poly, depth),
            Value::Float(v) => {
                if !v.is_finite() {
                    return Err(Error::non_finite_float());
                }
                self.write_scalar(out, "float", &v.to_string(), poly, depth)
            }
            Value::Double(v) => {
                if !v.is_finite() {
                    return Err(Error::non_finite_float());
                }
                self.write_scalar(out, "double", &v.to_string(), poly, depth)
            }
            Value::String(v) => {
                let mut quoted = String::new();
                write_escaped_string(v, &mut quoted);
                self.write_scalar(out, "string", &quoted, poly, depth)
            }
            Value::Binary(v) => {
                let quoted = format!("\"{}\"", BASE64.encode(v));
                self.write_scalar(out, "binary", &quoted, poly, depth)
            }
            Value::DateTime(v) => {
                let text = v
                    .to_wire()
                    .map_err(|err| Error::malformed_primitive("dateTime", err.to_string()))?;
                let mut quoted = String::new();
                write_escaped_string(&text, &mut quoted);
                self.write_scalar(out, "dateTime", &quoted, poly, depth)
            }
            Value::Seq(items) => self.write_seq(out, items, declared, poly, depth),
            Value::Struct(object) => self.write_struct(out, object, poly, depth),
            Value::Enum(v) => {
                let mut quoted = String::new();
                write_escaped_string(&v.literal, &mut quoted);
                self.write_scalar(out, &v.type_name, &quoted, poly, depth)
            }
        }
    }

    /// Emit a rendered scalar, wrapped in a `_typeName`/`_value` envelope at
    /// polymorphic positions.
    fn write_scalar(
        &self,
        out: &mut String,
        type_name: &str,
        rendered: &str,
        poly: bool,
        depth: usize,
    ) -> Result<()> {
        if poly {
            self.write_envelope(out, type_name, rendered, depth);
        } else {
            out.push_str(rendered);
        }
        Ok(())
    }

    fn write_envelope(&self, out: &mut String, type_name: &str, rendered: &str, depth: usize) {
        let members = [
            (TYPE_NAME_MEMBER, quoted(type_name)),
            (VALUE_MEMBER, rendered.to_string()),
        ];
        self.write_object(out, members.iter().map(|(n, r)| (*n, r.as_str())), depth);
    }

    fn write_seq(
        &self,
        out: &mut String,
        items: &[Value],
        declared: Option<&TypeDescriptor>,
        poly: bool,
        depth: usize,
    ) -> Result<()> {
        let element = declared
            .and_then(TypeDescriptor::sequence_element)
            .map(|e| e.as_ref());
        if poly {
            let type_name = self.sequence_type_name(declared, items);
            let mut rendered = String::new();
            self.write_seq_items(&mut rendered, items, element, depth + 1)?;
            self.write_envelope(out, &type_name, &rendered, depth);
            Ok(())
        } else {
            self.write_seq_items(out, items, element, depth)
        }
    }

    fn write_seq_items(
        &self,
        out: &mut String,
        items: &[Value],
        element: Option<&TypeDescriptor>,
        depth: usize,
    ) -> Result<()> {
        if items.is_empty() {
            out.push_str("[]");
            return Ok(());
        }
        let element_poly = element.is_some_and(TypeDescriptor::is_open_position);
        out.push('[');
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                out.push(',');
            }
            self.newline_indent(out, depth + 1);
            self.write_value(out, item, element, element_poly, depth + 1)?;
        }
        self.newline_indent(out, depth);
        out.push(']');
        Ok(())
    }

    fn write_struct(
        &self,
        out: &mut String,
        object: &StructValue,
        poly: bool,
        depth: usize,
    ) -> Result<()> {
        let emit_type_name = poly || self.options.type_name_on_all_objects;
        let descriptor = self.catalog.lookup(object.type_name());

        let mut members: Vec<(String, String)> = Vec::new();
        if emit_type_name {
            members.push((TYPE_NAME_MEMBER.to_string(), quoted(object.type_name())));
        }

        // Absent members are omitted; a member holding an explicit null is
        // present and renders as a literal `null`.
        match &descriptor {
            Some(desc) => {
                // Declared order keeps output stable across invocations.
                for field in desc.fields() {
                    if let Some(value) = object.get(&field.name) {
                        let mut rendered = String::new();
                        self.write_value(
                            &mut rendered,
                            value,
                            Some(&field.type_desc),
                            // Declared sequences stay bare arrays; only an
                            // opaque or open-base position takes an envelope.
                            field.type_desc.is_open_position(),
                            depth + 1,
                        )?;
                        members.push((field.name.clone(), rendered));
                    }
                }
                for (name, value) in object.fields() {
                    if desc.field(name).is_none() {
                        let mut rendered = String::new();
                        self.write_value(&mut rendered, value, None, false, depth + 1)?;
                        members.push((name.to_string(), rendered));
                    }
                }
            }
            None => {
                for (name, value) in object.fields() {
                    let mut rendered = String::new();
                    self.write_value(&mut rendered, value, None, false, depth + 1)?;
                    members.push((name.to_string(), rendered));
                }
            }
        }

        self.write_object(
            out,
            members.iter().map(|(n, r)| (n.as_str(), r.as_str())),
            depth,
        );
        Ok(())
    }

    fn write_object<'m>(
        &self,
        out: &mut String,
        members: impl Iterator<Item = (&'m str, &'m str)>,
        depth: usize,
    ) {
        let mut first = true;
        for (name, rendered) in members {
            if first {
                out.push('{');
                first = false;
            } else {
                out.push(',');
            }
            self.newline_indent(out, depth + 1);
            write_escaped_string(name, out);
            out.push(':');
            if self.options.indent.is_some() {
                out.push(' ');
            }
            out.push_str(rendered);
        }
        if first {
            out.push_str("{}");
        } else {
            self.newline_indent(out, depth);
            out.push('}');
        }
    }

    /// Wire name of a sequence at a polymorphic position: the declared
    /// element type when concrete, the first element's runtime type
    /// otherwise, `ArrayOfAnyType` when neither is known.
    fn sequence_type_name(&self, declared: Option<&TypeDescriptor>, items: &[Value]) -> String {
        if let Some(element) = declared.and_then(TypeDescriptor::sequence_element) {
            if !matches!(element.kind, TypeKind::Any) {
                return format!("{ARRAY_OF_PREFIX}{}", first_to_upper(&wire_name(element)));
            }
        }
        match items.iter().find(|item| !item.is_null()) {
            Some(first) => format!(
                "{ARRAY_OF_PREFIX}{}",
                first_to_upper(&self.runtime_type_name(first))
            ),
            None => format!("{ARRAY_OF_PREFIX}AnyType"),
        }
    }

    /// Wire name of a value's runtime type, derived from its storage width
    /// or carried type name.
    fn runtime_type_name(&self, value: &Value) -> String {
        match value {
            Value::Bool(_) => "boolean".to_string(),
            Value::Byte(_) => "byte".to_string(),
            Value::Short(_) => "short".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Long(_) => "long".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Double(_) => "double".to_string(),
            Value::String(_) => "string".to_string(),
            Value::Binary(_) => "binary".to_string(),
            Value::DateTime(_) => "dateTime".to_string(),
            Value::Seq(items) => self.sequence_type_name(None, items),
            Value::Struct(object) => object.type_name().to_string(),
            Value::Enum(v) => v.type_name.clone(),
            Value::Null => "anyType".to_string(),
        }
    }

    fn newline_indent(&self, out: &mut String, depth: usize) {
        if let Some(indent) = &self.options.indent {
            out.push('\n');
            for _ in 0..depth {
                out.push_str(indent);
            }
        }
    }
}

/// Encode a value to a string with the default options.
pub fn to_string<C: TypeCatalog>(value: &Value, catalog: C) -> Result<String> {
    to_string_with(value, catalog, EncodeOptions::default())
}

/// Encode a value to a string with explicit options.
pub fn to_string_with<C: TypeCatalog>(
    value: &Value,
    catalog: C,
    options: EncodeOptions,
) -> Result<String> {
    Encoder::with_options(io::sink(), catalog, options).render(value)
}

fn quoted(text: &str) -> String {
    let mut out = String::new();
    write_escaped_string(text, &mut out);
    out
}

fn write_escaped_string(value: &str, out: &mut String) {
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            other => out.push(other),
        }
    }
    out.push('"');
}
