// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type descriptors for VMOMI data types.
//!
//! A [`TypeDescriptor`] is the codec's view of one registered type: enough
//! to allocate a value, enumerate fields with their declared types, detect
//! sequences, and decide whether a declared position is polymorphic. The
//! generated tables build descriptors once at startup and share them behind
//! `Arc`; the codec never mutates them.

use crate::primitive::PrimitiveKind;
use crate::value::{EnumValue, StructValue, Timestamp, Value};
use std::sync::Arc;
use time::OffsetDateTime;

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive type.
    Primitive(PrimitiveKind),
    /// Struct with named fields and an optional base type.
    Struct(StructDescriptor),
    /// Sequence (dynamic length).
    Sequence(SequenceDescriptor),
    /// String-valued enumeration.
    Enum(EnumDescriptor),
    /// Opaque any-value position; the wire must carry a discriminator.
    Any,
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Wire name of the type.
    pub name: String,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a primitive descriptor, named by its wire name.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.wire_name(), TypeKind::Primitive(kind))
    }

    /// Create a struct descriptor.
    pub fn struct_type(name: impl Into<String>, desc: StructDescriptor) -> Self {
        Self::new(name, TypeKind::Struct(desc))
    }

    /// Create a sequence descriptor. Sequences resolved through the
    /// `ArrayOf` idiom carry no name of their own; the resolver derives the
    /// wire name from the element type.
    pub fn sequence_of(element_type: Arc<TypeDescriptor>) -> Self {
        Self::new("", TypeKind::Sequence(SequenceDescriptor { element_type }))
    }

    /// Create a string-valued enum descriptor.
    pub fn enum_type(name: impl Into<String>, desc: EnumDescriptor) -> Self {
        Self::new(name, TypeKind::Enum(desc))
    }

    /// Create the opaque any-value descriptor.
    pub fn any() -> Self {
        Self::new("anyType", TypeKind::Any)
    }

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Check if this is a sequence type.
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, TypeKind::Sequence(_))
    }

    /// Get the primitive kind, if primitive.
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self.kind {
            TypeKind::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// Get the struct descriptor, if a struct.
    pub fn as_struct(&self) -> Option<&StructDescriptor> {
        match &self.kind {
            TypeKind::Struct(desc) => Some(desc),
            _ => None,
        }
    }

    /// Get the enum descriptor, if an enum.
    pub fn as_enum(&self) -> Option<&EnumDescriptor> {
        match &self.kind {
            TypeKind::Enum(desc) => Some(desc),
            _ => None,
        }
    }

    /// Get the element type, if a sequence.
    pub fn sequence_element(&self) -> Option<&Arc<TypeDescriptor>> {
        match &self.kind {
            TypeKind::Sequence(seq) => Some(&seq.element_type),
            _ => None,
        }
    }

    /// Whether a position declared with this type admits multiple concrete
    /// runtime types, requiring the wire discriminator: the opaque any
    /// value, a struct heading an open hierarchy, or a sequence of such
    /// elements.
    pub fn is_polymorphic(&self) -> bool {
        match &self.kind {
            TypeKind::Any => true,
            TypeKind::Struct(desc) => desc.polymorphic,
            TypeKind::Sequence(seq) => seq.element_type.is_polymorphic(),
            TypeKind::Primitive(_) | TypeKind::Enum(_) => false,
        }
    }

    /// Whether a single value at a position declared with this type must
    /// name its concrete type inline: the opaque any value or an open
    /// hierarchy head. Declared sequence positions are excluded; their
    /// shape is known and each element carries identity individually.
    pub fn is_open_position(&self) -> bool {
        match &self.kind {
            TypeKind::Any => true,
            TypeKind::Struct(desc) => desc.polymorphic,
            _ => false,
        }
    }

    /// Whether a value of this type may be stored where `target` is
    /// declared: same type, a base of this type, the any value, the
    /// `float` to `double` widening, or element-wise for sequences.
    pub fn assignable_to(&self, target: &TypeDescriptor) -> bool {
        if matches!(target.kind, TypeKind::Any) {
            return true;
        }
        match (&self.kind, &target.kind) {
            (TypeKind::Sequence(own), TypeKind::Sequence(other)) => {
                return own.element_type.assignable_to(&other.element_type);
            }
            (
                TypeKind::Primitive(PrimitiveKind::F32),
                TypeKind::Primitive(PrimitiveKind::F64),
            ) => return true,
            _ => {}
        }
        if !self.name.is_empty() && self.name == target.name {
            return true;
        }
        let mut current = self.as_struct().and_then(|s| s.base.as_ref());
        while let Some(base) = current {
            if base.name == target.name {
                return true;
            }
            current = base.as_struct().and_then(|s| s.base.as_ref());
        }
        false
    }

    /// The zero value of this type: what a wire `null` decodes to when the
    /// member is required rather than optional.
    pub fn zero_value(&self) -> Value {
        match &self.kind {
            TypeKind::Primitive(kind) => match kind {
                PrimitiveKind::Bool => Value::Bool(false),
                PrimitiveKind::U8 => Value::Byte(0),
                PrimitiveKind::I16 => Value::Short(0),
                PrimitiveKind::I32 => Value::Int(0),
                PrimitiveKind::I64 => Value::Long(0),
                PrimitiveKind::F32 => Value::Float(0.0),
                PrimitiveKind::F64 => Value::Double(0.0),
                PrimitiveKind::String => Value::String(String::new()),
                PrimitiveKind::Binary => Value::Binary(Vec::new()),
                PrimitiveKind::DateTime => {
                    Value::DateTime(Timestamp::from(OffsetDateTime::UNIX_EPOCH))
                }
            },
            TypeKind::Struct(_) => Value::Struct(StructValue::new(self.name.clone())),
            TypeKind::Sequence(_) => Value::Seq(Vec::new()),
            TypeKind::Enum(_) => Value::Enum(EnumValue::new(self.name.clone(), "")),
            TypeKind::Any => Value::Null,
        }
    }

    /// Fields declared by this struct and its base chain, base fields
    /// first, matching the serialization order of the object model.
    pub fn fields(&self) -> Vec<&FieldDescriptor> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldDescriptor>) {
        if let TypeKind::Struct(desc) = &self.kind {
            if let Some(base) = &desc.base {
                base.collect_fields(out);
            }
            out.extend(desc.fields.iter());
        }
    }

    /// Get a field by wire name, searching own fields before the base
    /// chain. Matching is case-sensitive and exact.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        let desc = self.as_struct()?;
        if let Some(field) = desc.fields.iter().find(|f| f.name == name) {
            return Some(field);
        }
        desc.base.as_ref().and_then(|base| base.field(name))
    }
}

/// Struct shape: base link, hierarchy marker, own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDescriptor {
    /// Base type in the inheritance chain, if any.
    pub base: Option<Arc<TypeDescriptor>>,
    /// True when this type heads an open hierarchy: positions declared
    /// with it hold any registered subtype, so decode must consult the
    /// discriminator and encode must emit it.
    pub polymorphic: bool,
    /// Fields declared by this type itself (base fields excluded).
    pub fields: Vec<FieldDescriptor>,
}

impl StructDescriptor {
    /// Create a closed struct shape with no base.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self {
            base: None,
            polymorphic: false,
            fields,
        }
    }
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Wire name of the member.
    pub name: String,
    /// Declared static type.
    pub type_desc: Arc<TypeDescriptor>,
    /// Optional members distinguish absent from zero and are omitted from
    /// output when absent.
    pub optional: bool,
}

impl FieldDescriptor {
    /// Create a required field descriptor.
    pub fn new(name: impl Into<String>, type_desc: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            type_desc,
            optional: false,
        }
    }

    /// Mark as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether decode must consult the discriminator at this position.
    pub fn is_polymorphic(&self) -> bool {
        self.type_desc.is_polymorphic()
    }
}

/// Sequence type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDescriptor {
    /// Element type.
    pub element_type: Arc<TypeDescriptor>,
}

/// String-valued enumeration descriptor.
///
/// VMOMI enums are open string types: the literal list documents the known
/// values, but decode accepts literals servers added later.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    /// Known literals.
    pub literals: Vec<String>,
}

impl EnumDescriptor {
    /// Create an enum descriptor from its known literals.
    pub fn new(literals: Vec<String>) -> Self {
        Self { literals }
    }

    /// Whether `literal` is a known value.
    pub fn has_literal(&self, literal: &str) -> bool {
        self.literals.iter().any(|l| l == literal)
    }
}
