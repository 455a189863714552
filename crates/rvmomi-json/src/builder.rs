// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for type descriptors.
//!
//! Used by the generated tables and by tests to assemble catalog entries.

use crate::descriptor::{
    EnumDescriptor, FieldDescriptor, StructDescriptor, TypeDescriptor,
};
use crate::primitive::PrimitiveKind;
use std::sync::Arc;

/// Builder for struct type descriptors.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    base: Option<Arc<TypeDescriptor>>,
    polymorphic: bool,
    fields: Vec<FieldDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a struct type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            polymorphic: false,
            fields: Vec::new(),
        }
    }

    /// Set the base type. Base fields precede own fields on the wire.
    pub fn extends(mut self, base: Arc<TypeDescriptor>) -> Self {
        self.base = Some(base);
        self
    }

    /// Mark this type as the head of an open hierarchy: positions declared
    /// with it hold any registered subtype.
    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }

    /// Add a required primitive field.
    pub fn field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let type_desc = Arc::new(TypeDescriptor::primitive(kind));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add an optional primitive field.
    pub fn optional_field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let type_desc = Arc::new(TypeDescriptor::primitive(kind));
        self.fields
            .push(FieldDescriptor::new(name, type_desc).optional());
        self
    }

    /// Add a required string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, PrimitiveKind::String)
    }

    /// Add a field with an explicit type descriptor.
    pub fn nested_field(mut self, name: impl Into<String>, nested: Arc<TypeDescriptor>) -> Self {
        self.fields.push(FieldDescriptor::new(name, nested));
        self
    }

    /// Add an optional field with an explicit type descriptor.
    pub fn optional_nested_field(
        mut self,
        name: impl Into<String>,
        nested: Arc<TypeDescriptor>,
    ) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, nested).optional());
        self
    }

    /// Add a sequence-of-primitive field.
    pub fn sequence_field(mut self, name: impl Into<String>, element_kind: PrimitiveKind) -> Self {
        let element = Arc::new(TypeDescriptor::primitive(element_kind));
        let type_desc = Arc::new(TypeDescriptor::sequence_of(element));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a sequence field with an explicit element type.
    pub fn sequence_of_field(
        mut self,
        name: impl Into<String>,
        element: Arc<TypeDescriptor>,
    ) -> Self {
        let type_desc = Arc::new(TypeDescriptor::sequence_of(element));
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add an opaque any-value field; the wire must carry a discriminator
    /// at this position.
    pub fn any_field(mut self, name: impl Into<String>) -> Self {
        self.fields
            .push(FieldDescriptor::new(name, Arc::new(TypeDescriptor::any())));
        self
    }

    /// Build the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::struct_type(
            self.name,
            StructDescriptor {
                base: self.base,
                polymorphic: self.polymorphic,
                fields: self.fields,
            },
        )
    }
}

/// Builder for string-valued enum descriptors.
#[derive(Debug)]
pub struct EnumBuilder {
    name: String,
    literals: Vec<String>,
}

impl EnumBuilder {
    /// Create a new enum builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            literals: Vec::new(),
        }
    }

    /// Add a literal.
    pub fn literal(mut self, literal: impl Into<String>) -> Self {
        self.literals.push(literal.into());
        self
    }

    /// Build the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::enum_type(self.name, EnumDescriptor::new(self.literals))
    }
}
