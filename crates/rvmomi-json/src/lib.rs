// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # rvmomi-json - discriminated-union JSON codec for the VMOMI object model
//!
//! The VMOMI (VMware Managed Object Model) schema defines thousands of data
//! types with deep inheritance; the vSphere JSON API carries type identity
//! inline inside each object via the reserved `_typeName` member and wraps
//! primitives at polymorphic positions in `_typeName`/`_value` envelopes.
//! This crate implements the bidirectional translation between that wire
//! form and a width-preserving dynamic value model, driven by a name-to-type
//! catalog populated from the generated tables.
//!
//! ## Quick Start
//!
//! ```rust
//! use rvmomi_json::{Decoder, Encoder, Registry, TypeCatalog, TypeDescriptorBuilder, Value};
//! use std::sync::Arc;
//!
//! fn main() -> rvmomi_json::Result<()> {
//!     // Register the generated types once at startup.
//!     let mut catalog = Registry::new();
//!     catalog.register(Arc::new(
//!         TypeDescriptorBuilder::new("OptionValue")
//!             .string_field("key")
//!             .any_field("value")
//!             .build(),
//!     ));
//!
//!     // `value` is a polymorphic position, so the wire names its type.
//!     let wire = r#"{"_typeName":"OptionValue","key":"option1",
//!                    "value":{"_typeName":"boolean","_value":true}}"#;
//!     let target = catalog.lookup("OptionValue").expect("registered");
//!     let value = Decoder::from_string(wire, &catalog).decode(&target)?;
//!     assert_eq!(
//!         value.as_struct().and_then(|s| s.get("value")).and_then(Value::as_bool),
//!         Some(true),
//!     );
//!
//!     // Encode it back, type names and all.
//!     let mut out = Vec::new();
//!     Encoder::new(&mut out, &catalog).encode(&value)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! struct object:       { "_typeName": "VirtualDisk", "key": 2000, ... }
//! primitive envelope:  { "_typeName": "short", "_value": 300 }
//! array envelope:      { "_typeName": "ArrayOfString", "_value": ["a", "b"] }
//! enum envelope:       { "_typeName": "SharesLevel", "_value": "normal" }
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Decoder`] | Discriminator-aware streaming decoder |
//! | [`Encoder`] | Discriminator-emitting encoder |
//! | [`TypeCatalog`] | Name-to-descriptor lookup, backed by [`Registry`] |
//! | [`TypeDescriptor`] | Runtime description of one registered type |
//! | [`Value`] | Width-preserving dynamic value tree |
//!
//! The catalog is read-only after startup and freely shareable across
//! codecs; decoders and encoders are per-document and hold no state beyond
//! the underlying tokenizer.

/// Fluent builders for type descriptors.
pub mod builder;
/// Name-to-descriptor catalog trait and its HashMap implementation.
pub mod catalog;
/// Runtime type descriptors (structs, sequences, enums, primitives).
pub mod descriptor;
mod error;
/// Discriminator-aware JSON wire layer (decoder, encoder, reserved members).
pub mod json;
/// VMOMI primitive kinds and their wire names.
pub mod primitive;
/// Wire-name resolution, including the `ArrayOf` idiom.
pub mod resolve;
/// Width-preserving dynamic values and timestamps.
pub mod value;

pub use builder::{EnumBuilder, TypeDescriptorBuilder};
pub use catalog::{Registry, TypeCatalog};
pub use descriptor::{
    EnumDescriptor, FieldDescriptor, SequenceDescriptor, StructDescriptor, TypeDescriptor,
    TypeKind,
};
pub use error::{Error, ErrorKind, Result};
pub use json::{
    to_string, to_string_with, Decoder, EncodeOptions, Encoder, TYPE_NAME_MEMBER, VALUE_MEMBER,
};
pub use primitive::PrimitiveKind;
pub use resolve::{resolve, wire_name};
pub use value::{EnumValue, StructValue, Timestamp, Value};
