// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire-name resolution: primitives, catalog types and the `ArrayOf` idiom.
//!
//! A wire name is either a primitive name, a catalog-registered type name,
//! or `ArrayOf<Name>` where the suffix itself resolves. Primitive element
//! names appear upper-cased after the prefix (`ArrayOfString` names a
//! sequence of `string`), so resolution tries the suffix verbatim before
//! lowering its first letter.

use crate::catalog::TypeCatalog;
use crate::descriptor::{TypeDescriptor, TypeKind};
use crate::primitive::PrimitiveKind;
use std::sync::Arc;

pub(crate) const ARRAY_OF_PREFIX: &str = "ArrayOf";

/// Resolve a wire name to a descriptor.
///
/// Catalog names win over primitives, and the verbatim `ArrayOf` suffix
/// wins over the lowered one. Returns `None` when nothing matches.
pub fn resolve<C: TypeCatalog>(catalog: &C, name: &str) -> Option<Arc<TypeDescriptor>> {
    if let Some(found) = lookup_flat(catalog, name) {
        return Some(found);
    }
    if let Some(suffix) = name.strip_prefix(ARRAY_OF_PREFIX) {
        if suffix.is_empty() {
            return None;
        }
        if let Some(element) = lookup_flat(catalog, suffix) {
            return Some(Arc::new(TypeDescriptor::sequence_of(element)));
        }
        let lowered = first_to_lower(suffix);
        if lowered != suffix {
            if let Some(element) = lookup_flat(catalog, &lowered) {
                log::debug!("resolved {name} via lowered element name {lowered}");
                return Some(Arc::new(TypeDescriptor::sequence_of(element)));
            }
        }
    }
    None
}

/// Look up a name without recursing into arrays.
fn lookup_flat<C: TypeCatalog>(catalog: &C, name: &str) -> Option<Arc<TypeDescriptor>> {
    if let Some(found) = catalog.lookup(name) {
        return Some(found);
    }
    if let Some(kind) = PrimitiveKind::from_wire_name(name) {
        return Some(Arc::new(TypeDescriptor::primitive(kind)));
    }
    // `ArrayOfAnyType` carries opaque elements; each must bring its own
    // discriminator.
    if name == "anyType" {
        return Some(Arc::new(TypeDescriptor::any()));
    }
    None
}

/// Compute the wire name the peer expects for a descriptor: the primitive
/// table for primitives, `ArrayOf` plus the upper-cased element name for
/// sequences, the descriptor's own name otherwise.
pub fn wire_name(descriptor: &TypeDescriptor) -> String {
    match &descriptor.kind {
        TypeKind::Primitive(kind) => kind.wire_name().to_owned(),
        TypeKind::Sequence(seq) => {
            format!(
                "{ARRAY_OF_PREFIX}{}",
                first_to_upper(&wire_name(&seq.element_type))
            )
        }
        _ => descriptor.name.clone(),
    }
}

/// Upper-case the first code point. Safe on empty and non-ASCII input; a
/// code point whose uppercase form is multi-character expands in place.
pub(crate) fn first_to_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first code point. Counterpart of [`first_to_upper`].
pub(crate) fn first_to_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
