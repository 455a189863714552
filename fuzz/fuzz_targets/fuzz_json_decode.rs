// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use rvmomi_json::{Decoder, Registry, TypeCatalog, TypeDescriptor, TypeDescriptorBuilder};
use std::sync::Arc;

fn catalog() -> Registry {
    let mut registry = Registry::new();
    let mor = Arc::new(
        TypeDescriptorBuilder::new("ManagedObjectReference")
            .string_field("type")
            .string_field("value")
            .build(),
    );
    registry.register(mor.clone());
    registry.register(Arc::new(
        TypeDescriptorBuilder::new("OptionValue")
            .polymorphic()
            .string_field("key")
            .any_field("value")
            .nested_field("ref", mor)
            .build(),
    ));
    registry
}

fuzz_target!(|data: &[u8]| {
    let registry = catalog();

    // Opaque root: everything hinges on the discriminator.
    if let Ok(mut decoder) = Decoder::from_slice(data, &registry) {
        let _ = decoder.decode(&TypeDescriptor::any());
    }

    // Struct-directed root.
    let target = registry.lookup("OptionValue").expect("registered");
    if let Ok(mut decoder) = Decoder::from_slice(data, &registry) {
        let _ = decoder.decode(&target);
    }
});
