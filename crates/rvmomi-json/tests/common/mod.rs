// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Shared fixtures: a sample VMOMI catalog standing in for the generated
// tables, plus a semantic JSON-equality assertion.

use rvmomi_json::{
    EnumBuilder, PrimitiveKind, Registry, TypeCatalog, TypeDescriptor, TypeDescriptorBuilder,
};
use std::collections::BTreeMap;
use std::sync::Arc;

fn register(registry: &mut Registry, descriptor: TypeDescriptor) -> Arc<TypeDescriptor> {
    let descriptor = Arc::new(descriptor);
    registry.register(descriptor.clone());
    descriptor
}

/// Build a catalog covering the types the wire fixtures use: the
/// `OptionValue` envelope carrier, managed object references, the cluster
/// recommendation wrapper, and a reduced virtual-machine config hierarchy.
pub fn sample_catalog() -> Registry {
    let mut registry = Registry::new();

    let mor = register(
        &mut registry,
        TypeDescriptorBuilder::new("ManagedObjectReference")
            .string_field("type")
            .string_field("value")
            .build(),
    );

    register(
        &mut registry,
        EnumBuilder::new("CustomizationNetBIOSMode")
            .literal("autoDetect")
            .literal("enableNetBIOS")
            .literal("disableNetBIOS")
            .build(),
    );

    let shares_level = register(
        &mut registry,
        EnumBuilder::new("SharesLevel")
            .literal("low")
            .literal("normal")
            .literal("high")
            .literal("custom")
            .build(),
    );

    register(
        &mut registry,
        TypeDescriptorBuilder::new("OptionValue")
            .polymorphic()
            .string_field("key")
            .any_field("value")
            .build(),
    );

    register(
        &mut registry,
        TypeDescriptorBuilder::new("ClusterHostRecommendation")
            .nested_field("host", mor.clone())
            .field("rating", PrimitiveKind::I32)
            .build(),
    );

    let shares_info = register(
        &mut registry,
        TypeDescriptorBuilder::new("SharesInfo")
            .field("shares", PrimitiveKind::I32)
            .nested_field("level", shares_level)
            .build(),
    );

    let description = register(
        &mut registry,
        TypeDescriptorBuilder::new("Description")
            .string_field("label")
            .string_field("summary")
            .build(),
    );

    // Device backing hierarchy.
    let backing_base = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDeviceBackingInfo")
            .polymorphic()
            .build(),
    );
    let device_backing = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDeviceDeviceBackingInfo")
            .extends(backing_base.clone())
            .polymorphic()
            .string_field("deviceName")
            .optional_field("useAutoDetect", PrimitiveKind::Bool)
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualEthernetCardNetworkBackingInfo")
            .extends(device_backing.clone())
            .optional_nested_field("network", mor.clone())
            .build(),
    );
    let file_backing = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDeviceFileBackingInfo")
            .extends(backing_base.clone())
            .polymorphic()
            .string_field("fileName")
            .optional_nested_field("datastore", mor.clone())
            .string_field("backingObjectId")
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDiskFlatVer2BackingInfo")
            .extends(file_backing)
            .string_field("diskMode")
            .optional_field("thinProvisioned", PrimitiveKind::Bool)
            .string_field("uuid")
            .string_field("contentId")
            .string_field("sharing")
            .build(),
    );
    let remote_backing = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDeviceRemoteDeviceBackingInfo")
            .extends(backing_base.clone())
            .polymorphic()
            .optional_field("useAutoDetect", PrimitiveKind::Bool)
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualCdromRemotePassthroughBackingInfo")
            .extends(remote_backing)
            .build(),
    );

    let connect_info = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDeviceConnectInfo")
            .optional_field("migrateConnect", PrimitiveKind::String)
            .optional_field("startConnected", PrimitiveKind::Bool)
            .field("allowGuestControl", PrimitiveKind::Bool)
            .string_field("status")
            .build(),
    );

    // Device hierarchy.
    let device = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDevice")
            .polymorphic()
            .field("key", PrimitiveKind::I32)
            .optional_nested_field("deviceInfo", description.clone())
            .optional_nested_field("backing", backing_base.clone())
            .optional_nested_field("connectable", connect_info)
            .optional_field("controllerKey", PrimitiveKind::I32)
            .optional_field("unitNumber", PrimitiveKind::I32)
            .build(),
    );
    let controller = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualController")
            .extends(device.clone())
            .polymorphic()
            .field("busNumber", PrimitiveKind::I32)
            .sequence_field("device", PrimitiveKind::I32)
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualIDEController")
            .extends(controller.clone())
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualPCIController")
            .extends(controller.clone())
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualKeyboard")
            .extends(device.clone())
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualMachineVideoCard")
            .extends(device.clone())
            .field("videoRamSizeInKB", PrimitiveKind::I64)
            .field("numDisplays", PrimitiveKind::I32)
            .optional_field("useAutoDetect", PrimitiveKind::Bool)
            .optional_field("enable3DSupport", PrimitiveKind::Bool)
            .string_field("use3dRenderer")
            .field("graphicsMemorySizeInKB", PrimitiveKind::I64)
            .build(),
    );
    let scsi_controller = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualSCSIController")
            .extends(controller.clone())
            .polymorphic()
            .optional_field("hotAddRemove", PrimitiveKind::Bool)
            .string_field("sharedBus")
            .field("scsiCtlrUnitNumber", PrimitiveKind::I32)
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("ParaVirtualSCSIController")
            .extends(scsi_controller)
            .build(),
    );
    let sata_controller = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualSATAController")
            .extends(controller.clone())
            .polymorphic()
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualAHCIController")
            .extends(sata_controller)
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualCdrom")
            .extends(device.clone())
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualDisk")
            .extends(device.clone())
            .field("capacityInKB", PrimitiveKind::I64)
            .field("capacityInBytes", PrimitiveKind::I64)
            .optional_nested_field("shares", shares_info.clone())
            .string_field("diskObjectId")
            .optional_field("nativeUnmanagedLinkedClone", PrimitiveKind::Bool)
            .build(),
    );
    let ethernet = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualEthernetCard")
            .extends(device.clone())
            .polymorphic()
            .string_field("addressType")
            .string_field("macAddress")
            .optional_field("wakeOnLanEnabled", PrimitiveKind::Bool)
            .optional_field("uptCompatibilityEnabled", PrimitiveKind::Bool)
            .build(),
    );
    let vmxnet = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualVmxnet")
            .extends(ethernet)
            .polymorphic()
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualVmxnet3")
            .extends(vmxnet)
            .optional_field("uptv2Enabled", PrimitiveKind::Bool)
            .build(),
    );
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualUSBXHCIController")
            .extends(controller.clone())
            .optional_field("autoConnectDevices", PrimitiveKind::Bool)
            .build(),
    );

    // Config info and its closed satellites.
    let file_info = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualMachineFileInfo")
            .string_field("vmPathName")
            .string_field("snapshotDirectory")
            .string_field("suspendDirectory")
            .string_field("logDirectory")
            .build(),
    );
    let tools = register(
        &mut registry,
        TypeDescriptorBuilder::new("ToolsConfigInfo")
            .field("toolsVersion", PrimitiveKind::I32)
            .optional_field("afterPowerOn", PrimitiveKind::Bool)
            .optional_field("afterResume", PrimitiveKind::Bool)
            .optional_field("beforeGuestStandby", PrimitiveKind::Bool)
            .optional_field("beforeGuestShutdown", PrimitiveKind::Bool)
            .optional_field("beforeGuestReboot", PrimitiveKind::Bool)
            .string_field("toolsUpgradePolicy")
            .optional_field("syncTimeWithHostAllowed", PrimitiveKind::Bool)
            .optional_field("syncTimeWithHost", PrimitiveKind::Bool)
            .build(),
    );
    let hardware = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualHardware")
            .field("numCPU", PrimitiveKind::I32)
            .field("numCoresPerSocket", PrimitiveKind::I32)
            .optional_field("autoCoresPerSocket", PrimitiveKind::Bool)
            .field("memoryMB", PrimitiveKind::I32)
            .optional_field("virtualICH7MPresent", PrimitiveKind::Bool)
            .optional_field("virtualSMCPresent", PrimitiveKind::Bool)
            .sequence_of_field("device", device.clone())
            .string_field("motherboardLayout")
            .field("simultaneousThreads", PrimitiveKind::I32)
            .build(),
    );
    let resource_allocation = register(
        &mut registry,
        TypeDescriptorBuilder::new("ResourceAllocationInfo")
            .optional_field("reservation", PrimitiveKind::I64)
            .optional_field("expandableReservation", PrimitiveKind::Bool)
            .optional_field("limit", PrimitiveKind::I64)
            .optional_nested_field("shares", shares_info)
            .build(),
    );
    let boot_options = register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualMachineBootOptions")
            .optional_field("enterBIOSSetup", PrimitiveKind::Bool)
            .optional_field("efiSecureBootEnabled", PrimitiveKind::Bool)
            .field("bootDelay", PrimitiveKind::I64)
            .optional_field("bootRetryEnabled", PrimitiveKind::Bool)
            .field("bootRetryDelay", PrimitiveKind::I64)
            .string_field("networkBootProtocol")
            .build(),
    );

    let option_value = registry.lookup("OptionValue").expect("registered above");
    register(
        &mut registry,
        TypeDescriptorBuilder::new("VirtualMachineConfigInfo")
            .string_field("changeVersion")
            .field("modified", PrimitiveKind::DateTime)
            .string_field("name")
            .string_field("guestFullName")
            .string_field("version")
            .string_field("uuid")
            .optional_field("createDate", PrimitiveKind::DateTime)
            .optional_field("npivTemporaryDisabled", PrimitiveKind::Bool)
            .field("template", PrimitiveKind::Bool)
            .string_field("guestId")
            .string_field("annotation")
            .nested_field("files", file_info)
            .optional_nested_field("tools", tools)
            .nested_field("hardware", hardware)
            .optional_nested_field("cpuAllocation", resource_allocation)
            .sequence_of_field("extraConfig", option_value)
            .string_field("swapPlacement")
            .optional_nested_field("bootOptions", boot_options)
            .string_field("firmware")
            .field("maxMksConnections", PrimitiveKind::I32)
            .optional_field("vmxConfigChecksum", PrimitiveKind::Binary)
            .string_field("migrateEncryption")
            .build(),
    );

    registry
}

/// A parsed JSON tree for semantic comparison: round-trip checks care about
/// JSON equivalence, not byte equality.
#[derive(Debug, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Array(Vec<JsonNode>),
    Object(BTreeMap<String, JsonNode>),
}

/// Assert two JSON documents are semantically equal (member order and
/// whitespace ignored).
pub fn assert_json_eq(expected: &str, actual: &str) {
    let expected_tree = parse_json(expected);
    let actual_tree = parse_json(actual);
    assert_eq!(
        expected_tree, actual_tree,
        "JSON documents differ\nexpected: {expected}\nactual: {actual}"
    );
}

pub fn parse_json(input: &str) -> JsonNode {
    let mut chars: Vec<char> = input.chars().collect();
    chars.push('\0');
    let mut pos = 0;
    let node = parse_node(&chars, &mut pos);
    skip_ws(&chars, &mut pos);
    assert_eq!(chars[pos], '\0', "trailing characters in {input}");
    node
}

fn skip_ws(chars: &[char], pos: &mut usize) {
    while chars[*pos].is_whitespace() {
        *pos += 1;
    }
}

fn parse_node(chars: &[char], pos: &mut usize) -> JsonNode {
    skip_ws(chars, pos);
    match chars[*pos] {
        '{' => {
            *pos += 1;
            let mut map = BTreeMap::new();
            skip_ws(chars, pos);
            if chars[*pos] == '}' {
                *pos += 1;
                return JsonNode::Object(map);
            }
            loop {
                skip_ws(chars, pos);
                let key = parse_text(chars, pos);
                skip_ws(chars, pos);
                assert_eq!(chars[*pos], ':');
                *pos += 1;
                map.insert(key, parse_node(chars, pos));
                skip_ws(chars, pos);
                match chars[*pos] {
                    ',' => *pos += 1,
                    '}' => {
                        *pos += 1;
                        break;
                    }
                    other => panic!("unexpected {other:?} in object"),
                }
            }
            JsonNode::Object(map)
        }
        '[' => {
            *pos += 1;
            let mut items = Vec::new();
            skip_ws(chars, pos);
            if chars[*pos] == ']' {
                *pos += 1;
                return JsonNode::Array(items);
            }
            loop {
                items.push(parse_node(chars, pos));
                skip_ws(chars, pos);
                match chars[*pos] {
                    ',' => *pos += 1,
                    ']' => {
                        *pos += 1;
                        break;
                    }
                    other => panic!("unexpected {other:?} in array"),
                }
            }
            JsonNode::Array(items)
        }
        '"' => JsonNode::Text(parse_text(chars, pos)),
        't' => {
            expect_word(chars, pos, "true");
            JsonNode::Bool(true)
        }
        'f' => {
            expect_word(chars, pos, "false");
            JsonNode::Bool(false)
        }
        'n' => {
            expect_word(chars, pos, "null");
            JsonNode::Null
        }
        _ => {
            let start = *pos;
            while matches!(
                chars[*pos],
                '-' | '+' | '.' | 'e' | 'E' | '0'..='9'
            ) {
                *pos += 1;
            }
            let text: String = chars[start..*pos].iter().collect();
            JsonNode::Number(text.parse().unwrap_or_else(|_| panic!("bad number {text}")))
        }
    }
}

fn parse_text(chars: &[char], pos: &mut usize) -> String {
    assert_eq!(chars[*pos], '"');
    *pos += 1;
    let mut out = String::new();
    loop {
        match chars[*pos] {
            '"' => {
                *pos += 1;
                return out;
            }
            '\\' => {
                *pos += 1;
                match chars[*pos] {
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    '/' => out.push('/'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'b' => out.push('\u{0008}'),
                    'f' => out.push('\u{000C}'),
                    'u' => {
                        let hex: String = chars[*pos + 1..*pos + 5].iter().collect();
                        let code = u32::from_str_radix(&hex, 16).expect("hex escape");
                        out.push(char::from_u32(code).expect("code point"));
                        *pos += 4;
                    }
                    other => panic!("unexpected escape {other:?}"),
                }
                *pos += 1;
            }
            '\0' => panic!("unterminated string"),
            ch => {
                out.push(ch);
                *pos += 1;
            }
        }
    }
}

fn expect_word(chars: &[char], pos: &mut usize, word: &str) {
    for expected in word.chars() {
        assert_eq!(chars[*pos], expected);
        *pos += 1;
    }
}
