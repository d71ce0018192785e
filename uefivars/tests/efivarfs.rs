// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise the efivarfs backend against a scratch directory laid out like
//! an efivarfs mount.

#![cfg(target_os = "linux")]

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use uefivars::efivarfs::Efivarfs;
use uefivars::{guid, Error, Guid, UefiVariable, VariableAttributes, VariableStore, VariableVendor};

const TEST_VENDOR: Guid = guid!("9baf21cf-e187-497e-ae77-5bd8b0e09703");

fn write_var(root: &Path, file_name: &str, attributes: u32, value: &[u8]) {
    let mut data = attributes.to_le_bytes().to_vec();
    data.extend_from_slice(value);
    fs::write(root.join(file_name), data).unwrap();
}

/// A scratch mount with a handful of variables, two of which share a name.
fn scratch() -> (TempDir, Efivarfs) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write_var(root, "BootOrder-8be4df61-93ca-11d2-aa0d-00e098032b8c", 0x7, &[1, 0, 0, 0]);
    write_var(root, "Timeout-8be4df61-93ca-11d2-aa0d-00e098032b8c", 0x7, &[5, 0]);
    write_var(root, "Timeout-9baf21cf-e187-497e-ae77-5bd8b0e09703", 0x6, b"vendor");
    fs::write(root.join("Short-8be4df61-93ca-11d2-aa0d-00e098032b8c"), [7, 0]).unwrap();
    fs::write(root.join("README"), "not a variable").unwrap();
    let fs = Efivarfs::with_root(root);
    (dir, fs)
}

#[test]
fn list_variables() {
    let (_dir, fs) = scratch();
    let names: Vec<_> = fs
        .variables()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        names,
        [
            "BootOrder-8be4df61-93ca-11d2-aa0d-00e098032b8c",
            "Short-8be4df61-93ca-11d2-aa0d-00e098032b8c",
            "Timeout-8be4df61-93ca-11d2-aa0d-00e098032b8c",
            "Timeout-9baf21cf-e187-497e-ae77-5bd8b0e09703",
        ]
    );
}

#[test]
fn list_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let fs = Efivarfs::with_root(dir.path().join("efivars"));
    assert!(!fs.is_present());
    assert!(matches!(fs.variables(), Err(Error::Io(_))));
}

#[test]
fn lookup_by_name() {
    let (_dir, fs) = scratch();

    let var = fs.variable_by_name("BootOrder", true).unwrap();
    assert_eq!(var.vendor(), VariableVendor::GLOBAL_VARIABLE);

    let var = fs.variable_by_name("Timeout", false).unwrap();
    assert_eq!(var.vendor(), VariableVendor::GLOBAL_VARIABLE);

    assert!(matches!(
        fs.variable_by_name("Timeout", true),
        Err(Error::Ambiguous { count: 2, .. })
    ));
    assert!(matches!(
        fs.variable_by_name("Boot", false),
        Err(Error::NotFound { vendor: None, .. })
    ));
    assert!(matches!(
        fs.variable_by_name("../Timeout", false),
        Err(Error::InvalidName(_))
    ));
}

#[test]
fn lookup_by_name_and_vendor() {
    let (_dir, fs) = scratch();

    let var = fs.variable("Timeout", VariableVendor(TEST_VENDOR)).unwrap();
    assert_eq!(var.name(), "Timeout");
    assert_eq!(var.vendor().0, TEST_VENDOR);

    assert!(matches!(
        fs.variable("BootOrder", VariableVendor(TEST_VENDOR)),
        Err(Error::NotFound { vendor: Some(v), .. }) if v == TEST_VENDOR
    ));
}

#[test]
fn read_value_and_attributes() {
    let (_dir, fs) = scratch();

    let var = fs
        .variable("Timeout", VariableVendor::GLOBAL_VARIABLE)
        .unwrap();
    assert_eq!(fs.raw(&var).unwrap(), [5, 0]);
    assert_eq!(
        fs.attributes(&var).unwrap(),
        VariableAttributes::NON_VOLATILE
            | VariableAttributes::BOOTSERVICE_ACCESS
            | VariableAttributes::RUNTIME_ACCESS
    );

    let (value, attributes) = fs
        .get(&UefiVariable::new("Timeout", TEST_VENDOR))
        .unwrap();
    assert_eq!(value, b"vendor");
    assert_eq!(
        attributes,
        VariableAttributes::BOOTSERVICE_ACCESS | VariableAttributes::RUNTIME_ACCESS
    );
}

#[test]
fn read_truncated_file() {
    let (_dir, fs) = scratch();
    let var = UefiVariable::new("Short", VariableVendor::GLOBAL_VARIABLE);
    assert!(matches!(fs.attributes(&var), Err(Error::Malformed(_))));
    assert!(matches!(fs.raw(&var), Err(Error::Malformed(_))));
}

#[test]
fn read_missing_variable() {
    let (_dir, fs) = scratch();
    let var = UefiVariable::new("Missing", VariableVendor::GLOBAL_VARIABLE);
    assert!(matches!(fs.raw(&var), Err(Error::NotFound { .. })));
    assert!(matches!(fs.attributes(&var), Err(Error::NotFound { .. })));
}

#[test]
fn write_new_variable() {
    let (dir, fs) = scratch();
    let var = UefiVariable::new("UefiVarsTestVar", TEST_VENDOR);
    let attrs = VariableAttributes::BOOTSERVICE_ACCESS | VariableAttributes::RUNTIME_ACCESS;

    fs.set_raw(&var, b"TestValue", attrs).unwrap();

    let on_disk = fs::read(
        dir.path()
            .join("UefiVarsTestVar-9baf21cf-e187-497e-ae77-5bd8b0e09703"),
    )
    .unwrap();
    assert_eq!(on_disk, b"\x06\0\0\0TestValue");
    assert_eq!(fs.get(&var).unwrap(), (b"TestValue".to_vec(), attrs));
    assert!(fs.variables().unwrap().iter().any(|v| v.same_key(&var)));
}

#[test]
fn overwrite_existing_variable() {
    let (_dir, fs) = scratch();
    let var = UefiVariable::new("BootOrder", VariableVendor::GLOBAL_VARIABLE);
    let attrs = VariableAttributes::NON_VOLATILE
        | VariableAttributes::BOOTSERVICE_ACCESS
        | VariableAttributes::RUNTIME_ACCESS;

    fs.set_raw(&var, &[2, 0, 1, 0, 0, 0], attrs).unwrap();
    assert_eq!(fs.raw(&var).unwrap(), [2, 0, 1, 0, 0, 0]);
    assert_eq!(fs.attributes(&var).unwrap(), attrs);
}

#[test]
fn overwrite_with_shorter_value() {
    let (_dir, fs) = scratch();
    let var = UefiVariable::new("Timeout", TEST_VENDOR);
    let attrs = VariableAttributes::BOOTSERVICE_ACCESS | VariableAttributes::RUNTIME_ACCESS;

    fs.set_raw(&var, b"LongerValue", attrs).unwrap();
    fs.set_raw(&var, b"ab", attrs).unwrap();
    assert_eq!(fs.raw(&var).unwrap(), b"ab");
}

#[test]
fn write_empty_value_deletes() {
    let (dir, fs) = scratch();
    let var = UefiVariable::new("Timeout", TEST_VENDOR);

    fs.set_raw(&var, &[], VariableAttributes::empty()).unwrap();
    assert!(!dir
        .path()
        .join("Timeout-9baf21cf-e187-497e-ae77-5bd8b0e09703")
        .exists());
    assert!(matches!(
        fs.variable("Timeout", VariableVendor(TEST_VENDOR)),
        Err(Error::NotFound { .. })
    ));
    assert_eq!(
        fs.variable_by_name("Timeout", true).unwrap().vendor(),
        VariableVendor::GLOBAL_VARIABLE
    );

    // Deleting again is not an error.
    fs.set_raw(&var, &[], VariableAttributes::empty()).unwrap();
}

#[test]
fn write_rejects_bad_name() {
    let (_dir, fs) = scratch();
    let var = UefiVariable::new("a/b", VariableVendor::GLOBAL_VARIABLE);
    assert!(matches!(
        fs.set_raw(&var, &[1], VariableAttributes::empty()),
        Err(Error::InvalidName(_))
    ));
}
