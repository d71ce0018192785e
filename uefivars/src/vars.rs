// SPDX-License-Identifier: MIT OR Apache-2.0

//! UEFI variables of the running system.
//!
//! These functions forward to the [`SystemStore`] of the platform the crate
//! was built for: efivarfs at its default mount point on Linux, the NT
//! system environment calls on Windows. Use a store directly to pick another
//! efivarfs mount.

use crate::{Result, SystemStore, UefiVariable, VariableAttributes, VariableStore, VariableVendor};

/// Get the names and vendor GUIDs of all currently-set variables.
pub fn variables() -> Result<Vec<UefiVariable>> {
    SystemStore::default().variables()
}

/// Find a variable by name, under any vendor. See
/// [`VariableStore::variable_by_name`].
pub fn variable_by_name(name: &str, strict: bool) -> Result<UefiVariable> {
    SystemStore::default().variable_by_name(name, strict)
}

/// Find the variable `name` in the `vendor` namespace.
pub fn variable(name: &str, vendor: VariableVendor) -> Result<UefiVariable> {
    SystemStore::default().variable(name, vendor)
}

/// Get the attributes of a variable.
pub fn attributes(var: &UefiVariable) -> Result<VariableAttributes> {
    SystemStore::default().attributes(var)
}

/// Get the value of a variable.
pub fn raw(var: &UefiVariable) -> Result<Vec<u8>> {
    SystemStore::default().raw(var)
}

/// Get the value and attributes of a variable.
pub fn get(var: &UefiVariable) -> Result<(Vec<u8>, VariableAttributes)> {
    SystemStore::default().get(var)
}

/// Set the value of a variable. This can be used to create a new variable,
/// update an existing variable, or (when `value` is empty) delete a
/// variable.
pub fn set_raw(var: &UefiVariable, value: &[u8], attributes: VariableAttributes) -> Result {
    SystemStore::default().set_raw(var, value, attributes)
}
