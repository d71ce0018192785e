// SPDX-License-Identifier: MIT OR Apache-2.0

//! The [`VariableStore`] trait implemented by every backend.

use crate::{Error, Result, UefiVariable, VariableAttributes, VariableVendor};

/// Access to the firmware variable store of the running system.
///
/// Each operating system exposes UEFI variables differently; every backend
/// implements this trait over its native mechanism.
pub trait VariableStore {
    /// Get the names and vendor GUIDs of all currently-set variables.
    fn variables(&self) -> Result<Vec<UefiVariable>>;

    /// Find a variable by name, under any vendor.
    ///
    /// If `strict` is set and more than one vendor defines `name`,
    /// [`Error::Ambiguous`] is returned. Otherwise the first match in the
    /// backend's listing order wins.
    fn variable_by_name(&self, name: &str, strict: bool) -> Result<UefiVariable> {
        let matches: Vec<_> = self
            .variables()?
            .into_iter()
            .filter(|var| var.name() == name)
            .collect();
        select_by_name(name, strict, matches)
    }

    /// Find the variable `name` in the `vendor` namespace.
    fn variable(&self, name: &str, vendor: VariableVendor) -> Result<UefiVariable>;

    /// Get the attributes of a variable.
    fn attributes(&self, var: &UefiVariable) -> Result<VariableAttributes>;

    /// Get the value of a variable.
    fn raw(&self, var: &UefiVariable) -> Result<Vec<u8>>;

    /// Set the value and attributes of a variable.
    ///
    /// This can be used to create a new variable, update an existing one,
    /// or, when `value` is empty, delete it.
    fn set_raw(&self, var: &UefiVariable, value: &[u8], attributes: VariableAttributes) -> Result;

    /// Get both the value and attributes of a variable.
    fn get(&self, var: &UefiVariable) -> Result<(Vec<u8>, VariableAttributes)> {
        Ok((self.raw(var)?, self.attributes(var)?))
    }
}

/// Pick the result of a lookup by name out of all variables carrying that
/// name.
pub(crate) fn select_by_name(
    name: &str,
    strict: bool,
    matches: Vec<UefiVariable>,
) -> Result<UefiVariable> {
    if strict && matches.len() > 1 {
        return Err(Error::Ambiguous {
            name: name.to_string(),
            count: matches.len(),
        });
    }
    matches.into_iter().next().ok_or_else(|| Error::NotFound {
        name: name.to_string(),
        vendor: None,
    })
}

/// The backend for the platform this crate was compiled for.
#[cfg(target_os = "linux")]
pub type SystemStore = crate::efivarfs::Efivarfs;

/// The backend for the platform this crate was compiled for.
#[cfg(windows)]
pub type SystemStore = crate::nt::NtVariableStore;

/// The backend for the platform this crate was compiled for.
#[cfg(not(any(target_os = "linux", windows)))]
pub type SystemStore = UnsupportedStore;

/// Backend for platforms without a known way to reach UEFI variables. Every
/// operation fails with [`Error::Unsupported`].
#[derive(Clone, Copy, Debug, Default)]
pub struct UnsupportedStore;

impl VariableStore for UnsupportedStore {
    fn variables(&self) -> Result<Vec<UefiVariable>> {
        Err(Error::Unsupported)
    }

    fn variable(&self, _name: &str, _vendor: VariableVendor) -> Result<UefiVariable> {
        Err(Error::Unsupported)
    }

    fn attributes(&self, _var: &UefiVariable) -> Result<VariableAttributes> {
        Err(Error::Unsupported)
    }

    fn raw(&self, _var: &UefiVariable) -> Result<Vec<u8>> {
        Err(Error::Unsupported)
    }

    fn set_raw(
        &self,
        _var: &UefiVariable,
        _value: &[u8],
        _attributes: VariableAttributes,
    ) -> Result {
        Err(Error::Unsupported)
    }
}
