// SPDX-License-Identifier: MIT OR Apache-2.0

use super::status::{fill_buffer, nt_success, status_error, value_ptr};
use super::{decode, ffi};
use crate::{guid, Error, Result, UefiVariable, VariableAttributes, VariableStore, VariableVendor};
use core::ptr;
use log::debug;
use uefivars_raw::nt::{SE_SYSTEM_ENVIRONMENT_PRIVILEGE, VARIABLE_INFORMATION_VALUES};
use winapi::shared::guiddef::GUID;
use winapi::shared::ntdef::{BOOLEAN, UNICODE_STRING};

/// Variable store backed by the NT system environment value calls.
///
/// The calling process needs administrator rights; every operation enables
/// `SeSystemEnvironmentPrivilege` before touching the store.
#[derive(Clone, Copy, Debug, Default)]
pub struct NtVariableStore;

impl NtVariableStore {
    /// Create a handle to the system's variable store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Read the whole variable store into one buffer.
    fn enumerate(&self) -> Result<Vec<u8>> {
        enable_privilege()?;

        debug!("NtEnumerateSystemEnvironmentValuesEx");
        fill_buffer(|data, len| {
            let data = data.map_or(ptr::null_mut(), |data| data.as_mut_ptr().cast());
            unsafe {
                ffi::NtEnumerateSystemEnvironmentValuesEx(VARIABLE_INFORMATION_VALUES, data, len)
            }
        })
    }

    /// Find the stored copy of `var`, reusing the data it already carries.
    fn resolve(&self, var: &UefiVariable) -> Result<UefiVariable> {
        if var.cached_value().is_some() {
            Ok(var.clone())
        } else {
            self.variable(var.name(), var.vendor())
        }
    }
}

impl VariableStore for NtVariableStore {
    fn variables(&self) -> Result<Vec<UefiVariable>> {
        decode(&self.enumerate()?)
    }

    fn variable(&self, name: &str, vendor: VariableVendor) -> Result<UefiVariable> {
        self.variables()?
            .into_iter()
            .find(|var| var.name() == name && var.vendor() == vendor)
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
                vendor: Some(vendor.0),
            })
    }

    fn attributes(&self, var: &UefiVariable) -> Result<VariableAttributes> {
        Ok(self.resolve(var)?.cached_attributes().unwrap_or_default())
    }

    fn raw(&self, var: &UefiVariable) -> Result<Vec<u8>> {
        Ok(self
            .resolve(var)?
            .cached_value()
            .unwrap_or_default()
            .to_vec())
    }

    fn get(&self, var: &UefiVariable) -> Result<(Vec<u8>, VariableAttributes)> {
        let var = self.resolve(var)?;
        Ok((
            var.cached_value().unwrap_or_default().to_vec(),
            var.cached_attributes().unwrap_or_default(),
        ))
    }

    fn set_raw(&self, var: &UefiVariable, value: &[u8], attributes: VariableAttributes) -> Result {
        enable_privilege()?;

        // The length covers the NUL terminator.
        let mut name: Vec<u16> = var.name().encode_utf16().chain([0]).collect();
        let name_len = u16::try_from(name.len() * 2)
            .map_err(|_| Error::InvalidName(var.name().to_string()))?;
        let mut name = UNICODE_STRING {
            Length: name_len,
            MaximumLength: name_len,
            Buffer: name.as_mut_ptr(),
        };

        let (data1, data2, data3, data4) = guid::to_fields(&var.vendor().0);
        let mut vendor = GUID {
            Data1: data1,
            Data2: data2,
            Data3: data3,
            Data4: data4,
        };

        let data = value_ptr(value).cast_mut().cast();
        let len = u32::try_from(value.len()).map_err(|_| Error::UnsupportedLength(value.len()))?;

        let status = unsafe {
            ffi::NtSetSystemEnvironmentValueEx(&mut name, &mut vendor, data, len, attributes.bits())
        };
        debug!("NtSetSystemEnvironmentValueEx({var}): status {status:#x}");
        if nt_success(status) {
            Ok(())
        } else {
            Err(status_error(status))
        }
    }
}

/// Enable `SeSystemEnvironmentPrivilege` for the process.
fn enable_privilege() -> Result {
    let mut enabled: BOOLEAN = 0;
    let status =
        unsafe { ffi::RtlAdjustPrivilege(SE_SYSTEM_ENVIRONMENT_PRIVILEGE, 1, 0, &mut enabled) };
    if nt_success(status) {
        Ok(())
    } else {
        debug!("RtlAdjustPrivilege: status {status:#x}");
        Err(Error::PermissionDenied)
    }
}
