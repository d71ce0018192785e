// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ntdll` entry points for firmware environment values.

#![allow(non_snake_case)]

use winapi::shared::guiddef::GUID;
use winapi::shared::ntdef::{BOOLEAN, NTSTATUS, PVOID, ULONG, UNICODE_STRING};

#[link(name = "ntdll")]
extern "system" {
    pub fn RtlAdjustPrivilege(
        Privilege: ULONG,
        Enable: BOOLEAN,
        CurrentThread: BOOLEAN,
        Enabled: *mut BOOLEAN,
    ) -> NTSTATUS;

    pub fn NtEnumerateSystemEnvironmentValuesEx(
        InformationClass: ULONG,
        Buffer: PVOID,
        BufferLength: *mut ULONG,
    ) -> NTSTATUS;

    pub fn NtSetSystemEnvironmentValueEx(
        VariableName: *mut UNICODE_STRING,
        VendorGuid: *mut GUID,
        Value: PVOID,
        ValueLength: ULONG,
        Attributes: ULONG,
    ) -> NTSTATUS;
}
