// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::variable::decode_utf16le;
use crate::{MalformedError, Result, UefiVariable, VariableVendor};
use uefivars_raw::nt::VariableNameAndValue;

const HEADER_SIZE: usize = VariableNameAndValue::SIZE;

/// Decode the buffer filled by `NtEnumerateSystemEnvironmentValuesEx` with
/// the [`VARIABLE_INFORMATION_VALUES`] class.
///
/// Every returned variable carries its attributes and value. An empty buffer
/// holds no variables.
///
/// [`VARIABLE_INFORMATION_VALUES`]: uefivars_raw::nt::VARIABLE_INFORMATION_VALUES
pub fn decode(buffer: &[u8]) -> Result<Vec<UefiVariable>> {
    let mut variables = Vec::new();
    if buffer.is_empty() {
        return Ok(variables);
    }

    let mut offset = 0;
    loop {
        let (variable, next) = decode_entry(buffer, offset)?;
        variables.push(variable);
        if next == 0 {
            break;
        }
        offset = offset
            .checked_add(next)
            .ok_or(MalformedError::new(offset, "next entry offset overflows"))?;
    }
    Ok(variables)
}

/// Decode the record at `offset`, returning it together with the relative
/// offset of the next record.
fn decode_entry(buffer: &[u8], offset: usize) -> Result<(UefiVariable, usize)> {
    let header: &[u8; HEADER_SIZE] = offset
        .checked_add(HEADER_SIZE)
        .and_then(|end| buffer.get(offset..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(MalformedError::new(offset, "truncated record header"))?;
    let header = VariableNameAndValue::from_bytes(header);

    let value_offset = header.value_offset as usize;
    if value_offset < HEADER_SIZE {
        return Err(MalformedError::new(offset, "value overlaps record header").into());
    }
    let value_start = offset
        .checked_add(value_offset)
        .ok_or(MalformedError::new(offset, "value offset overflows"))?;
    let name = buffer
        .get(offset + HEADER_SIZE..value_start)
        .ok_or(MalformedError::new(offset, "name runs past end of buffer"))?;
    if name.len() % 2 != 0 {
        return Err(
            MalformedError::new(offset + HEADER_SIZE, "odd length for a CHAR16 name").into(),
        );
    }
    let value = value_start
        .checked_add(header.value_length as usize)
        .and_then(|end| buffer.get(value_start..end))
        .ok_or(MalformedError::new(value_start, "value runs past end of buffer"))?;

    let variable = UefiVariable::new(decode_utf16le(name), VariableVendor(header.vendor_guid))
        .with_snapshot(header.attributes(), value);
    Ok((variable, header.next_entry_offset as usize))
}
