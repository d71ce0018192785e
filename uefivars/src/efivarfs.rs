// SPDX-License-Identifier: MIT OR Apache-2.0

//! Linux backend, built on the efivarfs pseudo-filesystem.
//!
//! Every variable is a file called `<Name>-<vendor guid>` in the efivarfs
//! mount. Its content is the 4-byte little-endian attribute word followed by
//! the value. The kernel marks most variable files immutable; the flag is
//! cleared before writing.
//!
//! On a real mount every write replaces the variable and an empty write
//! deletes it. A plain directory laid out like efivarfs gets the same
//! behaviour by truncating and removing files.

use crate::{
    Error, IoError, IoErrorContext, MalformedError, Result, UefiVariable, VariableAttributes,
    VariableStore, VariableVendor,
};
use log::{debug, warn};
use nix::libc::c_int;
use nix::sys::statfs::{statfs, FsType};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

/// Default mount point of efivarfs.
pub const EFIVARFS_ROOT: &str = "/sys/firmware/efi/efivars";

/// Size of the attribute word in front of each value.
const ATTRIBUTES_LEN: usize = 4;

/// Length of a textual GUID.
const GUID_LEN: usize = 36;

/// `FS_IMMUTABLE_FL` from `linux/fs.h`.
const FS_IMMUTABLE_FL: c_int = 0x10;

/// `EFIVARFS_MAGIC` from `linux/magic.h`.
const EFIVARFS_MAGIC: u32 = 0xde5e_81e4;

mod ioctl {
    use nix::libc::{c_int, FS_IOC_GETFLAGS, FS_IOC_SETFLAGS};

    // efivarfs reads and writes an `int`, whatever the request number says.
    nix::ioctl_read_bad!(get_flags, FS_IOC_GETFLAGS, c_int);
    nix::ioctl_write_ptr_bad!(set_flags, FS_IOC_SETFLAGS, c_int);
}

/// Variable store backed by an efivarfs mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Efivarfs {
    root: PathBuf,
}

impl Default for Efivarfs {
    fn default() -> Self {
        Self::with_root(EFIVARFS_ROOT)
    }
}

impl Efivarfs {
    /// Use efivarfs at its default mount point.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an efivarfs mount, or a directory laid out like one, at `root`.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the variable files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the mount point exists.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.root.is_dir()
    }

    /// Whether the root is an efivarfs mount rather than a plain directory.
    #[must_use]
    pub fn is_efivarfs(&self) -> bool {
        statfs(&self.root)
            .map(|stat| stat.filesystem_type() == FsType(EFIVARFS_MAGIC as _))
            .unwrap_or(false)
    }

    /// Path of the file backing `var`.
    ///
    /// Names that would escape the mount directory are rejected.
    pub fn path(&self, var: &UefiVariable) -> Result<PathBuf> {
        check_name(var.name())?;
        Ok(self.root.join(var.to_string()))
    }

    /// Open the file backing `var` for reading.
    fn open(&self, var: &UefiVariable) -> Result<(PathBuf, File)> {
        let path = self.path(var)?;
        match File::open(&path) {
            Ok(file) => Ok((path, file)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(Error::NotFound {
                name: var.name().to_string(),
                vendor: Some(var.vendor().0),
            }),
            Err(err) => Err(IoError::new(path, IoErrorContext::Open, err).into()),
        }
    }

    /// Read the attribute word and value of `var`.
    fn read(&self, var: &UefiVariable) -> Result<(Vec<u8>, VariableAttributes)> {
        let (path, mut file) = self.open(var)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|err| IoError::new(&path, IoErrorContext::Read, err))?;
        debug!("read {} bytes from {}", data.len(), path.display());

        let attributes = attributes_from(&data)?;
        let value = data.split_off(ATTRIBUTES_LEN);
        Ok((value, attributes))
    }
}

impl VariableStore for Efivarfs {
    fn variables(&self) -> Result<Vec<UefiVariable>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|err| IoError::new(&self.root, IoErrorContext::ReadDirectory, err))?;

        let mut variables = Vec::new();
        for entry in entries {
            let entry =
                entry.map_err(|err| IoError::new(&self.root, IoErrorContext::ReadDirectory, err))?;
            let file_name = entry.file_name();
            match file_name.to_str().and_then(parse_file_name) {
                Some(var) => variables.push(var),
                None => warn!("skipping unrecognized efivarfs entry {file_name:?}"),
            }
        }
        variables.sort_by_cached_key(ToString::to_string);
        Ok(variables)
    }

    fn variable_by_name(&self, name: &str, strict: bool) -> Result<UefiVariable> {
        check_name(name)?;
        let matches: Vec<_> = self
            .variables()?
            .into_iter()
            .filter(|var| var.name() == name)
            .collect();
        crate::store::select_by_name(name, strict, matches)
    }

    fn variable(&self, name: &str, vendor: VariableVendor) -> Result<UefiVariable> {
        let var = UefiVariable::new(name, vendor);
        self.open(&var)?;
        Ok(var)
    }

    fn attributes(&self, var: &UefiVariable) -> Result<VariableAttributes> {
        let (path, file) = self.open(var)?;
        let mut data = Vec::with_capacity(ATTRIBUTES_LEN);
        file.take(ATTRIBUTES_LEN as u64)
            .read_to_end(&mut data)
            .map_err(|err| IoError::new(path, IoErrorContext::Read, err))?;
        attributes_from(&data)
    }

    fn raw(&self, var: &UefiVariable) -> Result<Vec<u8>> {
        Ok(self.read(var)?.0)
    }

    fn get(&self, var: &UefiVariable) -> Result<(Vec<u8>, VariableAttributes)> {
        self.read(var)
    }

    fn set_raw(&self, var: &UefiVariable, value: &[u8], attributes: VariableAttributes) -> Result {
        let path = self.path(var)?;
        match File::open(&path) {
            Ok(file) => match clear_immutable(&file) {
                Ok(true) => debug!("cleared immutable flag on {}", path.display()),
                Ok(false) => {}
                Err(err) => warn!(
                    "cannot clear immutable flag on {}: {err}; continuing",
                    path.display()
                ),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("creating {}", path.display());
            }
            Err(err) => return Err(IoError::new(path, IoErrorContext::Open, err).into()),
        }

        let efivarfs = self.is_efivarfs();
        if value.is_empty() && !efivarfs {
            return match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("removed {}", path.display());
                    Ok(())
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(IoError::new(path, IoErrorContext::Remove, err).into()),
            };
        }

        // efivarfs takes the whole variable in a single write.
        let mut data = Vec::with_capacity(ATTRIBUTES_LEN + value.len());
        data.extend_from_slice(&attributes.to_le_bytes());
        data.extend_from_slice(value);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(!efivarfs)
            .open(&path)
            .map_err(|err| IoError::new(&path, IoErrorContext::Open, err))?;
        file.write_all(&data)
            .map_err(|err| IoError::new(&path, IoErrorContext::Write, err))?;
        debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}

/// Reject names that are empty or would escape the mount directory.
fn check_name(name: &str) -> Result {
    if name.is_empty() || name.contains(|c: char| c == '/' || c == '\0') {
        return Err(Error::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Split an efivarfs file name into variable name and vendor GUID.
///
/// The GUID is always the last 36 characters, so names may contain `-`.
fn parse_file_name(file_name: &str) -> Option<UefiVariable> {
    let split = file_name.len().checked_sub(GUID_LEN + 1)?;
    let name = file_name.get(..split)?;
    let guid = file_name.get(split + 1..)?;
    if name.is_empty() || file_name.as_bytes()[split] != b'-' {
        return None;
    }
    let guid = crate::guid::parse(guid).ok()?;
    Some(UefiVariable::new(name, guid))
}

fn attributes_from(data: &[u8]) -> Result<VariableAttributes> {
    let word = data
        .get(..ATTRIBUTES_LEN)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(MalformedError::new(data.len(), "missing attribute word"))?;
    Ok(VariableAttributes::from_le_bytes(word))
}

/// Drop the immutable flag the kernel puts on variable files.
///
/// Returns whether the flag was set. Callers log failures and go on with the
/// write, which reports the real error if the flag is still in place.
fn clear_immutable(file: &File) -> nix::Result<bool> {
    let fd = file.as_raw_fd();
    let mut flags: c_int = 0;
    unsafe { ioctl::get_flags(fd, &mut flags) }?;
    if flags & FS_IMMUTABLE_FL == 0 {
        return Ok(false);
    }

    flags &= !FS_IMMUTABLE_FL;
    unsafe { ioctl::set_flags(fd, &flags) }?;
    Ok(true)
}
