// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use uefivars::Guid;

/// Inspect UEFI firmware variables.
#[derive(Debug, Parser)]
#[clap(name = "uefivartool")]
pub struct Opt {
    /// List variables.
    #[clap(short = 'l', long, action)]
    pub list: bool,

    /// Print the variable as a string.
    #[clap(long, action, conflicts_with = "int")]
    pub string: bool,

    /// Print the variable as an int.
    #[clap(long, action)]
    pub int: bool,

    /// The name of the variable.
    #[clap(long, action)]
    pub name: Option<String>,

    /// The guid of the variable.
    #[clap(long, action, value_parser = parse_guid, requires = "name")]
    pub guid: Option<Guid>,

    /// Directory where efivarfs is mounted (Linux only).
    #[clap(long, action)]
    pub efivarfs: Option<PathBuf>,

    /// Log more; repeat for even more.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What the options ask for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action<'a> {
    List,
    ByName(&'a str),
    ByNameAndGuid(&'a str, Guid),
    Usage,
}

/// How to print a variable's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueFormat {
    Raw,
    String,
    Int,
}

impl Opt {
    pub fn action(&self) -> Action<'_> {
        match (self.list, self.name.as_deref(), self.guid) {
            (true, _, _) => Action::List,
            (false, Some(name), Some(guid)) => Action::ByNameAndGuid(name, guid),
            (false, Some(name), None) => Action::ByName(name),
            (false, None, _) => Action::Usage,
        }
    }

    pub fn value_format(&self) -> ValueFormat {
        if self.string {
            ValueFormat::String
        } else if self.int {
            ValueFormat::Int
        } else {
            ValueFormat::Raw
        }
    }
}

fn parse_guid(s: &str) -> Result<Guid, String> {
    uefivars::guid::parse(s).map_err(|err| err.to_string())
}
