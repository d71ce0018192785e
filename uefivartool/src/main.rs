// SPDX-License-Identifier: MIT OR Apache-2.0

//! List and inspect UEFI variables of the running system.

mod logger;
mod opt;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser};
use itertools::Itertools;
use log::debug;
use opt::{Action, Opt, ValueFormat};
use uefivars::{
    decode_string, decode_uint, SystemStore, UefiVariable, VariableStore, VariableVendor,
};

fn list(store: &impl VariableStore) -> Result<()> {
    let vars = store.variables().context("failed to get all variables")?;
    debug!("found {} variables", vars.len());
    for var in vars {
        println!("Name: {} Guid: {}", var.name(), var.vendor());
    }
    Ok(())
}

/// Render a value the way `format` asks for.
fn format_value(value: &[u8], format: ValueFormat) -> Result<String> {
    Ok(match format {
        ValueFormat::String => decode_string(value),
        ValueFormat::Int => format!("{:x}", decode_uint(value)?),
        ValueFormat::Raw => format!("[{}]", value.iter().join(" ")),
    })
}

fn print_var(store: &impl VariableStore, var: &UefiVariable, format: ValueFormat) -> Result<()> {
    let (value, attributes) = store
        .get(var)
        .with_context(|| format!("failed to get data of {var}"))?;
    println!(
        "Name: {} Guid: {} Attributes: {:x}",
        var.name(),
        var.vendor(),
        attributes.bits()
    );
    println!("Value: {}", format_value(&value, format)?);
    Ok(())
}

#[cfg(target_os = "linux")]
fn system_store(opt: &Opt) -> SystemStore {
    let store = match &opt.efivarfs {
        Some(root) => uefivars::efivarfs::Efivarfs::with_root(root),
        None => SystemStore::default(),
    };
    if !store.is_present() {
        log::warn!("efivarfs is not mounted at {}", store.root().display());
    }
    store
}

#[cfg(not(target_os = "linux"))]
fn system_store(opt: &Opt) -> SystemStore {
    if opt.efivarfs.is_some() {
        log::warn!("--efivarfs is only used on Linux");
    }
    SystemStore::default()
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    logger::init(opt.verbose).map_err(|err| anyhow!("{err}"))?;
    let store = system_store(&opt);

    match opt.action() {
        Action::List => list(&store),
        Action::ByName(name) => {
            let var = store
                .variable_by_name(name, false)
                .with_context(|| format!("failed to get variable {name}"))?;
            print_var(&store, &var, opt.value_format())
        }
        Action::ByNameAndGuid(name, guid) => {
            let var = store
                .variable(name, VariableVendor(guid))
                .with_context(|| format!("failed to get variable {name}-{guid}"))?;
            print_var(&store, &var, opt.value_format())
        }
        Action::Usage => {
            Opt::command().print_help()?;
            Ok(())
        }
    }
}
