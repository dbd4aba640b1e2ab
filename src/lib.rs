//! Gyoshu installer
//!
//! Installs the Gyoshu agents, commands and skills into a user's OpenCode
//! configuration directory. Entries this installer wrote are recorded in an
//! install-state file; only those are ever overwritten, so files a user
//! created or customized are left alone.
//!
//! Entry points:
//! - [`operations::InstallOperation`] runs one install over a [`manifest::Manifest`]
//! - [`operations::CheckOperation`] reports the state of each entry without writing
//! - [`plugin::Plugin`] runs the install when a host loads the plugin

pub mod config;
pub mod error;
pub mod hash;
pub mod installer;
pub mod manifest;
pub mod operations;
pub mod plugin;
pub mod state;
pub mod validation;

pub use config::InstallConfig;
pub use error::{GyoshuError, Result};
pub use manifest::Manifest;
pub use operations::{CheckOperation, CheckReport, InstallOperation, RunSummary};
