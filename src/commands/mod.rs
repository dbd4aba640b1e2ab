//! Command implementations for the Gyoshu CLI

pub mod check;
pub mod completions;
pub mod helpers;
pub mod install;
pub mod status;
pub mod version;
