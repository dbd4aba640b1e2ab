//! High-level operations over a target root
//!
//! - [`InstallOperation`]: install or update every manifest entry and record
//!   ownership
//! - [`CheckOperation`]: read-only report of each entry's state
//!
//! Both take an explicit [`InstallConfig`](crate::config::InstallConfig) and
//! [`Manifest`](crate::manifest::Manifest).

pub mod check;
pub mod install;

pub use check::{CheckOperation, CheckReport, EntryCheck, EntryStatus};
pub use install::{InstallOperation, RunSummary};
