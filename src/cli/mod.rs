//! Command implementations behind the `pipit` binary
//!
//! Both modes feed names into the same [`Installer`](crate::Installer); they
//! differ only in where the names come from.

pub mod install;
pub mod interactive;
