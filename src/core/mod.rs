//! Core functionality modules for pipit
//!
//! The installer drives a module probe and a package backend; both are
//! traits so the batch policy can be exercised without a real interpreter.

pub mod config;
pub mod installer;
pub mod pip;
pub mod python;
