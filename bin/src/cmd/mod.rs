//! CLI subcommand modules.
//!
//! This module contains the implementations for all intrinsic CLI subcommands.

pub(crate) mod models;
pub(crate) mod screen;
pub(crate) mod universe;
pub(crate) mod value;
