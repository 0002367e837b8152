//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`agents`] - Write a starter AGENTS.md
//! - [`config`] - Codex config inspection (path, show, profiles, set-profile)
//! - [`doctor`] - Environment report
//! - [`install`] - Main command (wizard + installer pipeline)
//! - [`uninstall`] - Remove shell wiring and the notify hook

pub mod agents;
pub mod common;
pub mod config;
pub mod doctor;
pub mod install;
pub mod uninstall;
