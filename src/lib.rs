//! cronplan library
//!
//! Cron schedule validation, previews and the interactive editor. The binary
//! is a thin CLI over these modules; they are public for testing.

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod exit_codes;
pub mod lock;
pub mod output;
pub mod preferences;
pub mod schedule;
