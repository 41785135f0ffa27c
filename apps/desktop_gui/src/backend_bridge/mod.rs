//! Worker thread that owns the backend client and answers UI commands.

pub mod commands;
pub mod runtime;
