//! Command-line front end: one-shot commands, interactive shell, rendering.
pub mod commands;
pub mod render;
pub mod shell;
