//! Minewatch - a terminal console for a mine-safety monitoring service
//!
//! The session store, API client and per-resource hooks are usable on their
//! own; the TUI and CLI front ends are built on them.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod error;
pub mod models;
pub mod resources;
pub mod startup;
pub mod terminal;
pub mod traits;
pub mod ui;
