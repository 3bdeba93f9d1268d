//! Bookmark Alpha: a visual bookmark manager core.
//!
//! The library owns the bookmark collection and everything derived from it:
//! filtered views, statistics, preview-image resolution and HTML/JSON
//! import/export. Rendering is left to whatever UI drives it through
//! [`rpc_handler`].

pub mod app;
pub mod database;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
