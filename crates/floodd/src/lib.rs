//! Flood dispatch daemon library - exposes modules for testing.

pub mod config;
pub mod ids;
pub mod ledger;
pub mod queue;
pub mod routes;
pub mod server;
pub mod service;
pub mod stack;
