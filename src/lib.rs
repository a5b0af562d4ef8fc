//! drum-queue library crate
//!
//! This module exposes internal types for integration testing.
//! The main binary is in main.rs.

#[macro_use]
extern crate log;

pub mod config;
pub mod constants;
pub mod control;
pub mod engine;
pub mod event;
pub mod library;
pub mod net;
pub mod pattern;
pub mod queue;
pub mod render;
pub mod sources;
pub mod stdin;
