// Library target exists for the integration tests; the binary entry point is
// main.rs. This re-declares the module tree so tests can import types via
// `daily3::layout::*` / `daily3::render::*`. Some code is only exercised
// through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

pub mod calendar;
pub mod habits;
pub mod layout;
pub mod render;
pub mod store;
pub mod theme;

mod config;
mod event;
mod location;
mod toggle;
