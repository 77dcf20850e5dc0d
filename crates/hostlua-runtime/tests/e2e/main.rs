//! End-to-end tests for the hostlua engine
//!
//! These tests register host objects with an `Engine`, run Lua scripts
//! against them and check the effects on the host side.

mod harness;
mod fixtures;
mod members;
mod methods;
mod lifetime;
mod files;
