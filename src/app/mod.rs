// LogTriage - app/mod.rs
//
// Application layer: controller, workflows, session and view state.
// Dependencies: core layer, platform traits.
// Must NOT depend on: ui.

pub mod controller;
pub mod health;
pub mod lease;
pub mod state;
pub mod view;
