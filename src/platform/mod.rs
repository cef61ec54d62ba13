// LogTriage - platform/mod.rs
//
// Platform abstraction layer: configuration, network and filesystem
// collaborators behind traits the app layer can substitute.
// Must NOT depend on: core rendering, app, ui.

pub mod config;
pub mod http;
pub mod save;
