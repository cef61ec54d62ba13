// LogTriage - lib.rs
//
// Library entry point, exposing the controller, renderers and platform
// collaborators for the CLI host and for integration testing.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
