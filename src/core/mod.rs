// LogTriage - core/mod.rs
//
// Core logic layer: report model, markup assembly, renderers, export.
// Must NOT depend on: ui, platform, app, or any network/filesystem access.

pub mod disposition;
pub mod export;
pub mod markup;
pub mod model;
pub mod render;
