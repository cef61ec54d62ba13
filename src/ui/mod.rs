// LogTriage - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (view model, session), core (markup).
// Must NOT depend on: platform, direct I/O.

pub mod page;
pub mod theme;
