// Library crate: exposes the headless tool for integration tests and scripting.
// GUI-specific modules (app, ui, canvas painting) remain in the binary crate.

pub mod command;
pub mod error;
pub mod i18n;
pub mod image_loader;
pub mod render;
pub mod session;
pub mod state;
