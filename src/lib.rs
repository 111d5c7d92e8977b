//! City Weather Library
//!
//! Exposes the weather client, the description classifier, the view state and
//! the renderers for the binary and for integration tests.

pub mod advice;
pub mod app;
pub mod cli;
pub mod data;
pub mod logging;
pub mod lookup;
pub mod ui;
