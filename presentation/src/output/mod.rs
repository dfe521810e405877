//! Transcript formatting

pub mod console;
pub mod view;
