//! Command implementations for the appviewer CLI

pub mod show;
