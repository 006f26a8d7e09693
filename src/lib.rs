//! appviewer - show every cluster resource linked to an application

pub mod collector;
pub mod commands;
pub mod config;
pub mod k8s;
pub mod output;
pub mod utils;
