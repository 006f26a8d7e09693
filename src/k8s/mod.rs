//! Kubernetes operations

pub mod client;

pub use client::{KubeClient, ResourceLister};
