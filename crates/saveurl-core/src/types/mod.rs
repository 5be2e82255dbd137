//! Core type definitions used across the SaveUrURL workspace.

pub mod id;

pub use id::*;
