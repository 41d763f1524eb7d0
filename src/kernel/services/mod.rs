//! IO boundary of the kernel.
//!
//! `ports` holds the block command/query traits views talk through, plus settings data;
//! `adapters` does the filesystem and tokio work and reports back through `AppMessage`.

pub mod adapters;
pub mod ports;
