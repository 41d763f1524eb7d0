//! UI layer.
//!
//! Views paint into a backend-neutral command list and register hit nodes; the runtime turns
//! raw input into hover, click, scroll and drag/drop events against those nodes.

pub mod backend;
pub mod core;
