//! Frontend-neutral UI primitives: geometry, ids, styles, paint commands, hit-testing and the
//! pointer runtime.

pub mod geom;
pub mod id;
pub mod input;
pub mod painter;
pub mod runtime;
pub mod style;
pub mod tree;
