//! Filesystem helpers for pydelta.
//!
//! Everything pydelta persists (annotated copies, the metrics store) is
//! written through [`atomic_write`] so a crash never leaves a half-written
//! file behind.

pub mod atomic;

pub use atomic::{atomic_write, atomic_write_file};
