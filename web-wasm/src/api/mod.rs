//! リモートAPI連携

mod client;

pub use client::{load_assignments, load_events};
