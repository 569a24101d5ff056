//! Adapter implementations for tag ports.

pub mod memory;
