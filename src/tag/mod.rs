//! Tag catalogue.
//!
//! Tags classify task effort (`work`, `health`, ...) and carry the default
//! per-sprint point capacity consumed by sprint health reporting.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
