//! Vitrine engine crate.
//!
//! Geometry, frame timing and logger setup shared by the page runtime and
//! the studio binary. Nothing here knows about sections or reveals.

pub mod coords;
pub mod logging;
pub mod time;
