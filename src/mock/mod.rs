//! Simulated status and metric generation.
//!
//! Every generator is a pure function of an explicit `now` instant (and an
//! injected RNG where randomness is involved), so handlers stay stateless and
//! tests can pin the clock.

mod feed;
mod models;
mod series;
mod status;

pub use feed::*;
pub use models::*;
pub use series::*;
pub use status::*;
