pub(crate) mod color;
pub(crate) mod core;
pub(crate) mod error;
pub mod math;
pub mod rng;
