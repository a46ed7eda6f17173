// Library root for the league statistics engine.
//
// Every module here is a pure transformation over explicit inputs: raw
// records in, derived statistics out. Fetching and exporting live in the
// app crate.

pub mod analysis;
pub mod career;
pub mod combine;
pub mod error;
pub mod extrema;
pub mod identity;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod rolling;
pub mod season;

pub use error::StatsError;
