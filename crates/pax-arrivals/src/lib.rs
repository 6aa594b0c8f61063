//! `pax-arrivals` — per-minute passenger arrival curves.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                  |
//! |--------------------|-----------------------------------------------------------|
//! | [`model`]          | `ArrivalModel` trait (+ blanket impl for closures)        |
//! | [`uniform`]        | `UniformArrivals` — even spread up to boarding close      |
//! | [`split_gaussian`] | `SplitGaussianArrivals` — asymmetric bell around the peak |
//! | [`curve`]          | `CurveArrivals` — picks one of the above by `legacy_mode` |
//!
//! # Output convention
//!
//! Every model returns one count per minute of the arrival span.  Index 0 is
//! the minute `span` minutes before departure; the last index is the minute
//! just before departure.  The engine clips whatever it receives to that
//! shape, so third-party models need not be exact.

pub mod curve;
pub mod model;
pub mod split_gaussian;
pub mod uniform;

#[cfg(test)]
mod tests;

pub use curve::CurveArrivals;
pub use model::ArrivalModel;
pub use split_gaussian::SplitGaussianArrivals;
pub use uniform::UniformArrivals;
