//! parliament-ages library
//!
//! One-shot batch pipeline that fetches UK Parliament member data from the
//! MNIS API, normalizes it into per-member records, and aggregates member
//! ages into band histograms (per party and overall, per house) merged
//! with a reference UK population histogram into a chart document.

pub mod aggregate;
pub mod bands;
pub mod chart;
pub mod config;
pub mod error;
pub mod fetch;
pub mod member;
pub mod normalize;
pub mod pipeline;
pub mod store;

pub use error::{Error, Result};
