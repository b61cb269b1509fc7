//! Aggregation engine.
//!
//! Every view is a pure function of the [`RecordSet`](crate::records::RecordSet)
//! it is given: rankings and totals in `aggregate`, calendar series in
//! `trends`, two-way tables in `pivot`.

pub mod aggregate;
pub mod pivot;
pub mod trends;
pub mod types;
pub mod utility;
