//! Iso-Seq regression driver
//!
//! Facade over [`isoseq_regress_core`]. The `isoseq-regress` binary lives in
//! the `isoseq-regress-cli` crate.

pub use isoseq_regress_core::*;
