#![warn(missing_docs)]
//! # bankcsv-benchmarks
//!
//! Test-only crate holding deterministic smoke benchmarks for the envelope
//! and response-interpretation pipeline. All checks live in `tests/`.
