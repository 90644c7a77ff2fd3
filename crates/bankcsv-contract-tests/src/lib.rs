#![warn(missing_docs)]
//! # bankcsv-contract-tests
//!
//! Test-only crate validating the frozen conversion response contract under
//! `contracts/` against its fixtures. All checks live in `tests/`.
