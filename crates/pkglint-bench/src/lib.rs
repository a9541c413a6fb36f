#![deny(clippy::all)]
#![warn(clippy::pedantic)]

//! Benchmark harness for pkglint.
//!
//! Run benchmarks with: `cargo bench -p pkglint-bench`
//!
//! Holds criterion benchmarks for export-map resolution and the
//! shipped-file walk.
