//! Loader for tab-delimited deck files.
//!
//! ```text
//! # comment lines start with '#'
//! Color	Number	Shape	Fill
//! purple	1	square	solid
//! green	2	square	solid
//! ```
//!
//! Files ending in `.gz` or `.bgz` are decompressed transparently.

pub mod deck;
