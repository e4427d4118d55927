//! Praat TextGrid parsing.
//!
//! Reads long-format TextGrid files into time-aligned interval tiers.
//! Point tiers are recognized and skipped; only interval tiers carry
//! annotations the corpus uses.

pub mod parser;

pub use parser::{Interval, IntervalTier, TextGrid};
