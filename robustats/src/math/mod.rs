//! Numeric kernels over plain slices.

pub mod statistics;
