//! End-to-end lifecycle tests over real loopback connections

pub mod lifecycle;
