//! JWT access-token support.

pub mod jwt;
