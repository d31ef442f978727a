//! Utility functions

pub mod atomic;

pub use atomic::persist;
