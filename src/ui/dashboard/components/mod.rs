//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod console;
pub mod footer;
pub mod frame;
pub mod logs;
