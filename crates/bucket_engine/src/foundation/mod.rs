//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types for per-instance transforms
//! - Arena keys and collections
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
