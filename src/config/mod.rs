//! Configuration module
//!
//! Settings loaded from the user's config file, including the column
//! names recognized for the default chronological sort.

pub mod config;
