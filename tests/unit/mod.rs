//! Configuration tests for cnc-motion.
//!
//! Parsing and validation of machine configuration files.

mod config_parsing;
mod config_validation;
