//! Utility functions for code generation, URL validation, and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`url_validator`] - Redirect target validation
//! - [`client_ip`] - Client address extraction from HTTP requests

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
