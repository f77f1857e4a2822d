//! Utility functions for decoding stored-procedure result documents.
//!
//! This module provides helper functions used across the application:
//!
//! - [`fragments`] - Reassembly of JSON documents split across result rows
//! - [`embedded_json`] - In-place expansion of JSON-encoded string fields

pub mod embedded_json;
pub mod fragments;
