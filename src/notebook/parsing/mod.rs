//! Cell parsing utilities
//!
//! This module contains the text-level parsing applied to markdown cells:
//! rebuilding their rendered text and detecting heading markers.

pub(crate) mod heading;
pub(crate) mod source;
