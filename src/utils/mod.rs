//! Utility modules.

pub mod date;
pub mod html;
