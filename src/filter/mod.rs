//! Filtering for the note list. Notes can be narrowed by a title search
//! and by a set of tags; the filter lives entirely in the list screen's
//! query string, so filtered views are linkable.

pub mod components;
pub mod models;
