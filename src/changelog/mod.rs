//! Changelog rendering for release notes and skip detection.

pub mod render;

pub use render::{render, render_with_header, strip_release_header};
