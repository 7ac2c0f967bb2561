//! Report generation: HTML documents and JSON exports

pub mod html;
pub mod json;
