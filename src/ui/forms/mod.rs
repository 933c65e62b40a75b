//! Form rendering
//!
//! - `field_renderer`: one bordered control per component kind
//! - `dynamic_form`: the scrolling row list built from the schema

mod dynamic_form;
mod field_renderer;

pub use dynamic_form::draw;
