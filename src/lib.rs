#![doc = "usmap: choropleth map of U.S. states with a coordinated bar chart"]
pub mod classify;
pub mod cli;
pub mod commands;
mod common;
pub mod config;
pub mod data;
pub mod geom;
pub mod io;
pub mod pipeline;
pub mod render;

#[doc(inline)]
pub use classify::{make_color_scale, ColorScale};

#[doc(inline)]
pub use data::{join, AttributeRecord, AttributeTable, ExpressedAttribute, JoinedFeature, SpatialFeature};

#[doc(inline)]
pub use pipeline::{render, run, RenderOptions, Rendered, Sources};
