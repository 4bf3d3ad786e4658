//! Domain modules that sit between the MCP tools and the engine.
//!
//! - [`chart`]: picks the unit series a dashboard renders and labels them
//! - [`settings`]: validated, all-or-nothing application of tool parameters

pub mod chart;
pub mod settings;
