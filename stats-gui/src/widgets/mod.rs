//! # Widgets Module
//!
//! Canvas programs that draw the stats charts.

pub mod bar_chart;
pub mod radar_chart;

use iced::Color;

/// Fill and outline color shared by both charts.
pub const STAT_COLOR: Color = Color { r: 0.53, g: 0.81, b: 0.92, a: 1.0 }; // Sky blue

/// Grid lines and axes.
pub const GRID_COLOR: Color = Color { r: 0.35, g: 0.35, b: 0.35, a: 1.0 };

pub const LABEL_COLOR: Color = Color { r: 0.85, g: 0.85, b: 0.85, a: 1.0 };
