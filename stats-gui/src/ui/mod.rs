//! # UI Module
//!
//! This module contains the layout code for the Stat Radar application.

pub mod main_display;
