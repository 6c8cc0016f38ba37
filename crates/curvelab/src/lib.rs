#![forbid(unsafe_code)]

//! # curvelab
//!
//! Terminal visualizer for conic transformations and parametric motion.
//!
//! The math lives in the `conics` crate. This crate draws it: a braille
//! plotter, two interactive tabs with a guide, and a small event loop that
//! drives them.
//!
//! ## Public Modules
//!
//! - [`app`] - Top-level model, tab routing and error box
//! - [`pages`] - The transform, motion and help tabs
//! - [`plot`] - Figures and the braille canvas
//! - [`form`] - Number fields, sliders and panel rows
//! - [`program`] - Event loop and the [`program::Simulator`] used by tests
//! - [`config`] / [`cli`] - Settings from TOML and the command line
//! - [`export`] - Headless `snapshot` and `sample`

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod key;
pub mod logging;
pub mod pages;
pub mod plot;
pub mod program;
pub mod theme;
