//! Layout and selection engine for an interactive star map, plus the
//! terminal drawing pieces the `starmap` binary is built from.

pub mod bounds;
pub mod camera;
pub mod compare;
pub mod config;
pub mod layout;
pub mod loader;
pub mod model;
pub mod panel;
pub mod render;
pub mod scene;
pub mod selection;
pub mod view;
