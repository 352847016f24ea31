//! tvfinder - Search the TVMaze catalog and browse show details
//!
//! The library holds the model, the pure screen renderers and the controller
//! that drives catalog requests. The binary owns the terminal.

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod view;
