//! r2 terminal viewer
//!
//! Loads layered configuration and draws a spinning wireframe cube with the
//! `r2_math` transform pipeline and `r2_term` escape sequences.

pub mod config;
pub mod viewer;
