//! Simulation harness: the hex program loader that sits outside the core's
//! architecturally-error-free boundary.

pub mod loader;
