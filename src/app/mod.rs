// Application layer: wires config, adapters and services into the two entry points.

pub mod fixtures;
pub mod server;

pub use fixtures::load_fixtures;
pub use server::{build_state, serve};
