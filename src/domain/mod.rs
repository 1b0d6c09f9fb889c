// Domain layer: the person record, the ports the app depends on, and the two services built on them.

pub mod model;
pub mod ports;

pub mod services;
