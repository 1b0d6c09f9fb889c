// Adapters layer: concrete implementations of the domain ports (storage, names, views) and the HTTP surface.

pub mod http;
pub mod names;
pub mod storage;
pub mod view;
