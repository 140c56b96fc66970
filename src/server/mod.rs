//! Connection acceptance and worker lifecycle.

pub mod admission;
pub mod listener;

pub use admission::Admission;
pub use listener::Server;
