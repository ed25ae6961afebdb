pub mod app;
pub mod error;
pub mod mobility;
pub mod net;
pub mod propagation;
pub mod scenario;
pub mod sim;
pub mod stats;
pub mod trace;

pub use error::{Result, SimError};

#[cfg(test)]
mod test;
