pub mod advisor;
pub mod controller;
pub mod gauge;
pub mod session;
pub mod sink;
pub mod state;
pub mod texts;
pub mod types;

pub use controller::*;
pub use types::*;
