mod models;
mod ports;

pub use models::*;
pub use ports::*;
