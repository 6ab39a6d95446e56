mod ports;
mod services;

pub use ports::*;
pub use services::Service;
