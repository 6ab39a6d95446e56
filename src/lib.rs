//! Client for the student project desk.
//!
//! The crate is laid out in layers:
//!
//! - [`core`] holds configuration and the [`core::application::Application`] bundle.
//! - [`domain`] holds the platform model, the ports to the outside world, the
//!   authentication service and the per-screen view-models.
//! - [`outbound`] implements the ports: the HTTP gateway and the session slot.
//! - [`inbound`] drives the view-models from the command line and renders them.

pub mod core;
pub mod domain;
pub mod errors;
pub mod inbound;
pub mod outbound;
