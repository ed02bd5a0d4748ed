//! Domain utilities

pub mod rut;
pub mod serde;
