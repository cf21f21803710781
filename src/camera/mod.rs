//! Child camera projection: view-projection matrices and screen-point rays
//! for center-on-target picking.

/// Perspective child camera and screen-space ray construction.
pub mod core;

pub use self::core::RigCamera;
