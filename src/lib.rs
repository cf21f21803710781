// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Free-roaming camera rig controller.
//!
//! Freecam turns pointer and touch input into a smoothed camera pose: a
//! pivot position, pitch/yaw look angles, and a zoom distance with the
//! camera sitting behind the pivot. Input only moves *targets*; a per-frame
//! follow step moves the *actual* pose toward them with curve-scaled,
//! non-overshooting speeds.
//!
//! # Key entry points
//!
//! - [`controller::FreeCamController`] - owns everything and runs the frame
//!   phases
//! - [`rig::CameraRig`] - target/actual state, snap and smooth setters
//! - [`input::GestureSource`] - mouse, touch and disabled gesture sources,
//!   selected by [`input::InputModeResolver`]
//! - [`scene::SceneQuery`] - ray-cast collaborator for center-on-target
//! - [`options::Options`] - TOML-backed tuning for every axis
//!
//! # Frame flow
//!
//! Events are folded into an [`input::DeviceTracker`]; once per frame its
//! snapshot is polled by the active gesture source, the resulting
//! [`input::GestureSignals`] update the rig targets, and in a later phase
//! [`rig::CameraRig::tween`] produces the [`rig::RigTransform`].

pub mod camera;
pub mod controller;
pub mod error;
pub mod input;
pub mod options;
pub mod replay;
pub mod rig;
pub mod scene;
pub mod util;

pub use controller::FreeCamController;
pub use error::FreeCamError;
pub use options::Options;
pub use rig::{CameraRig, RigState, RigTransform};
