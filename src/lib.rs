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
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Procedural holiday-tree scene engine driven by camera proximity.
//!
//! Evergreen generates every visual element of the tree (foliage, light
//! specks, ornaments, gift boxes, ribbons, snow, photo cards) as seeded
//! random placement populations, and recomputes one transform per instance
//! every frame from a single smoothed control signal. Moving the camera
//! closer than a proximity band bursts the tree apart; pulling it back
//! reassembles it. Photo cards additionally gather into a focus ring and
//! turn to face the viewer as the burst develops.
//!
//! # Key entry points
//!
//! - [`scene::TreeScene`] - owns the signal and every particle group, and
//!   exposes the per-frame [`scene::TreeScene::tick`]
//! - [`signal::ControlSignal`] - the smoothed explosion/collapse pair
//! - [`placement::ConeDistribution`] - the parameterized cone sampler
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything runs synchronously inside one tick: the scene samples the
//! camera distance, writes the [`signal::ControlSignal`] once, then each
//! [`group::ParticleGroup`] and the [`photo::PhotoFocus`] subsystem rewrite
//! their own outputs from a shared borrow of that signal. The crate never
//! rasterizes; a render collaborator consumes [`scene::SceneFrame`], and the
//! optional `gpu` feature uploads instance batches into wgpu buffers.

pub mod assets;
pub mod camera;
pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod group;
pub mod instancing;
pub mod options;
pub mod photo;
pub mod placement;
pub mod scene;
pub mod signal;
pub mod util;
