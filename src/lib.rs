//! Trackmesh - procedural geometry for editable tracks swept along Catmull-Rom splines.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **math**: Primitives (Float3, Quaternion, Pose) and the Catmull-Rom basis
//! - **section**: Linear and circular cross-section profiles
//! - **mesh**: Grid meshes with fixed topology and mutable positions
//! - **track**: Node list, end-node rules, surface sampling, structural edits
//! - **rebuild**: Dirty-region mesh regeneration
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use trackmesh::{RebuildConfig, Track, TrackRebuilder};
//!
//! let mut track = Track::new();
//! let mut rebuilder = TrackRebuilder::new(RebuildConfig::default())?;
//! rebuilder.reset(&mut track, 4);
//! rebuilder.process_tick(&mut track)?;
//! ```
//!
//! For C/C#/Unity, link the cdylib and use `trk_*` FFI functions.

pub mod math;
pub mod mesh;
pub mod rebuild;
pub mod section;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use math::{Float3, Pose, Quaternion};
pub use mesh::{GridMesh, MeshError};
pub use rebuild::{RebuildConfig, TrackRebuilder};
pub use section::CrossSection;
pub use track::{NodeId, Track, TrackNode};
