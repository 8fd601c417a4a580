//! Measurement queries for voxel fields.
//!
//! Thin, typed wrappers over the primitives a [`VoxelField`] engine
//! provides, plus a slice-based centre-of-gravity estimate.
//!
//! # Features
//!
//! - **Surface queries**: [`closest_surface_point`] and
//!   [`projected_surface_point`], returning an error instead of an
//!   unspecified point when the engine finds nothing
//! - **Bounds**: [`bounding_box`] and [`occupied_volume`]
//! - **Centre of gravity**: [`centre_of_gravity`] and
//!   [`centre_of_gravity_with`], tolerant of individual slice failures
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Example
//!
//! ```
//! use voxel_types::{DenseVoxelField, GridDimensions};
//! use voxel_measure::{bounding_box, centre_of_gravity_with, CentroidParams};
//! use nalgebra::Point3;
//!
//! // Solid cube of radius 2 around (4, 4, 4).
//! let field = DenseVoxelField::from_fn(GridDimensions::cube(8), 1.0, Point3::origin(), |p| {
//!     let d = (p - Point3::new(4.0, 4.0, 4.0)).abs();
//!     (d.x.max(d.y).max(d.z) - 2.0) as f32
//! })
//! .unwrap();
//!
//! let report = centre_of_gravity_with(&field, &CentroidParams::voxel_centered()).unwrap();
//! assert!((report.centre - Point3::new(4.0, 4.0, 4.0)).norm() < 1e-9);
//! assert!(report.is_complete());
//!
//! assert_eq!(bounding_box(&field).max, Point3::new(8.0, 8.0, 8.0));
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted through [`tracing`]; install a subscriber to see
//! skipped slices and empty queries.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod centroid;
mod error;
mod params;
mod surface;

pub use bounds::{bounding_box, occupied_volume};
pub use centroid::{CentroidReport, centre_of_gravity, centre_of_gravity_with};
pub use error::{MeasureError, MeasureResult};
pub use params::{CentroidParams, Interpolation};
pub use surface::{closest_surface_point, projected_surface_point};

pub use voxel_types::VoxelField;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
