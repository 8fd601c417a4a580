//! Voxel field types for CortenForge.
//!
//! This crate defines the seam between the measurement utilities and a
//! voxel geometry engine, plus a small engine that implements it:
//!
//! - [`VoxelField`] - Primitives an engine exposes (surface queries, ray
//!   casts, properties, slice extraction)
//! - [`DenseVoxelField`] - Dense signed-distance grid implementing [`VoxelField`]
//! - [`GrayscaleSlice`] - Reusable raster for one Z slice
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`GridDimensions`] and [`VoxelCoord`] - Grid sizes and coordinates
//! - [`Ray`] and [`VoxelTraversal`] - DDA ray walking through a lattice
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**.
//!
//! # Sign Convention
//!
//! Field samples are signed distances: values `<= 0` are inside the shape,
//! positive values are outside.
//!
//! # Example
//!
//! ```
//! use voxel_types::{DenseVoxelField, GrayscaleSlice, GridDimensions, VoxelCoord, VoxelField};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut field = DenseVoxelField::new(GridDimensions::cube(4), 1.0, Point3::origin());
//! field.set(VoxelCoord::new(2, 2, 2), -1.0);
//!
//! // Cast a ray at the single occupied voxel.
//! let hit = field.raycast_to_surface(&Point3::new(2.5, 2.5, -1.0), &Vector3::z());
//! assert_eq!(hit, Some(Point3::new(2.5, 2.5, 2.0)));
//!
//! // Pull out the slice that contains it.
//! let dims = field.voxel_dimensions();
//! let mut slice = GrayscaleSlice::new(dims.x, dims.y);
//! field.slice(2, &mut slice).unwrap();
//! assert_eq!(slice.value(2, 2), Some(-1.0));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod coord;
mod dense;
mod error;
mod field;
mod raycast;
mod slice;

pub use bounds::Aabb;
pub use coord::{GridDimensions, VoxelCoord};
pub use dense::DenseVoxelField;
pub use error::{SliceError, VoxelError, VoxelResult};
pub use field::{FieldProperties, VoxelField};
pub use raycast::{Ray, VoxelTraversal};
pub use slice::GrayscaleSlice;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
