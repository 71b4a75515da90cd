//! Locate the photo hole in frame overlays and turn it into real transparency.
//!
//! Frame overlays are images with a cut-out ("hole") where a photo shows
//! through. Some carry a real alpha channel; others fake it by painting the
//! hole with a white/grey checkerboard. This crate finds the hole under either
//! convention, reports its geometry, and can flood the checkerboard to
//! `(0, 0, 0, 0)` so the frame composites correctly.
//!
//! # Quick Start
//!
//! ```no_run
//! use frame_hole_matte::scan;
//!
//! let img = image::open("frame.png").unwrap().to_rgba8();
//! if let Some(found) = scan::locate_hole(&img) {
//!     let g = found.geometry;
//!     println!("center ({}, {}), radius {}", g.center_x, g.center_y, g.radius);
//! }
//! ```
//!
//! # Matting
//!
//! Matting starts from a caller-supplied seed inside the checkerboard and
//! grows over 4-connected neighbours.
//!
//! ```no_run
//! use frame_hole_matte::{flood_matte, SeedPoint};
//!
//! let mut img = image::open("frame.png").unwrap().to_rgba8();
//! let matte = flood_matte(&mut img, SeedPoint::new(540, 380)).expect("seed inside image");
//! println!("matted {} pixels", matte.pixels);
//! img.save("frame.png").unwrap();
//! ```

#![deny(missing_docs)]

pub mod classify;
pub mod config;
mod engine;
pub mod error;
pub mod geometry;
pub mod matte;
pub mod report;
pub mod scan;

pub use classify::ClassificationPolicy;
pub use config::{EngineConfig, SeedEntry};
pub use engine::{
    default_output_path, is_supported_image, probe_pixel, save_image, FrameEngine, FrameResult,
};
pub use error::{Error, Result};
pub use geometry::{BoundingBox, HoleGeometry};
pub use matte::{flood_matte, Matte, SeedPoint};
pub use scan::{locate_hole, HoleDetection};
