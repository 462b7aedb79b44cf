//! # glowfield
//!
//! An interactive GPU particle field. Pointer motion paints a fading glow
//! trail onto a small CPU raster; every frame the raster is uploaded as a
//! texture and sampled in the vertex stage to displace and enlarge the
//! particles underneath the glow.
//!
//! ## Quick Start
//!
//! ```ignore
//! use glowfield::GlowField;
//!
//! fn main() {
//!     GlowField::new()
//!         .with_picture("assets/picture.png")
//!         .with_glow_stamp("assets/glow.png")
//!         .run()
//!         .unwrap();
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### The trail surface
//!
//! A fixed-resolution RGBA raster (128x128 by default). Each frame it is
//! overpainted with low-opacity black, then a glow stamp is composited at
//! the cursor position with an opacity proportional to cursor speed. A
//! stationary cursor paints nothing; motion leaves a tail that fades over a
//! few seconds.
//!
//! ### Cursor projection
//!
//! Pointer events become normalized device coordinates, are unprojected
//! through the camera into a world ray, and intersected with an invisible
//! plane covering the particle grid. Misses keep the previous cursor
//! position, so the trail never jumps.
//!
//! ### The particle field
//!
//! Particles sit on a static lattice and never move on the CPU. The vertex
//! stage samples the trail texture at each particle's coordinate and pushes
//! the particle toward the camera in proportion to the local glow, with a
//! per-particle scatter angle fixed at startup.

mod app;
pub mod camera;
pub mod error;
pub mod field;
pub mod frame;
mod gpu;
pub mod pointer;
pub mod raycast;
pub mod textures;
pub mod trail;
pub mod viewport;
pub mod visuals;

pub use app::GlowField;
pub use camera::Camera;
pub use error::{AppError, TextureError};
pub use field::{FieldConfig, ParticleField};
pub use frame::FrameState;
pub use glam::{Vec2, Vec3};
pub use pointer::PointerTracker;
pub use raycast::ReferencePlane;
pub use textures::TextureConfig;
pub use trail::{GlowStamp, TrailConfig, TrailSurface};
pub use viewport::Viewport;
pub use visuals::DisplacementParams;
