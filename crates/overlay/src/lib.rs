//! Screen-space HUD overlay for hudkit
//!
//! This crate lays out pixel-precise HUD elements and hands them to a host
//! renderer as screen-locked billboards and text primitives. It never draws
//! anything itself.
//!
//! # Features
//!
//! - **Element tree**: parent/child placement with inherited visibility
//! - **Textured boxes**: colored or textured quads projected in front of the camera
//! - **Text**: host-measured text with left/center/right alignment
//! - **Scroll menus**: header, list body, footer and selection highlight laid out every frame
//! - **Test pattern**: a calibration pattern for checking scale and placement
//!
//! # Example
//!
//! ```rust,no_run
//! use hudkit_overlay::{HostRenderer, Overlay, TextAlignment, TextHudMessage};
//! use hudkit_camera::CameraFrame;
//! use glam::IVec2;
//!
//! # fn frame(host: &mut dyn HostRenderer) -> Result<(), hudkit_overlay::OverlayError> {
//! let mut overlay = Overlay::initialized()?;
//!
//! let label = overlay.add_text(None, TextHudMessage::new(TextAlignment::Left).with_message("Ready"))?;
//! overlay.set_origin(label, IVec2::new(-400, 300))?;
//!
//! // Once per frame:
//! overlay.draw(&CameraFrame::identity(1920, 1080, 1.2), host)?;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod components;
pub mod error;
pub mod host;
pub mod layout;
pub mod manager;
pub mod node;
pub mod test_pattern;
pub mod transform;

#[cfg(test)]
mod test_support;

pub use color::{Color, Material};
pub use components::{ScrollMenu, ScrollMenuMut, TextAlignment, TextHudMessage, TexturedBox};
pub use error::OverlayError;
pub use host::{BillboardQuad, BlendMode, HostRenderer, TextHandle, TextPrimitive};
pub use manager::{FrameStats, Overlay};
pub use node::{NodeBase, NodeId};
pub use test_pattern::UiTestPattern;
pub use transform::{round_scaled, Projection};

/// Version of the overlay crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
