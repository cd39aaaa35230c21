//! Catena Core Geometry and Drawing
//!
//! This crate provides the pure construction layer for animated category
//! theory diagrams. Nothing in here touches a live document: every builder
//! returns a detached SVG tree that the host inserts wherever it likes.
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points in diagram-local space ([`geometry`] module)
//! - **Draw**: Arrows, object nodes and the shared arrowhead marker
//!   ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;

mod error;

pub use error::Error;
