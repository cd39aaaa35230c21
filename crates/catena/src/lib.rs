//! Catena - animation sequencing for category theory diagrams.
//!
//! Catena discovers diagram elements in a host document by their semantic
//! role, composes a timeline per diagram kind, and hands those timelines to
//! an external animation engine, gated on viewport visibility or bound to
//! pointer and click interaction.
//!
//! The crate never animates anything itself. Two collaborators are supplied
//! by the host:
//!
//! - a [`Document`](document::Document), the queryable tree of SVG/DOM nodes
//!   (an in-memory [`MemoryDocument`](document::MemoryDocument) is provided)
//! - an [`AnimationEngine`](engine::AnimationEngine), which plays, reverses
//!   and kills timelines and reports visibility crossings
//!
//! # Examples
//!
//! ```rust
//! use catena::{
//!     Orchestrator,
//!     config::AppConfig,
//!     document::{ElementSpec, MemoryDocument},
//!     engine::RecordingEngine,
//! };
//!
//! let mut document = MemoryDocument::new();
//! let root = document.root();
//! document.append(root, ElementSpec::new("path").class("morphism-arrow").path_length(120.0));
//!
//! let orchestration = Orchestrator::new(AppConfig::default())
//!     .with_engine(RecordingEngine::new())
//!     .initialize(&mut document)
//!     .expect("engine supplied");
//!
//! assert_eq!(orchestration.summary().morphism_arrows, 1);
//! ```

pub mod compose;
pub mod config;
pub mod document;
pub mod engine;
pub mod interaction;
pub mod orchestrator;
pub mod selector;
pub mod timeline;
pub mod visibility;

mod error;

pub use catena_core::{color, draw, geometry};

pub use error::CatenaError;
pub use orchestrator::{Orchestration, Orchestrator, Summary};
