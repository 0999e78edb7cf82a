//! # Notes Core
//!
//! The safety/mapping core shared by both front ends.
//!
//! This crate provides:
//! - [`SafetyPolicy`]: the managed-marker gate over mutations
//! - [`NotesService`]: request validation and orchestration for the six
//!   note operations, delegating to a [`kp_core::KeepClient`]
//! - Output shapes ([`NoteCollection`], [`DeleteReceipt`]) rendered
//!   identically over REST and MCP

pub mod policy;
pub mod service;
pub mod shape;

pub use policy::SafetyPolicy;
pub use service::NotesService;
pub use shape::{DeleteReceipt, NoteCollection};
