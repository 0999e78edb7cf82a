//! # Keep Gateway Client
//!
//! `reqwest`-based implementation of the [`kp_core::KeepClient`] trait
//! against the Keep gateway's HTTP API. The gateway wraps the proprietary
//! account sync protocol; everything this crate sends and receives is plain
//! JSON in the shared `Note` shape.

pub mod client;

pub use client::HttpKeepClient;
