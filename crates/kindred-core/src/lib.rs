//! Kindred Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Kindred layout
//! engine and its tools:
//!
//! - **Identifiers**: Interned person identifiers ([`identifier::PersonId`])
//! - **Family**: People, relationships and derived trees ([`family`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Colors**: CSS color handling for rendering ([`color::Color`])

pub mod color;
pub mod family;
pub mod geometry;
pub mod identifier;
