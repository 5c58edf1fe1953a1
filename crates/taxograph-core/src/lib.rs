//! Taxograph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Taxograph
//! crates:
//!
//! - **Taxonomy**: the validated source tree ([`taxonomy::TaxonomyNode`])
//! - **Semantic**: the diagram arena handed to backends ([`semantic::Diagram`])
//! - **Identifiers**: arena indices for diagram nodes ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Node styles, text measurement and SVG primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
pub mod taxonomy;
