//! Sociogram Core Types and Definitions
//!
//! This crate provides the foundational types for the Sociogram schema
//! diagram tool. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Schema**: The relational schema metadata model ([`schema`] module)
//! - **Errors**: Schema validation errors ([`error::SchemaError`])

pub mod color;
pub mod error;
pub mod geometry;
pub mod identifier;
pub mod schema;
