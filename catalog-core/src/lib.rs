#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the catalog.
///
/// This module contains the fundamental data structures that represent the domain
/// entities (products and tags), the filter criteria and the predicate built from
/// them, and the request types accepted by the service.
///
/// The models in this module are primarily data structures with minimal business logic,
/// following the principles of the hexagonal architecture to separate domain entities
/// from their persistence and processing implementations.
pub mod models;

/// Interface traits for the catalog.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain logic and external adapters
/// (such as databases) without specifying implementation details. This separation
/// allows for easier testing and the ability to swap out infrastructure components
/// without affecting the core business logic.
pub mod ports;

/// Product lifecycle orchestration on top of the ports.
pub mod service;
