//! Version resolution layer
//!
//! This module turns a version specifier (`1.6.x`, `v1.8.0`, `master`, ...)
//! into the concrete release tag of a repository it refers to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Specifier  │────▶│  Resolver   │◀────│  Registry   │
//! │   (parse)   │     │ (coordinate)│     │ (list tags) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Matcher   │     │ Registries  │
//!                     │  (select)   │     │  (GitHub)   │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: `VersionResolver`, the entry point
//! - [`specifier`]: Parsing of exact, wildcard and default-branch specifiers
//! - [`matcher`]: Selection of the release a specifier refers to
//! - [`registry`]: Registry trait for listing a repository's tags
//! - [`registries`]: Concrete registry implementations (GitHub)
//! - [`semver`]: Tag normalization and numeric comparison helpers
//! - [`error`]: Error types for registries, resolution and configuration
//! - [`types`]: Repository identity and request types

pub mod error;
pub mod matcher;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;
pub mod specifier;
pub mod types;
