//! Core fetch-aggregate-diff pipeline for tracked Thunderstore mods
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   ModList   │────▶│  Resolver   │────▶│ Aggregator  │────▶│   Differ    │
//! │ (input refs)│     │(url → coord)│     │ (fan-out)   │     │(vs snapshot)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │                   ▲
//!                                                ▼                   │
//!                                         ┌─────────────┐     ┌─────────────┐
//!                                         │  Registry   │     │  Snapshot   │
//!                                         │  (fetch)    │     │ (baseline)  │
//!                                         └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`resolver`]: Parses mod page URLs into registry coordinates
//! - [`registry`]: Registry trait for fetching a package's latest release
//! - [`registries`]: Concrete registry implementations (Thunderstore)
//! - [`aggregator`]: Bounded concurrent fetch of every listed mod
//! - [`differ`]: Computes which mods changed since the prior snapshot
//! - [`snapshot`]: Best-effort loading of the prior snapshot
//! - [`modlist`]: Loading of the tracked mod list
//! - [`location`]: JSON documents addressed by URL or local path
//! - [`date`]: Registry timestamp parsing and display formatting
//! - [`error`]: Error types for every stage
//! - [`types`]: Shared value types like `ModRecord`

pub mod aggregator;
pub mod date;
pub mod differ;
pub mod error;
pub mod location;
pub mod modlist;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod snapshot;
pub mod types;
