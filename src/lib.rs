//! # Rollcall - Short Aliases for Tabletop Encounters
//!
//! Rollcall gives every participant in a tabletop role-playing encounter
//! (player characters, monsters, anonymous swarm members) a short,
//! human-typable alias such as `Gob`, `Gob1` or `GBo` that chat commands can
//! refer to.
//!
//! ## Features
//!
//! - **Stable aliases**: repeated names share a prefix and differ only by number.
//! - **Low ambiguity**: new prefixes avoid matching other tracked names.
//! - **Reproducible**: the same inputs always produce the same aliases.
//! - **Stateless**: allocator state is rebuilt from persisted `(alias, name)` pairs.
//!
//! ## Quick Start
//!
//! ```rust
//! use rollcall::alias::AliasRegistry;
//!
//! let mut registry = AliasRegistry::new();
//! assert_eq!(registry.add("Goblin", 3, false)?, "Gob");
//! assert_eq!(registry.add("Goblin", 3, false)?, "Gob1");
//! # Ok::<(), rollcall::alias::AliasError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`alias`] - the alias allocator
//! - [`roster`] - persisted encounter participants and join policies
//! - [`config`] - TOML configuration
//! - [`logutil`] - single-line log escaping for user-supplied text

pub mod alias;
pub mod config;
pub mod logutil;
pub mod roster;
