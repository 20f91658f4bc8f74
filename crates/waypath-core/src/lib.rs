#![warn(missing_docs)]
//! Core types and utilities for `waypath`.
//!
//! This crate provides the priority queue that drives search frontiers, the
//! [`traits::SpaceModel`] interface a search space implements, and the
//! [`HashPool`] used to intern positions into dense node ids.

mod error;
mod hash_pool;
mod pqueue;
pub mod traits;

pub use crate::error::*;
pub use crate::hash_pool::*;
pub use crate::pqueue::*;
