//! holly-ddl: one sorted deadline timeline from several course platforms, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
