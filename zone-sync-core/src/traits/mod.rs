//! Storage layer abstraction trait definition

mod source_repository;

pub use source_repository::{FsSourceRepository, SourceRepository, SOURCE_EXTENSION};
