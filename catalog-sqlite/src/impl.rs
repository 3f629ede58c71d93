//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of the repository traits defined in
//! `catalog-core` for the SQLite database backend.

use crate::{
    Db,
    types::{ProductId, TagId},
};
use catalog_core::ports::Repository;

mod predicate;
mod product;
mod tag;

impl Repository for Db {
    type Error = sqlx::Error;
    type ProductId = ProductId;
    type TagId = TagId;
}

/// Returns true if the error is a violated `unique` constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|err| err.is_unique_violation())
}
