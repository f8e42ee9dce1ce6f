//! Data access. Every function takes the connection it runs on: the shared
//! pool for reads, a per-request transaction for writes.

pub mod directors;
pub mod genres;
pub mod movies;

/// Outcome of a write addressed at a single row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mutation {
    Updated,
    Deleted,
    NotFound,
}

impl Mutation {
    fn updated(rows_affected: u64) -> Self {
        if rows_affected == 0 { Mutation::NotFound } else { Mutation::Updated }
    }

    fn deleted(rows_affected: u64) -> Self {
        if rows_affected == 0 { Mutation::NotFound } else { Mutation::Deleted }
    }
}
