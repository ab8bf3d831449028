//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryArticleRepository;
pub use postgres::PgArticleRepository;
