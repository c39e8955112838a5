//! Catalog core integration tests
//!
//! Run against the in-memory store. The Postgres round trip is ignored by
//! default; run it with: DATABASE_URL=... cargo test -- --ignored

mod catalog;
mod lifecycle;
mod postgres;
mod renewal;
