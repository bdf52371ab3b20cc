//! Shared types, text handling, duplicate scoring and keyset pagination for the
//! exam question bank.
//!
//! Similarity scores are integer percentages computed without floating point.
//! Cursors are opaque URL-safe tokens over the `(created_at DESC, id DESC)`
//! listing order.

pub mod cursor;
pub mod hashing;
pub mod normalization;
pub mod pagination;
pub mod similarity;
pub mod tokenization;
pub mod types;
