//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random keys, SHA-256, Base64url)
//! - Password hashing (Argon2id) and password policy
//! - `Authorization` header parsing for bearer tokens

pub mod bearer;
pub mod crypto;
pub mod password;
