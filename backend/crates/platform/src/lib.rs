//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, memory-hard)
//! - Bearer token signing and verification (JWT, HS256)
//! - Request credential extraction (cookies, Authorization header)

pub mod password;
pub mod request;
pub mod token;
