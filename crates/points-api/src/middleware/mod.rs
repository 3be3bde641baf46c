//! Request Middleware

pub mod auth;
