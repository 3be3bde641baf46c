//! API Routes

pub mod health;
pub mod merchants;
pub mod points;
