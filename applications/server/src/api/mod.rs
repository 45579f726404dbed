/// API route modules
pub mod health;
pub mod lyrics;
pub mod mix;
