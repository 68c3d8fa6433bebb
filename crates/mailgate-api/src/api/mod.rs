/// API endpoint modules
pub mod health;
pub mod mail;
pub mod root;
