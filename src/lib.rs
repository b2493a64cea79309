//! Terminal portfolio site with an admin panel.
//!
//! The public site renders a home journey menu and content pages loaded
//! from Firestore, falling back to built-in content when reads fail. The
//! admin panel signs in against Firebase Auth and edits every resource,
//! uploading files through Cloudinary.

pub mod admin;
pub mod app;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod firestore;
pub mod journey;
pub mod logger;
pub mod navigation;
pub mod parallax;
pub mod provider;
pub mod router;
pub mod state;
pub mod transition;
pub mod ui;
pub mod upload;
pub mod utils;
