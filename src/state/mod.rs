//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct shared by the renderer and the event handlers
//! - Admin panel state (screens, record lists, login form)
//! - Navigation types (Mode, Scroll)
//! - State error handling

mod admin;
mod error;
mod navigation;

pub use admin::{
    AdminFocus, AdminScreen, AdminState, LoginField, LoginForm, PageEdit, PageField,
    RecordDraft, RecordList, SettingsPane,
};
pub use error::StateError;
pub use navigation::{Mode, Scroll};

// State struct, methods and Default impl are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{State, BANNER_PARALLAX_SPEED};
