//! Admin CRUD surfaces.
//!
//! Every screen follows the same loop: load the stored record into a local
//! form, edit it, save, then reload. Outcomes are reported inline with an
//! [`AdminMessage`]; nothing is retried automatically.

pub mod form;
pub mod records;
pub mod socials;

pub use form::{Field, FieldKind, Form, UploadPrompt};
pub use records::*;
pub use socials::{SocialColumn, SocialsEditor};

use crate::content::{About, Contact, Experience, Project, SocialLink};

/// Inline outcome message on an admin screen.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminMessage {
    Success(String),
    Error(String),
    Info(String),
}

impl AdminMessage {
    pub fn success(text: &str) -> Self {
        AdminMessage::Success(text.to_string())
    }

    pub fn error(text: &str) -> Self {
        AdminMessage::Error(text.to_string())
    }

    pub fn info(text: &str) -> Self {
        AdminMessage::Info(text.to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            AdminMessage::Success(t) | AdminMessage::Error(t) | AdminMessage::Info(t) => t,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, AdminMessage::Error(_))
    }
}

/// Counts shown on the dashboard.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub about: bool,
    pub experience: usize,
    pub projects: usize,
    pub contact: bool,
    pub socials: usize,
}

impl DashboardStats {
    /// Stats from raw reads. Failed reads count as empty.
    ///
    pub fn from_reads(
        about: Option<&About>,
        experience: Option<&[Experience]>,
        projects: Option<&[Project]>,
        contact: Option<&Contact>,
        socials: Option<&[SocialLink]>,
    ) -> Self {
        DashboardStats {
            about: about.is_some(),
            experience: experience.map(|e| e.len()).unwrap_or(0),
            projects: projects.map(|p| p.len()).unwrap_or(0),
            contact: contact.is_some(),
            socials: socials.map(|s| s.len()).unwrap_or(0),
        }
    }
}
