//! Static content shown when the content database cannot be reached.

use super::{About, Contact, ContentBundle, Experience, ExperienceKind, Platform, Project, Settings, SocialLink};
use crate::navigation::default_pages;

pub const FALLBACK_TITLE: &str = "Software Developer";

pub fn about() -> About {
    About {
        title: FALLBACK_TITLE.to_string(),
        short_bio: "I build dependable web applications and the APIs behind them.".to_string(),
        full_bio: "I specialise in scalable backend services and the tooling around them."
            .to_string(),
        what_i_do: "I turn messy problems into small, maintainable programs that deliver real value."
            .to_string(),
        image_url: None,
        resume_url: None,
        skills: ["Rust", "SQL", "JavaScript", "REST APIs", "Git", "Linux"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

pub fn experience() -> Vec<Experience> {
    vec![Experience {
        id: Some("1".to_string()),
        company: "Your Company".to_string(),
        role: FALLBACK_TITLE.to_string(),
        period: "2022 - Present".to_string(),
        description: "Add your real experience from the admin panel.".to_string(),
        kind: ExperienceKind::Work,
        sort_order: Some(1),
    }]
}

pub fn projects() -> Vec<Project> {
    vec![Project {
        id: Some("1".to_string()),
        name: "Your Project".to_string(),
        description: "Add your real projects from the admin panel.".to_string(),
        tech_stack: vec!["Rust".to_string(), "Firestore".to_string()],
        image_url: None,
        live_url: None,
        github_url: None,
        sort_order: Some(1),
    }]
}

pub fn contact() -> Contact {
    Contact {
        email: "hello@example.com".to_string(),
        phone: String::new(),
        location: "Earth".to_string(),
    }
}

pub fn socials() -> Vec<SocialLink> {
    [
        (Platform::Resume, "/resume.pdf"),
        (Platform::Linkedin, "https://www.linkedin.com/"),
        (Platform::Github, "https://github.com/"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (platform, url))| SocialLink {
        id: None,
        platform: *platform,
        url: url.to_string(),
        sort_order: Some(i as i64 + 1),
    })
    .collect()
}

pub fn settings() -> Settings {
    Settings {
        site_title: format!("Portfolio | {}", FALLBACK_TITLE),
        hero_name: "Hello".to_string(),
        job_title: FALLBACK_TITLE.to_string(),
        years_of_experience: "3".to_string(),
        current_location: "Earth".to_string(),
        pages: default_pages(),
        ..Settings::default()
    }
}

/// The complete static bundle.
///
pub fn bundle() -> ContentBundle {
    ContentBundle {
        about: about(),
        experience: experience(),
        projects: projects(),
        contact: contact(),
        socials: socials(),
        settings: settings(),
    }
}
