//! Portfolio content records.
//!
//! These are the documents stored in the content database. Singletons live
//! in the `portfolio` collection (`about`, `contact`, `settings`); list
//! records live in their own collections and carry a store-assigned id.

pub mod fallback;
pub mod lenient;

use crate::navigation::PageEntry;
use fake::{Dummy, Faker};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Record stored as a single document inside the `portfolio` collection.
///
pub trait SingletonRecord {
    const DOCUMENT: &'static str;
}

/// Record stored as one document per entry inside its own collection.
///
pub trait CollectionRecord {
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;
    fn sort_order(&self) -> Option<i64>;
}

/// Stable sort by explicit `sort_order`. Records without one keep their
/// listing order and go after every record that has one.
///
pub fn order_records<T: CollectionRecord>(records: &mut [T]) {
    records.sort_by_key(|r| match r.sort_order() {
        Some(order) => (0, order),
        None => (1, 0),
    });
}

/// Defines the about section (bio and skills).
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub short_bio: String,
    #[serde(deserialize_with = "lenient::string")]
    pub full_bio: String,
    #[serde(deserialize_with = "lenient::string")]
    pub what_i_do: String,
    pub image_url: Option<String>,
    pub resume_url: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub skills: Vec<String>,
}

impl SingletonRecord for About {
    const DOCUMENT: &'static str = "about";
}

/// Whether an experience entry is a job or a degree.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceKind {
    #[default]
    Work,
    Education,
}

impl ExperienceKind {
    pub const ALL: [ExperienceKind; 2] = [ExperienceKind::Work, ExperienceKind::Education];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceKind::Work => "work",
            ExperienceKind::Education => "education",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "education" => ExperienceKind::Education,
            _ => ExperienceKind::Work,
        }
    }
}

impl Dummy<Faker> for ExperienceKind {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        ExperienceKind::ALL[rng.gen_range(0..ExperienceKind::ALL.len())]
    }
}

/// Defines an experience (timeline) entry.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub role: String,
    #[serde(deserialize_with = "lenient::string")]
    pub period: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: ExperienceKind,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::sort_order")]
    pub sort_order: Option<i64>,
}

impl CollectionRecord for Experience {
    const COLLECTION: &'static str = "experience";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

/// Defines a project card.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::sort_order")]
    pub sort_order: Option<i64>,
}

impl CollectionRecord for Project {
    const COLLECTION: &'static str = "projects";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

/// Defines contact details.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    #[serde(deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(deserialize_with = "lenient::string")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::string")]
    pub location: String,
}

impl SingletonRecord for Contact {
    const DOCUMENT: &'static str = "contact";
}

/// Social platforms offered by the socials editor.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Resume,
    #[default]
    Github,
    Linkedin,
    Instagram,
    Twitter,
    Dribbble,
    Behance,
    Youtube,
    Facebook,
    #[serde(other)]
    Other,
}

impl Platform {
    pub const ALL: [Platform; 10] = [
        Platform::Resume,
        Platform::Github,
        Platform::Linkedin,
        Platform::Instagram,
        Platform::Twitter,
        Platform::Dribbble,
        Platform::Behance,
        Platform::Youtube,
        Platform::Facebook,
        Platform::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Resume => "resume",
            Platform::Github => "github",
            Platform::Linkedin => "linkedin",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Dribbble => "dribbble",
            Platform::Behance => "behance",
            Platform::Youtube => "youtube",
            Platform::Facebook => "facebook",
            Platform::Other => "other",
        }
    }

    /// Display label, e.g. "Linkedin".
    ///
    pub fn label(&self) -> String {
        crate::utils::text_processing::capitalize(self.as_str())
    }

    /// Next platform in the editor's option list, wrapping around.
    ///
    pub fn cycle(&self, forward: bool) -> Platform {
        let len = Platform::ALL.len();
        let index = Platform::ALL.iter().position(|p| p == self).unwrap_or(0);
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        Platform::ALL[next]
    }
}

impl Dummy<Faker> for Platform {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Platform::ALL[rng.gen_range(0..Platform::ALL.len())]
    }
}

/// Defines a social link.
///
#[derive(Clone, Debug, Default, Dummy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub platform: Platform,
    #[serde(deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient::sort_order")]
    pub sort_order: Option<i64>,
}

impl CollectionRecord for SocialLink {
    const COLLECTION: &'static str = "socials";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

fn default_theme_color() -> String {
    "#4801ff".to_string()
}

/// Defines site-wide settings, including the navigation pages.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(deserialize_with = "lenient::string")]
    pub site_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hero_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hero_heading: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hero_subheading: String,
    #[serde(deserialize_with = "lenient::string")]
    pub hero_tagline: String,
    #[serde(deserialize_with = "lenient::string")]
    pub footer_text: String,
    #[serde(deserialize_with = "lenient::string")]
    pub meta_description: String,
    #[serde(deserialize_with = "lenient::string")]
    pub years_of_experience: String,
    #[serde(deserialize_with = "lenient::string")]
    pub current_location: String,
    #[serde(deserialize_with = "lenient::string")]
    pub job_title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub favicon_url: String,
    #[serde(default = "default_theme_color", deserialize_with = "lenient::string")]
    pub theme_color: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub pages: Vec<PageEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            site_title: String::new(),
            hero_name: String::new(),
            hero_heading: String::new(),
            hero_subheading: String::new(),
            hero_tagline: String::new(),
            footer_text: String::new(),
            meta_description: String::new(),
            years_of_experience: String::new(),
            current_location: String::new(),
            job_title: String::new(),
            favicon_url: String::new(),
            theme_color: default_theme_color(),
            pages: vec![],
        }
    }
}

impl SingletonRecord for Settings {
    const DOCUMENT: &'static str = "settings";
}

/// Every content collection the site renders, fully resolved.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentBundle {
    pub about: About,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub contact: Contact,
    pub socials: Vec<SocialLink>,
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use serde_json::json;

    fn experience(id: &str, sort_order: Option<i64>) -> Experience {
        Experience {
            id: Some(id.to_string()),
            sort_order,
            ..Default::default()
        }
    }

    #[test]
    fn test_order_records_sorts_by_sort_order() {
        let mut records = vec![
            experience("c", Some(3)),
            experience("a", Some(1)),
            experience("b", Some(2)),
        ];
        order_records(&mut records);
        let ids: Vec<_> = records.iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_order_records_keeps_listing_order_for_missing_sort_order() {
        let mut records = vec![
            experience("x", None),
            experience("b", Some(2)),
            experience("y", None),
            experience("a", Some(2)),
        ];
        order_records(&mut records);
        let ids: Vec<_> = records.iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec!["b", "a", "x", "y"]);
    }

    #[test]
    fn test_experience_kind_uses_type_field() {
        let entry: Experience = serde_json::from_value(json!({
            "company": "Acme",
            "type": "education",
        }))
        .unwrap();
        assert_eq!(entry.kind, ExperienceKind::Education);
        assert_eq!(entry.role, "");

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "education");
        assert!(value.get("id").is_none());
        assert!(value.get("sort_order").is_none());
    }

    #[test]
    fn test_unknown_platform_decodes_as_other() {
        let link: SocialLink =
            serde_json::from_value(json!({ "platform": "mastodon", "url": "https://x" })).unwrap();
        assert_eq!(link.platform, Platform::Other);
    }

    #[test]
    fn test_platform_cycle_wraps() {
        assert_eq!(Platform::Other.cycle(true), Platform::Resume);
        assert_eq!(Platform::Resume.cycle(false), Platform::Other);
        assert_eq!(Platform::Github.label(), "Github");
    }

    #[test]
    fn test_settings_defaults_theme_color() {
        let settings: Settings = serde_json::from_value(json!({ "site_title": "Site" })).unwrap();
        assert_eq!(settings.theme_color, "#4801ff");
        assert!(settings.pages.is_empty());
    }

    #[test]
    fn test_fake_records_round_through_json() {
        let project: Project = Faker.fake();
        let value = serde_json::to_value(&project).unwrap();
        let decoded: Project = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.name, project.name);
        assert_eq!(decoded.tech_stack, project.tech_stack);
        assert_eq!(decoded.id, None);
    }
}
