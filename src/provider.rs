//! Site content provider.
//!
//! Holds the content bundle every site view renders from. Each resource is
//! fetched independently; anything missing, failed or unusable is replaced
//! with the static fallback so the site always has something to show.

use crate::content::{fallback, About, Contact, ContentBundle, Experience, Project, Settings, SocialLink};
use crate::navigation::{derive_visible_pages, NavigationSnapshot};
use log::*;

/// Raw results of one load. `None` means the read failed or found nothing.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchedContent {
    pub about: Option<About>,
    pub experience: Option<Vec<Experience>>,
    pub projects: Option<Vec<Project>>,
    pub contact: Option<Contact>,
    pub socials: Option<Vec<SocialLink>>,
    pub settings: Option<Settings>,
}

fn non_empty<T>(items: Option<Vec<T>>) -> Option<Vec<T>> {
    items.filter(|items| !items.is_empty())
}

/// Apply the per-resource fallback rules: about when absent; experience,
/// projects and socials when empty; contact without an email; settings
/// without a site title.
///
pub fn resolve_with_fallback(fetched: FetchedContent) -> ContentBundle {
    let mut substituted = vec![];
    let mut note = |resource: &'static str| substituted.push(resource);

    let about = fetched.about.unwrap_or_else(|| {
        note("about");
        fallback::about()
    });
    let experience = non_empty(fetched.experience).unwrap_or_else(|| {
        note("experience");
        fallback::experience()
    });
    let projects = non_empty(fetched.projects).unwrap_or_else(|| {
        note("projects");
        fallback::projects()
    });
    let contact = fetched
        .contact
        .filter(|c| !c.email.trim().is_empty())
        .unwrap_or_else(|| {
            note("contact");
            fallback::contact()
        });
    let socials = non_empty(fetched.socials).unwrap_or_else(|| {
        note("socials");
        fallback::socials()
    });
    let settings = fetched
        .settings
        .filter(|s| !s.site_title.trim().is_empty())
        .unwrap_or_else(|| {
            note("settings");
            fallback::settings()
        });

    if !substituted.is_empty() {
        info!("Using fallback content for: {}", substituted.join(", "));
    }
    ContentBundle {
        about,
        experience,
        projects,
        contact,
        socials,
        settings,
    }
}

/// Content store for the site.
///
#[derive(Debug)]
pub struct DataProvider {
    bundle: Option<ContentBundle>,
    navigation: NavigationSnapshot,
    loading: bool,
}

impl Default for DataProvider {
    fn default() -> Self {
        DataProvider {
            bundle: None,
            navigation: derive_visible_pages(None),
            loading: true,
        }
    }
}

impl DataProvider {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The resolved content, once the first load has finished.
    ///
    pub fn bundle(&self) -> Option<&ContentBundle> {
        self.bundle.as_ref()
    }

    /// Visible navigation derived from the current settings.
    ///
    pub fn navigation(&self) -> &NavigationSnapshot {
        &self.navigation
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.bundle.as_ref().map(|b| &b.settings)
    }

    /// Mark a load as in flight. Content already loaded stays visible.
    ///
    pub fn begin_load(&mut self) -> &mut Self {
        self.loading = true;
        self
    }

    /// Replace the content with the resolved results of a load.
    ///
    pub fn finish_load(&mut self, fetched: FetchedContent) -> &mut Self {
        let bundle = resolve_with_fallback(fetched);
        self.navigation = derive_visible_pages(Some(&bundle.settings));
        debug!(
            "Content loaded: {} experience entries, {} projects, {} pages visible",
            bundle.experience.len(),
            bundle.projects.len(),
            self.navigation.len()
        );
        self.bundle = Some(bundle);
        self.loading = false;
        self
    }
}
