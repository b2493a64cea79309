//! Conversions between content records and admin forms.
//!
//! Each `*_form` builds the editable form for a record; each `*_from_form`
//! reads the edited values back, keeping fields the form doesn't show
//! (ids, sort order, the page list) from the record being edited.

use super::form::{Field, FieldKind, Form};
use crate::content::*;
use crate::utils::text_processing::join_list;

pub fn about_form(about: &About) -> Form {
    Form::new(vec![
        Field::text("title", "Title", &about.title),
        Field::multiline("short_bio", "Short bio", &about.short_bio),
        Field::multiline("full_bio", "Full bio", &about.full_bio),
        Field::multiline("what_i_do", "What I do", &about.what_i_do),
        Field::upload("image_url", "Profile image", about.image_url.as_deref()),
        Field::upload("resume_url", "Resume", about.resume_url.as_deref()),
        Field::new("skills", "Skills", FieldKind::List, &join_list(&about.skills)),
    ])
}

pub fn about_from_form(form: &Form) -> About {
    About {
        title: form.value("title").trim().to_string(),
        short_bio: form.value("short_bio").to_string(),
        full_bio: form.value("full_bio").to_string(),
        what_i_do: form.value("what_i_do").to_string(),
        image_url: form.optional("image_url"),
        resume_url: form.optional("resume_url"),
        skills: form.list("skills"),
    }
}

fn kind_choice() -> FieldKind {
    FieldKind::Choice(
        ExperienceKind::ALL
            .iter()
            .map(|k| k.as_str().to_string())
            .collect(),
    )
}

pub fn experience_form(entry: &Experience) -> Form {
    Form::new(vec![
        Field::text("company", "Company / School", &entry.company),
        Field::text("role", "Role / Degree", &entry.role),
        Field::text("period", "Period", &entry.period),
        Field::new("type", "Type", kind_choice(), entry.kind.as_str()),
        Field::multiline("description", "Description", &entry.description),
        Field::text(
            "sort_order",
            "Sort order",
            &entry.sort_order.unwrap_or_default().to_string(),
        ),
    ])
}

fn sort_order(form: &Form, base: Option<i64>) -> Option<i64> {
    form.value("sort_order").trim().parse().ok().or(base)
}

pub fn experience_from_form(form: &Form, base: &Experience) -> Experience {
    Experience {
        id: base.id.clone(),
        company: form.value("company").trim().to_string(),
        role: form.value("role").trim().to_string(),
        period: form.value("period").trim().to_string(),
        description: form.value("description").to_string(),
        kind: ExperienceKind::parse(form.value("type")),
        sort_order: sort_order(form, base.sort_order),
    }
}

pub fn project_form(project: &Project) -> Form {
    Form::new(vec![
        Field::text("name", "Name", &project.name),
        Field::multiline("description", "Description", &project.description),
        Field::new(
            "tech_stack",
            "Tech stack",
            FieldKind::List,
            &join_list(&project.tech_stack),
        ),
        Field::upload("image_url", "Image", project.image_url.as_deref()),
        Field::text(
            "live_url",
            "Live URL",
            project.live_url.as_deref().unwrap_or_default(),
        ),
        Field::text(
            "github_url",
            "GitHub URL",
            project.github_url.as_deref().unwrap_or_default(),
        ),
        Field::text(
            "sort_order",
            "Sort order",
            &project.sort_order.unwrap_or_default().to_string(),
        ),
    ])
}

pub fn project_from_form(form: &Form, base: &Project) -> Project {
    Project {
        id: base.id.clone(),
        name: form.value("name").trim().to_string(),
        description: form.value("description").to_string(),
        tech_stack: form.list("tech_stack"),
        image_url: form.optional("image_url"),
        live_url: form.optional("live_url"),
        github_url: form.optional("github_url"),
        sort_order: sort_order(form, base.sort_order),
    }
}

pub fn contact_form(contact: &Contact) -> Form {
    Form::new(vec![
        Field::text("email", "Email", &contact.email),
        Field::text("phone", "Phone", &contact.phone),
        Field::text("location", "Location", &contact.location),
    ])
}

pub fn contact_from_form(form: &Form) -> Contact {
    Contact {
        email: form.value("email").trim().to_string(),
        phone: form.value("phone").trim().to_string(),
        location: form.value("location").trim().to_string(),
    }
}

pub fn settings_form(settings: &Settings) -> Form {
    Form::new(vec![
        Field::text("site_title", "Site title", &settings.site_title),
        Field::text("hero_name", "Hero name", &settings.hero_name),
        Field::text("hero_heading", "Hero heading", &settings.hero_heading),
        Field::text("hero_subheading", "Hero subheading", &settings.hero_subheading),
        Field::text("hero_tagline", "Hero tagline", &settings.hero_tagline),
        Field::text("job_title", "Job title", &settings.job_title),
        Field::text(
            "years_of_experience",
            "Years of experience",
            &settings.years_of_experience,
        ),
        Field::text("current_location", "Current location", &settings.current_location),
        Field::text("footer_text", "Footer text", &settings.footer_text),
        Field::multiline("meta_description", "Meta description", &settings.meta_description),
        Field::text("theme_color", "Theme color", &settings.theme_color),
        Field::upload("favicon_url", "Favicon", Some(&settings.favicon_url)),
    ])
}

/// Read the settings form back; `pages` comes from the page editor.
///
pub fn settings_from_form(form: &Form, pages: Vec<crate::navigation::PageEntry>) -> Settings {
    let mut settings = Settings {
        site_title: form.value("site_title").trim().to_string(),
        hero_name: form.value("hero_name").trim().to_string(),
        hero_heading: form.value("hero_heading").to_string(),
        hero_subheading: form.value("hero_subheading").to_string(),
        hero_tagline: form.value("hero_tagline").to_string(),
        job_title: form.value("job_title").trim().to_string(),
        years_of_experience: form.value("years_of_experience").trim().to_string(),
        current_location: form.value("current_location").trim().to_string(),
        footer_text: form.value("footer_text").to_string(),
        meta_description: form.value("meta_description").to_string(),
        favicon_url: form.value("favicon_url").trim().to_string(),
        pages,
        ..Default::default()
    };
    if let Some(color) = form.optional("theme_color") {
        settings.theme_color = color;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::fallback;
    use fake::{Fake, Faker};

    #[test]
    fn test_about_round_trips_through_form() {
        let mut about: About = Faker.fake();
        about.skills = vec!["Rust".to_string(), "SQL".to_string()];
        about.image_url = Some("https://cdn/me.png".to_string());
        about.resume_url = None;
        about.title = about.title.trim().to_string();
        assert_eq!(about_from_form(&about_form(&about)), about);
    }

    #[test]
    fn test_about_skills_are_deduplicated() {
        let mut form = about_form(&About::default());
        form.set_value("skills", " Rust , Go,, Rust ");
        assert_eq!(about_from_form(&form).skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_experience_keeps_id_and_reads_type() {
        let base = Experience {
            id: Some("abc".to_string()),
            sort_order: Some(3),
            ..Default::default()
        };
        let mut form = experience_form(&base);
        form.set_value("company", "  Uni ");
        form.set_value("type", "education");
        form.set_value("sort_order", "oops");
        let entry = experience_from_form(&form, &base);
        assert_eq!(entry.id.as_deref(), Some("abc"));
        assert_eq!(entry.company, "Uni");
        assert_eq!(entry.kind, ExperienceKind::Education);
        assert_eq!(entry.sort_order, Some(3));
    }

    #[test]
    fn test_project_blank_urls_become_none() {
        let mut form = project_form(&Project::default());
        form.set_value("tech_stack", "Rust, Tokio");
        form.set_value("live_url", "  ");
        form.set_value("sort_order", "2");
        let project = project_from_form(&form, &Project::default());
        assert_eq!(project.tech_stack, vec!["Rust", "Tokio"]);
        assert_eq!(project.live_url, None);
        assert_eq!(project.sort_order, Some(2));
    }

    #[test]
    fn test_settings_keep_pages_and_default_color() {
        let settings = fallback::settings();
        let mut form = settings_form(&settings);
        form.set_value("theme_color", "");
        let saved = settings_from_form(&form, settings.pages.clone());
        assert_eq!(saved.pages, settings.pages);
        assert_eq!(saved.theme_color, "#4801ff");
        assert_eq!(saved.site_title, settings.site_title);
    }

    #[test]
    fn test_contact_form() {
        let contact: Contact = Faker.fake();
        let mut form = contact_form(&contact);
        form.set_value("email", " me@example.com ");
        assert_eq!(contact_from_form(&form).email, "me@example.com");
    }
}
