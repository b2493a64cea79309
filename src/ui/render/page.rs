use super::Frame;
use crate::content::{ContentBundle, ExperienceKind};
use crate::router::PageView;
use crate::state::State;
use crate::ui::theme::Theme;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

const BANNER_HEIGHT: u16 = 3;

/// Render a content page. The banner scrolls slower than the body by the
/// parallax offset.
///
pub fn page(frame: &mut Frame, size: Rect, state: &State, view: PageView, opacity: f32) {
    let theme = state.get_theme();
    let bundle = match state.provider().bundle() {
        Some(bundle) => bundle,
        None => return,
    };
    let title = state
        .visible_view()
        .map(|v| v.route().title.clone())
        .unwrap_or_default();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BANNER_HEIGHT), Constraint::Min(1)])
        .horizontal_margin(2)
        .split(size);

    let shift = banner_shift(state.page_scroll(), state.banner_offset());
    let banner = vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_uppercase(),
            styling::faded(theme, &theme.banner, opacity).add_modifier(ratatui::style::Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "─".repeat(rows[0].width as usize),
            styling::faded(theme, &theme.border_normal, opacity),
        )),
    ];
    frame.render_widget(Paragraph::new(banner).scroll((shift, 0)), rows[0]);

    let mut lines = page_lines(bundle, view, theme);
    lines.push(Line::from(""));
    if let Some(next) = state
        .navigation()
        .next_after(state.transition().current_path())
    {
        lines.push(Line::from(vec![
            Span::styled("Next: ", styling::muted_text_style(theme)),
            Span::styled(next.name.clone(), styling::accent_style(theme)),
            Span::styled("  (n)", styling::muted_text_style(theme)),
        ]));
    }
    if opacity < 1.0 {
        let fade = styling::faded(theme, &theme.text, opacity);
        for span in lines.iter_mut().flat_map(|l| l.spans.iter_mut()) {
            span.style = span.style.patch(fade);
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((state.page_scroll(), 0)),
        rows[1],
    );
}

/// Rows the banner has moved up: the body scroll minus the parallax lag.
///
pub fn banner_shift(page_scroll: u16, banner_offset: i32) -> u16 {
    (page_scroll as i32 - banner_offset).clamp(0, BANNER_HEIGHT as i32) as u16
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(text.to_string(), styling::heading_style(theme)))
}

fn body(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    text.lines()
        .map(|l| Line::from(Span::styled(l.to_string(), styling::normal_text_style(theme))))
        .collect()
}

fn labelled(label: &str, value: &str, theme: &Theme, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", label), styling::muted_text_style(theme)),
        Span::styled(value.to_string(), value_style),
    ])
}

/// Body lines for a page view.
///
pub fn page_lines(bundle: &ContentBundle, view: PageView, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![];
    match view {
        PageView::About => {
            let about = &bundle.about;
            lines.push(heading(&about.title, theme));
            lines.push(Line::from(""));
            lines.extend(body(&about.short_bio, theme));
            lines.push(Line::from(""));
            lines.extend(body(&about.full_bio, theme));
            if !about.what_i_do.is_empty() {
                lines.push(Line::from(""));
                lines.push(heading("What I do", theme));
                lines.extend(body(&about.what_i_do, theme));
            }
            if !about.skills.is_empty() {
                lines.push(Line::from(""));
                lines.push(heading("Skills", theme));
                lines.push(Line::from(Span::styled(
                    about.skills.join("  ·  "),
                    styling::accent_style(theme),
                )));
            }
            if let Some(resume) = &about.resume_url {
                lines.push(Line::from(""));
                lines.push(labelled("Resume", resume, theme, styling::accent_style(theme)));
            }
        }
        PageView::Experience => {
            for kind in ExperienceKind::ALL {
                let entries: Vec<_> = bundle.experience.iter().filter(|e| e.kind == kind).collect();
                if entries.is_empty() {
                    continue;
                }
                lines.push(heading(
                    match kind {
                        ExperienceKind::Work => "Work",
                        ExperienceKind::Education => "Education",
                    },
                    theme,
                ));
                for entry in entries {
                    lines.push(Line::from(vec![
                        Span::styled(entry.role.clone(), styling::current_list_item_style(theme)),
                        Span::styled(" @ ", styling::muted_text_style(theme)),
                        Span::styled(entry.company.clone(), styling::accent_style(theme)),
                    ]));
                    lines.push(Line::from(Span::styled(
                        entry.period.clone(),
                        styling::muted_text_style(theme),
                    )));
                    lines.extend(body(&entry.description, theme));
                    lines.push(Line::from(""));
                }
            }
        }
        PageView::Projects => {
            for project in &bundle.projects {
                lines.push(heading(&project.name, theme));
                lines.extend(body(&project.description, theme));
                if !project.tech_stack.is_empty() {
                    lines.push(Line::from(Span::styled(
                        project.tech_stack.join(" / "),
                        styling::accent_style(theme),
                    )));
                }
                if let Some(url) = &project.live_url {
                    lines.push(labelled("Live", url, theme, styling::normal_text_style(theme)));
                }
                if let Some(url) = &project.github_url {
                    lines.push(labelled("Source", url, theme, styling::normal_text_style(theme)));
                }
                lines.push(Line::from(""));
            }
        }
        PageView::Contact => {
            let contact = &bundle.contact;
            let value = styling::normal_text_style(theme);
            lines.push(labelled("Email", &contact.email, theme, value));
            if !contact.phone.is_empty() {
                lines.push(labelled("Phone", &contact.phone, theme, value));
            }
            if !contact.location.is_empty() {
                lines.push(labelled("Location", &contact.location, theme, value));
            }
            if !bundle.socials.is_empty() {
                lines.push(Line::from(""));
                lines.push(heading("Elsewhere", theme));
                for link in &bundle.socials {
                    lines.push(labelled(
                        &link.platform.label(),
                        &link.url,
                        theme,
                        styling::accent_style(theme),
                    ));
                }
            }
        }
    }
    lines
}
