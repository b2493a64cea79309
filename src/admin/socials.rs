//! Row editor for social links.

use crate::content::{Platform, SocialLink};

/// Column of the selected row being edited.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SocialColumn {
    Platform,
    Url,
}

/// Editable list of (platform, url) rows.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocialsEditor {
    rows: Vec<SocialLink>,
    selected: usize,
    column: SocialColumn,
    editing: bool,
}

impl Default for SocialsEditor {
    fn default() -> Self {
        SocialsEditor::new(vec![])
    }
}

impl SocialsEditor {
    pub fn new(rows: Vec<SocialLink>) -> Self {
        SocialsEditor {
            rows,
            selected: 0,
            column: SocialColumn::Platform,
            editing: false,
        }
    }

    pub fn rows(&self) -> &[SocialLink] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn column(&self) -> SocialColumn {
        self.column
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn next_row(&mut self) -> &mut Self {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
        self
    }

    pub fn previous_row(&mut self) -> &mut Self {
        self.selected = self.selected.saturating_sub(1);
        self
    }

    pub fn toggle_column(&mut self) -> &mut Self {
        self.column = match self.column {
            SocialColumn::Platform => SocialColumn::Url,
            SocialColumn::Url => SocialColumn::Platform,
        };
        self.editing = false;
        self
    }

    /// Append an empty GitHub row and select it.
    ///
    pub fn add_row(&mut self) -> &mut Self {
        self.rows.push(SocialLink {
            platform: Platform::Github,
            ..Default::default()
        });
        self.selected = self.rows.len() - 1;
        self
    }

    pub fn remove_row(&mut self) -> Option<SocialLink> {
        if self.selected >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(self.selected);
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
        self.editing = false;
        Some(removed)
    }

    /// Cycle the platform on the platform column; start typing on the URL
    /// column.
    ///
    pub fn activate(&mut self) -> &mut Self {
        match self.column {
            SocialColumn::Platform => self.cycle_platform(true),
            SocialColumn::Url if !self.rows.is_empty() => {
                self.editing = true;
                self
            }
            SocialColumn::Url => self,
        }
    }

    pub fn stop_editing(&mut self) -> &mut Self {
        self.editing = false;
        self
    }

    pub fn cycle_platform(&mut self, forward: bool) -> &mut Self {
        if let Some(row) = self.rows.get_mut(self.selected) {
            row.platform = row.platform.cycle(forward);
        }
        self
    }

    pub fn insert_char(&mut self, c: char) -> &mut Self {
        if self.editing {
            if let Some(row) = self.rows.get_mut(self.selected) {
                row.url.push(c);
            }
        }
        self
    }

    pub fn backspace(&mut self) -> &mut Self {
        if self.editing {
            if let Some(row) = self.rows.get_mut(self.selected) {
                row.url.pop();
            }
        }
        self
    }

    /// Rows that will be stored: empty URLs dropped, dense sort order.
    ///
    pub fn rows_to_save(&self) -> Vec<SocialLink> {
        self.rows
            .iter()
            .filter(|r| !r.url.trim().is_empty())
            .enumerate()
            .map(|(i, r)| SocialLink {
                id: None,
                platform: r.platform,
                url: r.url.trim().to_string(),
                sort_order: Some(i as i64 + 1),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edit_and_save_rows() {
        let mut editor = SocialsEditor::default();
        editor.add_row().toggle_column().activate();
        for c in "https://github.com/me".chars() {
            editor.insert_char(c);
        }
        editor.stop_editing().add_row();
        assert_eq!(editor.selected(), 1);
        assert_eq!(editor.rows().len(), 2);

        let saved = editor.rows_to_save();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].url, "https://github.com/me");
        assert_eq!(saved[0].sort_order, Some(1));
    }

    #[test]
    fn test_cycle_platform_on_platform_column() {
        let mut editor = SocialsEditor::default();
        editor.add_row().activate();
        assert_eq!(editor.rows()[0].platform, Platform::Github.cycle(true));
        editor.cycle_platform(false);
        assert_eq!(editor.rows()[0].platform, Platform::Github);
    }

    #[test]
    fn test_remove_keeps_selection_in_range() {
        let mut editor = SocialsEditor::default();
        editor.add_row().add_row();
        assert!(editor.remove_row().is_some());
        assert_eq!(editor.selected(), 0);
        assert!(editor.remove_row().is_some());
        assert!(editor.remove_row().is_none());
        editor.next_row().previous_row();
        assert_eq!(editor.selected(), 0);
    }

    #[test]
    fn test_typing_needs_url_editing() {
        let mut editor = SocialsEditor::new(vec![SocialLink::default()]);
        editor.insert_char('x');
        assert_eq!(editor.rows()[0].url, "");
    }
}
