//! Generic editable form used by every admin screen.

use crate::utils::text_processing::parse_list;
use crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

/// How a field is edited and rendered.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Accepts newlines.
    Multiline,
    /// Comma-separated list.
    List,
    /// One of a fixed set of values, cycled with left/right.
    Choice(Vec<String>),
    /// URL that can also be filled by uploading a local file.
    Upload,
    Toggle,
}

/// A labelled form field holding its value as text.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl Field {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind, value: &str) -> Self {
        Field {
            key,
            label,
            kind,
            value: value.to_string(),
        }
    }

    pub fn text(key: &'static str, label: &'static str, value: &str) -> Self {
        Field::new(key, label, FieldKind::Text, value)
    }

    pub fn multiline(key: &'static str, label: &'static str, value: &str) -> Self {
        Field::new(key, label, FieldKind::Multiline, value)
    }

    pub fn upload(key: &'static str, label: &'static str, value: Option<&str>) -> Self {
        Field::new(key, label, FieldKind::Upload, value.unwrap_or_default())
    }

    pub fn is_text_like(&self) -> bool {
        !matches!(self.kind, FieldKind::Choice(_) | FieldKind::Toggle)
    }
}

/// Local path being typed for an upload into `field`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPrompt {
    pub field: &'static str,
    pub path: String,
}

/// Ordered fields with a cursor. Typing goes into the selected field while
/// editing is on. Multiline fields are edited through a text area whose
/// contents are copied back into the field on every change.
///
#[derive(Clone, Debug, Default)]
pub struct Form {
    fields: Vec<Field>,
    selected: usize,
    editing: bool,
    upload_prompt: Option<UploadPrompt>,
    editor: Option<TextArea<'static>>,
}

impl PartialEq for Form {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
            && self.selected == other.selected
            && self.editing == other.editing
            && self.upload_prompt == other.upload_prompt
    }
}

impl Eq for Form {}

fn text_area(value: &str) -> TextArea<'static> {
    let mut area = TextArea::from(value.split('\n').map(str::to_string));
    area.set_cursor_line_style(Style::default());
    area.move_cursor(CursorMove::Bottom);
    area.move_cursor(CursorMove::End);
    area
}

impl Form {
    pub fn new(fields: Vec<Field>) -> Self {
        Form {
            fields,
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_field(&self) -> Option<&Field> {
        self.fields.get(self.selected)
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn upload_prompt(&self) -> Option<&UploadPrompt> {
        self.upload_prompt.as_ref()
    }

    /// Text area for the multiline field being edited.
    ///
    pub fn editor(&self) -> Option<&TextArea<'static>> {
        self.editor.as_ref()
    }

    pub fn next_field(&mut self) -> &mut Self {
        if self.editor.is_some() {
            self.stop_editing();
        }
        if !self.fields.is_empty() {
            self.selected = (self.selected + 1) % self.fields.len();
        }
        self
    }

    pub fn previous_field(&mut self) -> &mut Self {
        if self.editor.is_some() {
            self.stop_editing();
        }
        if !self.fields.is_empty() {
            self.selected = (self.selected + self.fields.len() - 1) % self.fields.len();
        }
        self
    }

    /// Start typing into the selected field. Choice and toggle fields are
    /// changed in place instead: choices step forward, toggles flip.
    ///
    pub fn activate(&mut self) -> &mut Self {
        let kind = match self.selected_field() {
            Some(field) => field.kind.clone(),
            None => return self,
        };
        match kind {
            FieldKind::Choice(_) => {
                self.cycle_choice(true);
            }
            FieldKind::Toggle => {
                self.toggle();
            }
            FieldKind::Multiline => {
                let value = self.selected_field().map(|f| f.value.clone()).unwrap_or_default();
                self.editor = Some(text_area(&value));
                self.editing = true;
            }
            _ => self.editing = true,
        }
        self
    }

    pub fn stop_editing(&mut self) -> &mut Self {
        self.editing = false;
        self.editor = None;
        self
    }

    /// Apply `edit` to the open text area, then copy its text into the field.
    ///
    fn edit_text_area(&mut self, edit: impl FnOnce(&mut TextArea<'static>) -> bool) -> bool {
        let changed = match self.editor.as_mut() {
            Some(editor) => edit(editor),
            None => return false,
        };
        if changed {
            let text = self
                .editor
                .as_ref()
                .map(|editor| editor.lines().join("\n"))
                .unwrap_or_default();
            if let Some(value) = self.selected_value_mut() {
                *value = text;
            }
        }
        true
    }

    /// Forward a key to the open text area: cursor movement, mid-text
    /// edits, newlines. Returns false when no text area is open.
    ///
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.edit_text_area(|editor| editor.input(key))
    }

    fn selected_value_mut(&mut self) -> Option<&mut String> {
        self.fields.get_mut(self.selected).map(|f| &mut f.value)
    }

    /// Type a character into the upload prompt or the field being edited.
    ///
    pub fn insert_char(&mut self, c: char) -> &mut Self {
        if let Some(prompt) = self.upload_prompt.as_mut() {
            prompt.path.push(c);
        } else if self.editor.is_some() {
            self.edit_text_area(|editor| {
                editor.insert_char(c);
                true
            });
        } else if self.editing {
            if let Some(value) = self.selected_value_mut() {
                value.push(c);
            }
        }
        self
    }

    pub fn backspace(&mut self) -> &mut Self {
        if let Some(prompt) = self.upload_prompt.as_mut() {
            prompt.path.pop();
        } else if self.editor.is_some() {
            self.edit_text_area(|editor| editor.delete_char());
        } else if self.editing {
            if let Some(value) = self.selected_value_mut() {
                value.pop();
            }
        }
        self
    }

    /// Insert a newline in a multiline field; finish editing otherwise.
    ///
    pub fn newline(&mut self) -> &mut Self {
        let multiline = matches!(
            self.selected_field().map(|f| &f.kind),
            Some(FieldKind::Multiline)
        );
        if self.editing && multiline {
            self.edit_text_area(|editor| {
                editor.insert_newline();
                true
            });
        } else {
            self.stop_editing();
        }
        self
    }

    /// Step the selected choice field through its options.
    ///
    pub fn cycle_choice(&mut self, forward: bool) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.selected) {
            if let FieldKind::Choice(options) = &field.kind {
                if options.is_empty() {
                    return self;
                }
                let current = options.iter().position(|o| *o == field.value).unwrap_or(0);
                let next = if forward {
                    (current + 1) % options.len()
                } else {
                    (current + options.len() - 1) % options.len()
                };
                field.value = options[next].clone();
            }
        }
        self
    }

    pub fn toggle(&mut self) -> &mut Self {
        if let Some(field) = self.fields.get_mut(self.selected) {
            if field.kind == FieldKind::Toggle {
                field.value = (!Self::is_truthy(&field.value)).to_string();
            }
        }
        self
    }

    /// Open the upload prompt for the selected field. Returns false when
    /// the selected field does not take uploads.
    ///
    pub fn begin_upload(&mut self) -> bool {
        let key = match self.selected_field() {
            Some(field) if field.kind == FieldKind::Upload => field.key,
            _ => return false,
        };
        self.stop_editing();
        self.upload_prompt = Some(UploadPrompt {
            field: key,
            path: String::new(),
        });
        true
    }

    pub fn cancel_upload(&mut self) -> &mut Self {
        self.upload_prompt = None;
        self
    }

    /// Close the prompt and return it when a path was typed.
    ///
    pub fn take_upload(&mut self) -> Option<UploadPrompt> {
        self.upload_prompt
            .take()
            .filter(|prompt| !prompt.path.trim().is_empty())
    }

    pub fn value(&self, key: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    /// Trimmed value, `None` when blank.
    ///
    pub fn optional(&self, key: &str) -> Option<String> {
        crate::utils::text_processing::non_empty(self.value(key))
    }

    pub fn list(&self, key: &str) -> Vec<String> {
        parse_list(self.value(key))
    }

    pub fn flag(&self, key: &str) -> bool {
        Self::is_truthy(self.value(key))
    }

    pub fn is_truthy(value: &str) -> bool {
        value == "true"
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> bool {
        let index = match self.fields.iter().position(|f| f.key == key) {
            Some(index) => index,
            None => return false,
        };
        self.fields[index].value = value.to_string();
        if index == self.selected && self.editor.is_some() {
            self.editor = Some(text_area(value));
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn form() -> Form {
        Form::new(vec![
            Field::text("name", "Name", "Ada"),
            Field::multiline("bio", "Bio", ""),
            Field::new(
                "type",
                "Type",
                FieldKind::Choice(vec!["work".to_string(), "education".to_string()]),
                "work",
            ),
            Field::new("skills", "Skills", FieldKind::List, "Rust, Go, Rust"),
            Field::upload("image_url", "Image", None),
            Field::new("visible", "Visible", FieldKind::Toggle, "true"),
        ])
    }

    #[test]
    fn test_typing_requires_editing() {
        let mut form = form();
        form.insert_char('x');
        assert_eq!(form.value("name"), "Ada");
        form.activate().insert_char('!');
        assert_eq!(form.value("name"), "Ada!");
        form.backspace().backspace();
        assert_eq!(form.value("name"), "Ad");
        form.newline();
        assert!(!form.is_editing());
    }

    #[test]
    fn test_multiline_accepts_newlines() {
        let mut form = form();
        form.next_field().activate();
        form.insert_char('a').newline().insert_char('b');
        assert_eq!(form.value("bio"), "a\nb");
        assert!(form.is_editing());
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_multiline_edits_in_the_middle() {
        let mut form = Form::new(vec![Field::multiline("bio", "Bio", "helo world\nbye")]);
        assert!(!form.input(key(KeyCode::Char('x'))));
        form.activate();
        assert!(form.editor().is_some());

        form.input(key(KeyCode::Up));
        form.input(key(KeyCode::Home));
        for _ in 0..3 {
            form.input(key(KeyCode::Right));
        }
        form.input(key(KeyCode::Char('l')));
        assert_eq!(form.value("bio"), "hello world\nbye");

        form.input(key(KeyCode::End));
        form.input(key(KeyCode::Backspace));
        form.input(key(KeyCode::Enter));
        assert_eq!(form.value("bio"), "hello worl\n\nbye");

        form.stop_editing();
        assert!(form.editor().is_none());
        assert_eq!(form.value("bio"), "hello worl\n\nbye");
    }

    #[test]
    fn test_leaving_multiline_field_closes_editor() {
        let mut form = form();
        form.next_field().activate();
        form.insert_char('a');
        form.next_field();
        assert!(form.editor().is_none());
        assert!(!form.is_editing());
        assert_eq!(form.value("bio"), "a");
    }

    #[test]
    fn test_field_cursor_wraps() {
        let mut form = form();
        form.previous_field();
        assert_eq!(form.selected_field().map(|f| f.key), Some("visible"));
        form.next_field();
        assert_eq!(form.selected(), 0);
    }

    #[test]
    fn test_choice_and_toggle() {
        let mut form = form();
        form.next_field().next_field().activate();
        assert_eq!(form.value("type"), "education");
        assert!(!form.is_editing());
        form.cycle_choice(true);
        assert_eq!(form.value("type"), "work");

        form.previous_field().previous_field().previous_field().activate();
        assert!(!form.flag("visible"));
    }

    #[test]
    fn test_list_values_are_trimmed_and_unique() {
        assert_eq!(form().list("skills"), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_upload_prompt() {
        let mut form = form();
        assert!(!form.begin_upload());
        for _ in 0..4 {
            form.next_field();
        }
        assert!(form.begin_upload());
        for c in "/tmp/me.png".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.value("image_url"), "");
        let prompt = form.take_upload().unwrap();
        assert_eq!(prompt.field, "image_url");
        assert_eq!(prompt.path, "/tmp/me.png");
        assert!(form.upload_prompt().is_none());

        form.begin_upload();
        assert!(form.take_upload().is_none());
        assert!(form.set_value("image_url", "https://cdn/me.png"));
        assert_eq!(form.optional("image_url").as_deref(), Some("https://cdn/me.png"));
        assert_eq!(form.optional("bio"), None);
    }
}
