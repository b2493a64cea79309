//! Settings-driven navigation.
//!
//! The site's page list lives in the settings record. This module derives
//! the ordered, visible snapshot that the journey menu and the router read,
//! and implements the editing operations used by the admin settings screen.

mod error;

pub use error::NavigationError;

use crate::content::{lenient, Settings};
use crate::utils::text_processing::normalize_path;
use log::*;
use serde::{Deserialize, Serialize};

/// Ids of the pages that ship with the site.
///
pub const BUILTIN_PAGE_IDS: [&str; 4] = ["about", "experience", "projects", "contact"];

fn default_visible() -> bool {
    true
}

/// Defines a navigable section of the site.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub path: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, deserialize_with = "lenient::rank")]
    pub sort_order: i64,
    #[serde(default)]
    pub is_custom: bool,
}

impl PageEntry {
    fn builtin(id: &str, name: &str, sort_order: i64) -> Self {
        PageEntry {
            id: id.to_string(),
            name: name.to_string(),
            path: format!("/{}", id),
            visible: true,
            sort_order,
            is_custom: false,
        }
    }

    /// Built-in pages have a fixed path and cannot be removed.
    ///
    pub fn is_builtin(&self) -> bool {
        !self.is_custom && BUILTIN_PAGE_IDS.contains(&self.id.as_str())
    }
}

/// The canonical page list used when settings carry none.
///
pub fn default_pages() -> Vec<PageEntry> {
    vec![
        PageEntry::builtin("about", "About Me", 1),
        PageEntry::builtin("experience", "Experience", 2),
        PageEntry::builtin("projects", "Projects", 3),
        PageEntry::builtin("contact", "Contact Me", 4),
    ]
}

/// Visible pages in display order.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationSnapshot {
    pages: Vec<PageEntry>,
}

impl NavigationSnapshot {
    pub fn pages(&self) -> &[PageEntry] {
        &self.pages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageEntry> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageEntry> {
        self.pages.get(index)
    }

    pub fn find_by_path(&self, path: &str) -> Option<&PageEntry> {
        self.pages.iter().find(|p| p.path == path)
    }

    /// Page after the one at `path`, looping from the last back to the
    /// first. Unknown paths start from the first page.
    ///
    pub fn next_after(&self, path: &str) -> Option<&PageEntry> {
        if self.pages.is_empty() {
            return None;
        }
        let next = match self.pages.iter().position(|p| p.path == path) {
            Some(index) => (index + 1) % self.pages.len(),
            None => 0,
        };
        self.pages.get(next)
    }

    /// Identity of the ordered set of pages, e.g. `about-projects`.
    ///
    pub fn ids_key(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Derive the visible, ordered page list from a settings record. Missing or
/// empty page lists fall back to the default pages. Ties in `sort_order`
/// keep their original position.
///
pub fn derive_visible_pages(settings: Option<&Settings>) -> NavigationSnapshot {
    let mut pages: Vec<PageEntry> = match settings {
        Some(settings) if !settings.pages.is_empty() => settings.pages.clone(),
        _ => default_pages(),
    };
    pages.retain(|p| p.visible);
    pages.sort_by_key(|p| p.sort_order);
    NavigationSnapshot { pages }
}

/// Direction for reordering a page.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    pub fn offset(&self) -> isize {
        match self {
            MoveDirection::Up => -1,
            MoveDirection::Down => 1,
        }
    }
}

/// Editable page list for the admin settings screen. The list always holds
/// a dense `1..N` ranking in `sort_order`.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageEditor {
    pages: Vec<PageEntry>,
}

impl Default for PageEditor {
    fn default() -> Self {
        PageEditor::new(vec![])
    }
}

impl PageEditor {
    /// Start editing the given pages, sorted by their stored rank. An empty
    /// list starts from the default pages.
    ///
    pub fn new(mut pages: Vec<PageEntry>) -> Self {
        if pages.is_empty() {
            pages = default_pages();
        }
        pages.sort_by_key(|p| p.sort_order);
        let mut editor = PageEditor { pages };
        editor.renumber();
        editor
    }

    pub fn pages(&self) -> &[PageEntry] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<PageEntry> {
        self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn renumber(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.sort_order = i as i64 + 1;
        }
    }

    fn page_mut(&mut self, index: usize) -> Result<&mut PageEntry, NavigationError> {
        self.pages
            .get_mut(index)
            .ok_or(NavigationError::IndexOutOfRange(index))
    }

    /// Swap the page at `index` with its neighbour. Returns false without
    /// touching the list when the neighbour would be out of range.
    ///
    pub fn move_page(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = index as isize + direction.offset();
        if index >= self.pages.len() || target < 0 || target as usize >= self.pages.len() {
            return false;
        }
        self.pages.swap(index, target as usize);
        self.renumber();
        debug!("Moved page {} to position {}.", self.pages[target as usize].id, target + 1);
        true
    }

    /// Append a new custom page and return its index.
    ///
    pub fn add_page(&mut self) -> usize {
        let mut id = format!("custom-{}", chrono::Utc::now().timestamp_millis());
        let mut suffix = 1;
        while self.pages.iter().any(|p| p.id == id) {
            suffix += 1;
            id = format!("custom-{}-{}", chrono::Utc::now().timestamp_millis(), suffix);
        }

        let mut number = self.pages.len() + 1;
        let mut path = format!("/page-{}", number);
        while self.pages.iter().any(|p| p.path == path) {
            number += 1;
            path = format!("/page-{}", number);
        }

        self.pages.push(PageEntry {
            id,
            name: "New Page".to_string(),
            path,
            visible: true,
            sort_order: self.pages.len() as i64 + 1,
            is_custom: true,
        });
        self.renumber();
        self.pages.len() - 1
    }

    /// Remove a custom page. Built-in pages are refused.
    ///
    pub fn remove_page(&mut self, index: usize) -> Result<PageEntry, NavigationError> {
        let page = self
            .pages
            .get(index)
            .ok_or(NavigationError::IndexOutOfRange(index))?;
        if page.is_builtin() {
            return Err(NavigationError::BuiltinPage {
                id: page.id.clone(),
            });
        }
        let removed = self.pages.remove(index);
        self.renumber();
        Ok(removed)
    }

    pub fn rename(&mut self, index: usize, name: &str) -> Result<(), NavigationError> {
        self.page_mut(index)?.name = name.to_string();
        Ok(())
    }

    /// Change the path of a custom page.
    ///
    pub fn set_path(&mut self, index: usize, path: &str) -> Result<(), NavigationError> {
        let page = self
            .pages
            .get(index)
            .ok_or(NavigationError::IndexOutOfRange(index))?;
        if page.is_builtin() {
            return Err(NavigationError::BuiltinPage {
                id: page.id.clone(),
            });
        }
        let path = normalize_path(path).ok_or_else(|| NavigationError::InvalidPath(path.to_string()))?;
        if path == "/" {
            return Err(NavigationError::InvalidPath(path));
        }
        if self
            .pages
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && p.path == path)
        {
            return Err(NavigationError::PathTaken(path));
        }
        self.page_mut(index)?.path = path;
        Ok(())
    }

    pub fn toggle_visible(&mut self, index: usize) -> Result<bool, NavigationError> {
        let page = self.page_mut(index)?;
        page.visible = !page.visible;
        Ok(page.visible)
    }
}
