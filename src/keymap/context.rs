//! Context system for inhibit decisions
//!
//! Inhibit hooks decide whether the menu may be shown at all, usually based
//! on which application currently has focus. Focus information is queried
//! lazily, at most once per key event, and only if a hook asks for it.

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use super::node::Menu;

/// Source of information about the currently focused window
pub trait FocusInspector {
    /// Title (or other identity) of the focused window, if it can be determined
    fn focused_title(&self) -> Option<String>;
}

/// Inspector for environments without focus information
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFocus;

impl FocusInspector for NoFocus {
    fn focused_title(&self) -> Option<String> {
        None
    }
}

/// Arguments handed to every inhibit hook for one key event
pub struct InhibitContext<'a> {
    menu: Option<&'a Menu>,
    inspector: &'a dyn FocusInspector,
    title: OnceCell<Option<String>>,
}

impl<'a> InhibitContext<'a> {
    pub fn new(menu: Option<&'a Menu>, inspector: &'a dyn FocusInspector) -> Self {
        Self {
            menu,
            inspector,
            title: OnceCell::new(),
        }
    }

    /// The active menu, or `None` while the resolver is inactive
    pub fn menu(&self) -> Option<&'a Menu> {
        self.menu
    }

    pub fn is_active(&self) -> bool {
        self.menu.is_some()
    }

    /// Focused window title, fetched from the inspector on first use
    pub fn focused_title(&self) -> Option<&str> {
        self.title
            .get_or_init(|| self.inspector.focused_title())
            .as_deref()
    }
}

impl std::fmt::Debug for InhibitContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InhibitContext")
            .field("menu", &self.menu.map(|m| &m.description))
            .field("title", &self.title.get())
            .finish()
    }
}

/// How an inhibit rule compares the focused window title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleMatch {
    /// Title contains the pattern
    TitleContains,
    /// Title equals the pattern exactly
    TitleEquals,
    /// Title starts with the pattern
    TitlePrefix,
}

/// A configured veto: suppress the menu while a matching window has focus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InhibitRule {
    pub when: TitleMatch,
    pub pattern: String,
}

impl InhibitRule {
    pub fn new(when: TitleMatch, pattern: &str) -> Self {
        Self {
            when,
            pattern: pattern.to_string(),
        }
    }

    /// Evaluate this rule against a focused window title
    pub fn matches(&self, title: &str) -> bool {
        match self.when {
            TitleMatch::TitleContains => title.contains(&self.pattern),
            TitleMatch::TitleEquals => title == self.pattern,
            TitleMatch::TitlePrefix => title.starts_with(&self.pattern),
        }
    }

    /// Evaluate all rules (OR logic); no title means no veto
    pub fn any_matches(rules: &[InhibitRule], ctx: &InhibitContext<'_>) -> bool {
        if rules.is_empty() {
            return false;
        }
        let Some(title) = ctx.focused_title() else {
            return false;
        };
        rules.iter().any(|rule| rule.matches(title))
    }
}
