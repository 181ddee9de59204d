//! Resolver state machine: walks the menu trie as key events arrive
//!
//! The resolver is either inactive or positioned on one menu. Pressing the
//! leader key while inactive opens the root menu; every further press selects
//! a child of the current menu. Choosing a command runs it and closes the
//! menu, anything unbound closes the menu without running anything.

use std::collections::BTreeSet;

use super::command::{self, Executor};
use super::context::{FocusInspector, InhibitContext, InhibitRule, NoFocus};
use super::hooks::HookRegistry;
use super::node::{Menu, Node};
use super::types::{KeyEvent, KeyEventKind, KeyToken, Modifiers};

/// Static key policy of a resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Opens the root menu while inactive
    pub leader: KeyToken,
    /// Closes the menu while active
    pub quit: KeyToken,
    /// Held modifiers plus released key that end the capture session
    pub stop_combo: BTreeSet<KeyToken>,
}

impl ResolverConfig {
    pub fn new(
        leader: KeyToken,
        quit: KeyToken,
        stop_combo: impl IntoIterator<Item = KeyToken>,
    ) -> Self {
        Self {
            leader,
            quit,
            stop_combo: stop_combo.into_iter().collect(),
        }
    }

    /// Check if releasing `released` while `held` are down completes the stop combo
    pub fn is_stop(&self, held: Modifiers, released: KeyToken) -> bool {
        let mut keys: BTreeSet<KeyToken> = held.iter().map(KeyToken::Modifier).collect();
        keys.insert(released);
        keys == self.stop_combo
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(
            KeyToken::SPACE,
            KeyToken::ESCAPE,
            [KeyToken::CTRL, KeyToken::Char('c')],
        )
    }
}

/// What the capture source should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep delivering events
    Continue,
    /// The stop combo was released; stop capturing input
    Terminate,
}

/// Which-key state machine
///
/// The menu trie is moved in at construction and never mutated afterwards,
/// so all registration has to happen on the [`Menu`] beforehand.
pub struct Resolver {
    config: ResolverConfig,
    root: Menu,
    /// Path from the root to the active menu; `None` while inactive
    cursor: Option<Vec<KeyToken>>,
    held: Modifiers,
    displaying: bool,
    hooks: HookRegistry,
    inspector: Box<dyn FocusInspector>,
    executor: Box<dyn Executor>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, root: Menu, executor: impl Executor + 'static) -> Self {
        Self {
            config,
            root,
            cursor: None,
            held: Modifiers::NONE,
            displaying: false,
            hooks: HookRegistry::new(),
            inspector: Box::new(NoFocus),
            executor: Box::new(executor),
        }
    }

    /// Use `inspector` to answer focus queries from inhibit hooks
    pub fn with_focus_inspector(mut self, inspector: impl FocusInspector + 'static) -> Self {
        self.inspector = Box::new(inspector);
        self
    }

    pub fn add_inhibit(&mut self, hook: impl FnMut(&InhibitContext<'_>) -> bool + 'static) {
        self.hooks.add_inhibit(hook);
    }

    /// Veto the menu whenever the focused window matches any of `rules`
    pub fn add_inhibit_rules(&mut self, rules: Vec<InhibitRule>) {
        if rules.is_empty() {
            return;
        }
        self.hooks
            .add_inhibit(move |ctx| InhibitRule::any_matches(&rules, ctx));
    }

    pub fn add_update(&mut self, hook: impl FnMut(&Menu) + 'static) {
        self.hooks.add_update(hook);
    }

    pub fn add_show(&mut self, hook: impl FnMut(bool) + 'static) {
        self.hooks.add_show(hook);
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn root(&self) -> &Menu {
        &self.root
    }

    pub fn is_active(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn is_displaying(&self) -> bool {
        self.displaying
    }

    pub fn held_modifiers(&self) -> Modifiers {
        self.held
    }

    /// Keys pressed since the leader, if a menu is active
    pub fn cursor_path(&self) -> Option<&[KeyToken]> {
        self.cursor.as_deref()
    }

    /// The active menu, if any
    pub fn current_menu(&self) -> Option<&Menu> {
        active_menu(&self.root, &self.cursor)
    }

    /// Feed one key event into the state machine
    pub fn on_event(&mut self, event: KeyEvent) -> Signal {
        match event.kind {
            KeyEventKind::Press => {
                self.on_press(event.token);
                Signal::Continue
            }
            KeyEventKind::Release => self.on_release(event.token),
        }
    }

    fn on_press(&mut self, token: KeyToken) {
        if let Some(modifier) = token.modifier() {
            self.held.insert(modifier);
        }

        if self.inhibited() {
            tracing::debug!("Key {} vetoed by inhibit hook", token);
            self.deactivate();
            return;
        }

        match self.cursor.take() {
            Some(path) => self.advance(path, token),
            None if token == self.config.leader => self.activate(),
            None => {}
        }
    }

    fn on_release(&mut self, token: KeyToken) -> Signal {
        if let Some(modifier) = token.modifier() {
            self.held.remove(modifier);
        }

        if self.config.is_stop(self.held, token) {
            tracing::info!("Stop combo released ({} + {}), terminating", self.held, token);
            return Signal::Terminate;
        }
        Signal::Continue
    }

    fn inhibited(&mut self) -> bool {
        let ctx = InhibitContext::new(active_menu(&self.root, &self.cursor), &*self.inspector);
        self.hooks.run_inhibit(&ctx)
    }

    fn activate(&mut self) {
        tracing::debug!("Leader pressed, opening root menu");
        self.cursor = Some(Vec::new());
        self.set_displaying(true);
        self.hooks.run_update(&self.root);
    }

    fn deactivate(&mut self) {
        self.cursor = None;
        self.set_displaying(false);
    }

    /// Handle a press while the menu at `path` is active
    fn advance(&mut self, mut path: Vec<KeyToken>, token: KeyToken) {
        if token == self.config.quit {
            tracing::debug!("Quit key pressed, closing menu");
            self.deactivate();
            return;
        }

        let Some(menu) = self.root.menu_at(&path) else {
            self.deactivate();
            return;
        };

        match menu.lookup_child(&token) {
            Some(Node::Menu(next)) => {
                tracing::debug!("Entering menu '{}'", next.description);
                path.push(token);
                self.cursor = Some(path);
                self.hooks.run_update(next);
            }
            Some(Node::Command(selected)) => {
                let selected = selected.clone();
                self.deactivate();
                command::execute(&*self.executor, &selected);
            }
            // Policy: an unbound modifier does not cancel the menu, so that
            // chords like Shift+S can reach a binding for 'S'
            None if token.is_modifier() => self.cursor = Some(path),
            None => {
                tracing::debug!("No entry for {} in '{}', closing menu", token, menu.description);
                self.deactivate();
            }
        }
    }

    /// Fire show hooks only when the display state actually changes
    fn set_displaying(&mut self, display: bool) {
        if self.displaying == display {
            return;
        }
        self.displaying = display;
        self.hooks.run_show(display);
    }
}

fn active_menu<'a>(root: &'a Menu, cursor: &Option<Vec<KeyToken>>) -> Option<&'a Menu> {
    root.menu_at(cursor.as_deref()?)
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("cursor", &self.cursor)
            .field("held", &self.held)
            .field("displaying", &self.displaying)
            .field("hooks", &self.hooks)
            .finish()
    }
}
