//! Hook registry: callbacks that observe or veto menu activity
//!
//! Hooks run synchronously on the dispatch thread, in registration order,
//! before the next key event is processed. A slow hook stalls input handling,
//! so hook bodies should hand long work off elsewhere. A panicking hook
//! unwinds out of `Resolver::on_event` and aborts that event.

use super::context::InhibitContext;
use super::node::Menu;

/// Veto callback: returning `true` suppresses the menu
pub type InhibitHook = Box<dyn FnMut(&InhibitContext<'_>) -> bool>;
/// Called with the newly current menu after every menu transition
pub type UpdateHook = Box<dyn FnMut(&Menu)>;
/// Called when the menu should be shown (`true`) or hidden (`false`)
pub type ShowHook = Box<dyn FnMut(bool)>;

/// Append-only sets of inhibit, update and show hooks
#[derive(Default)]
pub struct HookRegistry {
    inhibit: Vec<InhibitHook>,
    update: Vec<UpdateHook>,
    show: Vec<ShowHook>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_inhibit(&mut self, hook: impl FnMut(&InhibitContext<'_>) -> bool + 'static) {
        self.inhibit.push(Box::new(hook));
    }

    pub fn add_update(&mut self, hook: impl FnMut(&Menu) + 'static) {
        self.update.push(Box::new(hook));
    }

    pub fn add_show(&mut self, hook: impl FnMut(bool) + 'static) {
        self.show.push(Box::new(hook));
    }

    /// Run every inhibit hook; the result is `true` if any of them vetoed
    ///
    /// All hooks run even after the first veto.
    pub fn run_inhibit(&mut self, ctx: &InhibitContext<'_>) -> bool {
        self.inhibit
            .iter_mut()
            .fold(false, |veto, hook| hook(ctx) || veto)
    }

    pub fn run_update(&mut self, menu: &Menu) {
        for hook in &mut self.update {
            hook(menu);
        }
    }

    pub fn run_show(&mut self, display: bool) {
        for hook in &mut self.show {
            hook(display);
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("inhibit", &self.inhibit.len())
            .field("update", &self.update.len())
            .field("show", &self.show.len())
            .finish()
    }
}
