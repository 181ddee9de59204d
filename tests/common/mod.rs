//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use whichkey::keymap::{Command, Executor, KeyEvent, KeyToken, Menu, Resolver, ResolverConfig, Signal};

/// Something a hook or the executor reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Show(bool),
    /// Update hook fired with the menu of this description
    Update(String),
    Execute { description: String, payload: String },
}

/// Records hook and executor calls in order
#[derive(Debug, Clone, Default)]
pub struct Recorder(Rc<RefCell<Vec<Recorded>>>);

impl Recorder {
    pub fn push(&self, entry: Recorded) {
        self.0.borrow_mut().push(entry);
    }

    pub fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn shows(&self) -> Vec<bool> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Recorded::Show(display) => Some(*display),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Recorded::Update(description) => Some(description.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|r| match r {
                Recorded::Execute { payload, .. } => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Executor for Recorder {
    fn execute(&self, description: &str, payload: &str) {
        self.push(Recorded::Execute {
            description: description.to_string(),
            payload: payload.to_string(),
        });
    }
}

/// Root menu used by most tests:
///
/// ```text
/// a    Echo        (command ECHO)
/// e    Empty       (menu, no entries)
/// g    Git         (menu)
///   s  Status      (command git status)
///   r  Remote      (menu)
///     p Push       (command git push)
/// ```
pub fn test_menu() -> Menu {
    let mut root = Menu::root(KeyToken::SPACE);
    let g = KeyToken::Char('g');
    let r = KeyToken::Char('r');

    root.register(&[], Command::new('a', "Echo", "ECHO").into())
        .unwrap();
    root.register(&[], Menu::new('e', "Empty").into()).unwrap();
    root.register(&[], Menu::new(g, "Git").into()).unwrap();
    root.register(&[g], Command::new('s', "Status", "git status").into())
        .unwrap();
    root.register(&[g], Menu::new(r, "Remote").into()).unwrap();
    root.register(&[g, r], Command::new('p', "Push", "git push").into())
        .unwrap();
    root
}

/// Resolver over `menu` with recording show/update hooks and executor
pub fn recording_resolver(menu: Menu, config: ResolverConfig) -> (Resolver, Recorder) {
    let recorder = Recorder::default();
    let mut resolver = Resolver::new(config, menu, recorder.clone());

    let show = recorder.clone();
    resolver.add_show(move |display| show.push(Recorded::Show(display)));
    let update = recorder.clone();
    resolver.add_update(move |menu| update.push(Recorded::Update(menu.description.clone())));

    (resolver, recorder)
}

/// Default resolver over [`test_menu`]
pub fn test_resolver() -> (Resolver, Recorder) {
    recording_resolver(test_menu(), ResolverConfig::default())
}

pub fn press(resolver: &mut Resolver, token: impl Into<KeyToken>) -> Signal {
    resolver.on_event(KeyEvent::press(token))
}

pub fn release(resolver: &mut Resolver, token: impl Into<KeyToken>) -> Signal {
    resolver.on_event(KeyEvent::release(token))
}

/// Press then release
pub fn tap(resolver: &mut Resolver, token: impl Into<KeyToken>) -> Signal {
    let token = token.into();
    press(resolver, token);
    release(resolver, token)
}
