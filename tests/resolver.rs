//! Resolver behaviour through the public API

mod common;

use common::{
    press, recording_resolver, release, tap, test_menu, test_resolver, Recorded, Recorder,
};
use whichkey::keymap::{
    Command, KeyToken, Menu, RegisterError, Resolver, ResolverConfig, Signal,
};

// ============================================================================
// Trie construction
// ============================================================================

#[test]
fn test_duplicate_registration_leaves_trie_unchanged() {
    let mut root = test_menu();
    let before = root.clone();

    let err = root
        .register(&[KeyToken::Char('g')], Command::new('s', "Again", "true").into())
        .unwrap_err();

    assert!(matches!(err, RegisterError::DuplicateKey { .. }));
    assert_eq!(root, before);
}

#[test]
fn test_registration_below_command_leaves_trie_unchanged() {
    let mut root = test_menu();
    let before = root.clone();

    let path = [KeyToken::Char('g'), KeyToken::Char('s'), KeyToken::Char('x')];
    let err = root
        .register(&path, Command::new('y', "Deep", "true").into())
        .unwrap_err();

    assert_eq!(
        err,
        RegisterError::TypeMismatch {
            path: vec![KeyToken::Char('g'), KeyToken::Char('s')]
        }
    );
    assert_eq!(root, before);
}

#[test]
fn test_children_order_independent_of_registration_order() {
    let keys = ['q', 'b', 'z', 'a', 'm'];

    let mut forward = Menu::root(KeyToken::SPACE);
    for key in keys {
        forward
            .register(&[], Command::new(key, "", "").into())
            .unwrap();
    }
    let mut backward = Menu::root(KeyToken::SPACE);
    for key in keys.iter().rev() {
        backward
            .register(&[], Command::new(*key, "", "").into())
            .unwrap();
    }

    let order = |menu: &Menu| menu.children_sorted().map(|n| n.key()).collect::<Vec<_>>();
    assert_eq!(order(&forward), order(&backward));
    assert_eq!(
        order(&forward),
        ['a', 'b', 'm', 'q', 'z'].map(KeyToken::Char).to_vec()
    );
}

#[test]
fn test_uppercase_and_lowercase_are_distinct_keys() {
    let root = Menu::root(KeyToken::SPACE)
        .with(Command::new('s', "Lower", "lower"))
        .unwrap()
        .with(Command::new('S', "Upper", "upper"))
        .unwrap();
    assert_eq!(root.len(), 2);
}

// ============================================================================
// Activation and navigation
// ============================================================================

#[test]
fn test_leader_activates_root_menu() {
    let (mut resolver, recorder) = test_resolver();

    press(&mut resolver, KeyToken::SPACE);

    assert!(resolver.is_active());
    assert!(resolver.is_displaying());
    assert_eq!(
        recorder.take(),
        vec![Recorded::Show(true), Recorded::Update("Root menu".to_string())]
    );
}

#[test]
fn test_keys_while_inactive_are_ignored() {
    let (mut resolver, recorder) = test_resolver();

    tap(&mut resolver, 'a');
    tap(&mut resolver, 'g');
    tap(&mut resolver, KeyToken::ESCAPE);

    assert!(!resolver.is_active());
    assert!(recorder.take().is_empty());
}

#[test]
fn test_unknown_key_cancels_without_update() {
    let (mut resolver, recorder) = test_resolver();
    tap(&mut resolver, KeyToken::SPACE);
    recorder.take();

    press(&mut resolver, 'x');

    assert!(!resolver.is_active());
    assert_eq!(recorder.take(), vec![Recorded::Show(false)]);
}

#[test]
fn test_command_selection_runs_once_and_closes() {
    let (mut resolver, recorder) = test_resolver();
    tap(&mut resolver, KeyToken::SPACE);
    recorder.take();

    tap(&mut resolver, 'a');

    assert!(!resolver.is_active());
    assert_eq!(
        recorder.take(),
        vec![
            Recorded::Show(false),
            Recorded::Execute {
                description: "Echo".to_string(),
                payload: "ECHO".to_string()
            }
        ]
    );
}

#[test]
fn test_nested_menus_update_on_each_level() {
    let (mut resolver, recorder) = test_resolver();

    for key in [KeyToken::SPACE, KeyToken::Char('g'), KeyToken::Char('r')] {
        tap(&mut resolver, key);
    }
    assert_eq!(
        resolver.cursor_path(),
        Some(&[KeyToken::Char('g'), KeyToken::Char('r')][..])
    );
    assert_eq!(recorder.updates(), vec!["Root menu", "Git", "Remote"]);

    tap(&mut resolver, 'p');
    assert_eq!(recorder.payloads(), vec!["git push"]);
    assert_eq!(recorder.shows(), vec![true, false]);
}

#[test]
fn test_quit_closes_menu_at_any_depth() {
    let (mut resolver, recorder) = test_resolver();
    tap(&mut resolver, KeyToken::SPACE);
    tap(&mut resolver, 'g');

    tap(&mut resolver, KeyToken::ESCAPE);

    assert!(!resolver.is_active());
    assert!(recorder.payloads().is_empty());
    assert_eq!(recorder.shows(), vec![true, false]);
}

#[test]
fn test_leader_while_active_cancels_when_unbound() {
    let (mut resolver, recorder) = test_resolver();
    tap(&mut resolver, KeyToken::SPACE);
    recorder.take();

    press(&mut resolver, KeyToken::SPACE);

    assert!(!resolver.is_active());
    assert_eq!(recorder.take(), vec![Recorded::Show(false)]);
}

#[test]
fn test_leader_while_active_navigates_when_bound() {
    let root = Menu::root(KeyToken::SPACE)
        .with(Command::new(KeyToken::SPACE, "Again", "again"))
        .unwrap();
    let (mut resolver, recorder) = recording_resolver(root, ResolverConfig::default());

    tap(&mut resolver, KeyToken::SPACE);
    tap(&mut resolver, KeyToken::SPACE);

    assert_eq!(recorder.payloads(), vec!["again"]);
}

#[test]
fn test_empty_menu_stays_open_until_next_key() {
    let (mut resolver, recorder) = test_resolver();
    tap(&mut resolver, KeyToken::SPACE);
    tap(&mut resolver, 'e');

    assert!(resolver.is_active());
    assert!(resolver.current_menu().unwrap().is_empty());

    press(&mut resolver, 'a');
    assert!(!resolver.is_active());
    assert!(recorder.payloads().is_empty());
}

#[test]
fn test_empty_root_menu() {
    let root = Menu::root(KeyToken::SPACE);
    let (mut resolver, recorder) = recording_resolver(root, ResolverConfig::default());

    tap(&mut resolver, KeyToken::SPACE);
    assert!(resolver.is_displaying());

    tap(&mut resolver, 'a');
    assert!(!resolver.is_displaying());
    assert_eq!(recorder.shows(), vec![true, false]);
}

#[test]
fn test_show_hooks_fire_only_on_change() {
    let (mut resolver, recorder) = test_resolver();

    // Closing twice in a row without opening in between
    tap(&mut resolver, KeyToken::SPACE);
    tap(&mut resolver, KeyToken::ESCAPE);
    tap(&mut resolver, KeyToken::ESCAPE);
    // Reopen and walk deeper without closing
    tap(&mut resolver, KeyToken::SPACE);
    tap(&mut resolver, 'g');
    tap(&mut resolver, 'r');

    assert_eq!(recorder.shows(), vec![true, false, true]);
}

#[test]
fn test_modifier_press_is_inert_in_menu() {
    let (mut resolver, recorder) = test_resolver();
    tap(&mut resolver, KeyToken::SPACE);

    press(&mut resolver, KeyToken::SHIFT);
    assert!(resolver.is_active());
    release(&mut resolver, KeyToken::SHIFT);

    tap(&mut resolver, 'a');
    assert_eq!(recorder.payloads(), vec!["ECHO"]);
}

#[test]
fn test_shift_chord_reaches_uppercase_binding() {
    let root = Menu::root(KeyToken::SPACE)
        .with(Command::new('s', "Lower", "lower"))
        .unwrap()
        .with(Command::new('S', "Upper", "upper"))
        .unwrap();
    let (mut resolver, recorder) = recording_resolver(root, ResolverConfig::default());

    tap(&mut resolver, KeyToken::SPACE);
    press(&mut resolver, KeyToken::SHIFT);
    tap(&mut resolver, 'S');
    release(&mut resolver, KeyToken::SHIFT);

    assert_eq!(recorder.payloads(), vec!["upper"]);
}

#[test]
fn test_bound_modifier_navigates() {
    let root = Menu::root(KeyToken::SPACE)
        .with(Command::new(KeyToken::ALT, "Alt action", "alt"))
        .unwrap();
    let (mut resolver, recorder) = recording_resolver(root, ResolverConfig::default());

    tap(&mut resolver, KeyToken::SPACE);
    press(&mut resolver, KeyToken::ALT);

    assert!(!resolver.is_active());
    assert_eq!(recorder.payloads(), vec!["alt"]);
}

#[test]
fn test_releases_do_not_navigate() {
    let (mut resolver, recorder) = test_resolver();
    press(&mut resolver, KeyToken::SPACE);
    recorder.take();

    release(&mut resolver, 'a');
    release(&mut resolver, 'x');

    assert!(resolver.is_active());
    assert!(recorder.take().is_empty());
}

// ============================================================================
// Inhibit hooks
// ============================================================================

#[test]
fn test_inhibit_vetoes_leader() {
    let (mut resolver, recorder) = test_resolver();
    resolver.add_inhibit(|_| true);

    press(&mut resolver, KeyToken::SPACE);

    assert!(!resolver.is_active());
    assert!(!resolver.is_displaying());
    assert!(recorder.take().is_empty());
}

#[test]
fn test_inhibit_mid_session_closes_menu() {
    let (mut resolver, recorder) = test_resolver();
    let veto = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = std::rc::Rc::clone(&veto);
    resolver.add_inhibit(move |_| flag.get());

    tap(&mut resolver, KeyToken::SPACE);
    veto.set(true);
    press(&mut resolver, 'a');

    assert!(!resolver.is_active());
    assert!(recorder.payloads().is_empty());
    assert_eq!(recorder.shows(), vec![true, false]);
}

#[test]
fn test_every_inhibit_hook_runs() {
    let (mut resolver, _recorder) = test_resolver();
    let calls = std::rc::Rc::new(std::cell::Cell::new(0));

    for veto in [true, false] {
        let calls = std::rc::Rc::clone(&calls);
        resolver.add_inhibit(move |_| {
            calls.set(calls.get() + 1);
            veto
        });
    }

    press(&mut resolver, KeyToken::SPACE);
    assert_eq!(calls.get(), 2);
    assert!(!resolver.is_active());
}

#[test]
fn test_inhibit_sees_active_menu() {
    let (mut resolver, _recorder) = test_resolver();
    let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = std::rc::Rc::clone(&seen);
    resolver.add_inhibit(move |ctx| {
        log.borrow_mut()
            .push(ctx.menu().map(|menu| menu.description.clone()));
        false
    });

    press(&mut resolver, KeyToken::SPACE);
    press(&mut resolver, 'g');

    assert_eq!(
        *seen.borrow(),
        vec![None, Some("Root menu".to_string())]
    );
}

// ============================================================================
// Stop combo
// ============================================================================

#[test]
fn test_stop_combo_terminates_once() {
    let (mut resolver, _recorder) = test_resolver();

    press(&mut resolver, KeyToken::CTRL);
    press(&mut resolver, 'c');
    assert_eq!(release(&mut resolver, 'c'), Signal::Terminate);
    assert_eq!(release(&mut resolver, KeyToken::CTRL), Signal::Continue);
}

#[test]
fn test_stop_combo_requires_modifier() {
    let (mut resolver, _recorder) = test_resolver();
    assert_eq!(tap(&mut resolver, 'c'), Signal::Continue);
}

#[test]
fn test_stop_combo_rejects_extra_modifiers() {
    let (mut resolver, _recorder) = test_resolver();

    press(&mut resolver, KeyToken::CTRL);
    press(&mut resolver, KeyToken::ALT);
    assert_eq!(tap(&mut resolver, 'c'), Signal::Continue);
}

#[test]
fn test_custom_stop_combo() {
    let config = ResolverConfig::new(
        KeyToken::SPACE,
        KeyToken::ESCAPE,
        [KeyToken::ALT, KeyToken::SHIFT, KeyToken::Char('q')],
    );
    let (mut resolver, _recorder) = recording_resolver(test_menu(), config);

    press(&mut resolver, KeyToken::SHIFT);
    press(&mut resolver, KeyToken::ALT);
    assert_eq!(tap(&mut resolver, 'q'), Signal::Terminate);
}

// ============================================================================
// Custom key policy
// ============================================================================

#[test]
fn test_custom_leader_and_quit() {
    let config = ResolverConfig::new(
        KeyToken::Char(';'),
        KeyToken::Char('q'),
        [KeyToken::CTRL, KeyToken::Char('c')],
    );
    let (mut resolver, recorder) = recording_resolver(test_menu(), config);

    tap(&mut resolver, KeyToken::SPACE);
    assert!(!resolver.is_active());

    tap(&mut resolver, ';');
    tap(&mut resolver, 'q');
    assert!(!resolver.is_active());
    assert_eq!(recorder.shows(), vec![true, false]);
}

#[test]
fn test_resolver_is_reusable_after_command() {
    let (mut resolver, recorder) = test_resolver();

    for _ in 0..3 {
        tap(&mut resolver, KeyToken::SPACE);
        tap(&mut resolver, 'g');
        tap(&mut resolver, 's');
    }

    assert_eq!(recorder.payloads(), vec!["git status"; 3]);
}

#[test]
fn test_executor_sees_description_and_payload() {
    let recorder = Recorder::default();
    let mut resolver = Resolver::new(ResolverConfig::default(), test_menu(), recorder.clone());

    tap(&mut resolver, KeyToken::SPACE);
    tap(&mut resolver, 'a');

    assert_eq!(
        recorder.take(),
        vec![Recorded::Execute {
            description: "Echo".to_string(),
            payload: "ECHO".to_string()
        }]
    );
}
