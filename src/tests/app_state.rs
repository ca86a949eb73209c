use super::{AppState, ClickTarget, Intent, View};
use crate::fixtures::{binary_outline, listed_outline};
use crate::presentation::{Expander, ExpanderKind};
use crate::section::{ItemId, NodeId};
use ratatui::crossterm::event::{KeyCode, KeyModifiers};
use rstest::rstest;
use std::path::PathBuf;

fn deck() -> AppState {
    AppState::new(vec![PathBuf::from("deck.md")], listed_outline(), 100)
}

fn child(item: usize) -> Expander {
    Expander {
        item: ItemId(item),
        kind: ExpanderKind::Child,
    }
}

#[test]
fn test_starts_at_root_with_title() {
    let app = deck();

    assert_eq!(app.slide.current(), NodeId(0));
    assert!(app.title_visible);
    assert_eq!(app.current_view, View::Slides);
    assert_eq!(
        app.presentation.shown_regions().collect::<Vec<_>>(),
        vec![NodeId(0)]
    );
}

#[test]
fn test_next_reveals_list_items_before_moving() {
    let mut app = deck();

    assert!(app.on_next());
    assert!(!app.title_visible);
    assert_eq!(app.slide.current(), NodeId(1));

    // one nested list and three siblings to reveal on the agenda
    for _ in 0..4 {
        assert!(app.on_next());
        assert_eq!(app.slide.current(), NodeId(1));
    }

    assert!(app.on_next());
    assert_eq!(app.slide.current(), NodeId(2));

    assert!(!app.on_next());
    assert_eq!(app.slide.current(), NodeId(2));
}

#[test]
fn test_failed_move_keeps_everything() {
    let mut app = deck();
    let before = app.presentation.clone();

    assert!(!app.on_left());
    assert!(!app.on_up());
    assert!(!app.on_prev());
    assert_eq!(app.slide.current(), NodeId(0));
    assert_eq!(app.presentation, before);
}

#[test]
fn test_directional_moves() {
    let mut app = AppState::new(vec![PathBuf::from("talk.md")], binary_outline(), 100);

    assert!(app.on_down());
    assert!(app.on_right());
    assert_eq!(app.slide.current(), NodeId(4));
    assert!(app.on_down());
    assert_eq!(app.slide.current(), NodeId(5));
    assert!(app.on_up());
    assert!(app.on_left());
    assert_eq!(app.slide.current(), NodeId(1));
}

#[test]
fn test_jump_to_missing_section_keeps_slide() {
    let mut app = deck();
    assert!(app.on_jump("1"));
    let before = app.presentation.clone();

    assert!(!app.on_jump("9.9.9"));
    assert_eq!(app.slide.current(), NodeId(1));
    assert_eq!(app.presentation, before);
    assert_eq!(app.message.as_deref(), Some("section 9.9.9 does not exist"));

    assert!(!app.on_jump("a.b"));
    assert_eq!(app.message.as_deref(), Some("\"a.b\" is not a section number"));

    assert!(app.on_jump("2"));
    assert_eq!(app.message, None);
}

#[test]
fn test_expand_never_moves_the_slide() {
    let mut app = deck();

    // the agenda's list is not on the root slide
    assert!(!app.on_expand(child(0)));

    app.on_jump("1");
    assert!(app.on_expand(child(0)));
    assert_eq!(app.slide.current(), NodeId(1));
    assert!(app.presentation.item(ItemId(0)).open);

    assert!(app.on_collapse(child(0)));
    assert_eq!(app.slide.current(), NodeId(1));
    assert!(!app.presentation.item(ItemId(0)).open);
}

#[test]
fn test_click_targets() {
    let mut app = deck();
    app.click_targets = vec![ClickTarget {
        row: 4,
        col_start: 10,
        col_end: 12,
        expander: child(0),
    }];

    assert_eq!(app.expander_at(10, 4), Some(child(0)));
    assert_eq!(app.expander_at(11, 4), Some(child(0)));
    assert_eq!(app.expander_at(12, 4), None);
    assert_eq!(app.expander_at(10, 5), None);
    assert_eq!(app.collapser_at(10, 4), None);
}

#[test]
fn test_jump_prompt() {
    let mut app = deck();

    app.dispatch(Intent::Jump);
    assert_eq!(app.current_view, View::Jump);
    app.jump_buffer.push('2');
    assert!(app.submit_jump());
    assert_eq!(app.current_view, View::Slides);
    assert!(app.jump_buffer.is_empty());
    assert_eq!(app.slide.current(), NodeId(2));

    app.start_jump();
    app.jump_buffer.push('1');
    app.cancel_jump();
    assert_eq!(app.current_view, View::Slides);
    assert_eq!(app.slide.current(), NodeId(2));
}

#[test]
fn test_dispatch_moves() {
    let mut app = deck();

    app.dispatch(Intent::Down);
    assert_eq!(app.slide.current(), NodeId(1));
    app.dispatch(Intent::Right);
    assert_eq!(app.slide.current(), NodeId(2));
    app.dispatch(Intent::Quit);
    assert_eq!(app.slide.current(), NodeId(2));
}

#[rstest]
#[case(KeyCode::Char('n'), KeyModifiers::NONE, Some(Intent::Next))]
#[case(KeyCode::Char(' '), KeyModifiers::NONE, Some(Intent::Next))]
#[case(KeyCode::Char('p'), KeyModifiers::NONE, Some(Intent::Prev))]
#[case(KeyCode::Up, KeyModifiers::NONE, Some(Intent::Up))]
#[case(KeyCode::Char('j'), KeyModifiers::NONE, Some(Intent::Down))]
#[case(KeyCode::Left, KeyModifiers::NONE, Some(Intent::Left))]
#[case(KeyCode::Char('l'), KeyModifiers::NONE, Some(Intent::Right))]
#[case(KeyCode::Char('s'), KeyModifiers::NONE, Some(Intent::Jump))]
#[case(KeyCode::Tab, KeyModifiers::NONE, Some(Intent::NextDocument))]
#[case(KeyCode::BackTab, KeyModifiers::SHIFT, Some(Intent::PrevDocument))]
#[case(KeyCode::Char('q'), KeyModifiers::NONE, Some(Intent::Quit))]
#[case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(Intent::Quit))]
#[case(KeyCode::Char('n'), KeyModifiers::CONTROL, None)]
#[case(KeyCode::Char('x'), KeyModifiers::NONE, None)]
fn test_intent_from_key(
    #[case] code: KeyCode,
    #[case] modifiers: KeyModifiers,
    #[case] expected: Option<Intent>,
) {
    assert_eq!(Intent::from_key(code, modifiers), expected);
}

#[test]
fn test_neighbour_document_wraps() {
    let single = deck();
    assert_eq!(single.neighbour_document(true), None);

    let files = vec![
        PathBuf::from("a.md"),
        PathBuf::from("b.md"),
        PathBuf::from("c.md"),
    ];
    let app = AppState::new(files, listed_outline(), 100);
    assert_eq!(app.neighbour_document(true), Some(1));
    assert_eq!(app.neighbour_document(false), Some(2));
}

#[test]
fn test_open_document_restarts_at_root() {
    let mut app = AppState::new(
        vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
        listed_outline(),
        100,
    );
    app.on_next();
    app.message = Some("stale".to_string());

    app.open_document(1, binary_outline());
    assert_eq!(app.current_file_index, 1);
    assert_eq!(app.slide.current(), NodeId(0));
    assert!(app.title_visible);
    assert_eq!(app.message, None);
    assert_eq!(app.presentation.shown_regions().count(), 1);
}

#[test]
fn test_breadcrumb_and_report() {
    let mut app = deck();
    app.on_jump("1");

    assert_eq!(
        app.breadcrumb(),
        vec![
            (NodeId(0), "Deck".to_string()),
            (NodeId(1), "Agenda".to_string())
        ]
    );

    let report = app.report();
    assert_eq!(report.file, "deck.md");
    assert_eq!(report.title, "Agenda");
    assert_eq!(report.level, 2);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["section"], "1");

    let at_root = deck().report();
    assert!(at_root.section.is_none());
    assert_eq!(at_root.level, 1);
}

#[test]
fn test_prompt_keys() {
    let mut app = deck();
    app.start_jump();

    assert!(!app.on_prompt_key(KeyCode::Char('2'), KeyModifiers::NONE));
    assert!(!app.on_prompt_key(KeyCode::Char('9'), KeyModifiers::NONE));
    assert!(!app.on_prompt_key(KeyCode::Backspace, KeyModifiers::NONE));
    assert_eq!(app.jump_buffer, "2");

    // control chords never reach the buffer
    assert!(!app.on_prompt_key(KeyCode::Char('u'), KeyModifiers::CONTROL));
    assert!(app.on_prompt_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert_eq!(app.jump_buffer, "2");
    assert_eq!(app.current_view, View::Jump);

    assert!(!app.on_prompt_key(KeyCode::Enter, KeyModifiers::NONE));
    assert_eq!(app.current_view, View::Slides);
    assert_eq!(app.slide.current(), NodeId(2));

    app.start_jump();
    app.on_prompt_key(KeyCode::Char('1'), KeyModifiers::NONE);
    app.on_prompt_key(KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(app.current_view, View::Slides);
    assert_eq!(app.slide.current(), NodeId(2));
}
