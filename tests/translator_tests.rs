use offscreen_gui::core::{
    translate, DisplayGeometry, InputState, ModifierFlags, NamedKey, RemoteEvent, Transition,
};

fn event(json: &str) -> RemoteEvent {
    RemoteEvent::from_json(json).unwrap()
}

fn apply(state: &mut InputState, json: &str) -> Transition {
    translate(state, &event(json), None)
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_uses_reported_ratio() {
    let mut state = InputState::new();
    let transition = apply(
        &mut state,
        r#"{"event_type":"resize","width":333,"height":101,"pixel_ratio":1.5}"#,
    );

    match transition {
        Transition::Resize {
            geometry,
            reported_ratio,
        } => {
            assert_eq!(geometry, DisplayGeometry::new(333.0, 101.0, 1.5));
            assert_eq!(geometry.physical_size(), (500, 152));
            assert_eq!(reported_ratio, Some(1.5));
        }
        other => panic!("expected resize, got {:?}", other),
    }
}

#[test]
fn test_resize_override_wins() {
    let mut state = InputState::new();
    let transition = translate(
        &mut state,
        &event(r#"{"event_type":"resize","width":100,"height":50,"pixel_ratio":1.0}"#),
        Some(2.0),
    );

    match transition {
        Transition::Resize {
            geometry,
            reported_ratio,
        } => {
            assert_eq!(geometry.pixel_ratio, 2.0);
            assert_eq!(geometry.physical_size(), (200, 100));
            assert_eq!(reported_ratio, Some(1.0));
        }
        other => panic!("expected resize, got {:?}", other),
    }
}

#[test]
fn test_resize_without_ratio_defaults_to_one() {
    let mut state = InputState::new();
    let transition = apply(&mut state, r#"{"event_type":"resize","width":64,"height":48}"#);

    match transition {
        Transition::Resize { geometry, .. } => {
            assert_eq!(geometry.physical_size(), (64, 48));
        }
        other => panic!("expected resize, got {:?}", other),
    }
}

#[test]
fn test_resize_leaves_input_untouched() {
    let mut state = InputState::new();
    state.set_pointer(4.0, 5.0);
    let before = state.clone();

    apply(&mut state, r#"{"event_type":"resize","width":64,"height":48}"#);

    assert_eq!(state, before);
}

// ============================================================================
// Pointer
// ============================================================================

#[test]
fn test_pointer_move_is_verbatim() {
    let mut state = InputState::new();
    let transition = apply(&mut state, r#"{"event_type":"pointer_move","x":12.5,"y":-3}"#);

    assert_eq!(transition, Transition::Redraw);
    assert_eq!(state.pointer(), Some((12.5, -3.0)));
}

#[test]
fn test_buttons_map_to_slots() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"pointer_down","x":1,"y":1,"buttons":[1,3]}"#,
    );

    assert_eq!(state.pressed_buttons(), vec![0, 2]);
    assert!(state.is_button_down(0));
    assert!(!state.is_button_down(1));
    assert!(state.is_button_down(2));
}

#[test]
fn test_buttons_are_complete_set() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"pointer_down","x":1,"y":1,"buttons":[1,2]}"#,
    );
    apply(
        &mut state,
        r#"{"event_type":"pointer_up","x":1,"y":1,"buttons":[2]}"#,
    );

    assert_eq!(state.pressed_buttons(), vec![1]);
}

#[test]
fn test_out_of_range_buttons_ignored() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"pointer_down","x":1,"y":1,"buttons":[0,5,6]}"#,
    );

    assert_eq!(state.pressed_buttons(), vec![4]);
}

#[test]
fn test_absent_buttons_keep_state() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"pointer_down","x":1,"y":1,"buttons":[1]}"#,
    );
    apply(&mut state, r#"{"event_type":"pointer_up","x":2,"y":2}"#);

    assert_eq!(state.pressed_buttons(), vec![0]);
    assert_eq!(state.pointer(), Some((2.0, 2.0)));
}

#[test]
fn test_negative_coordinates_keep_position() {
    let mut state = InputState::new();
    apply(&mut state, r#"{"event_type":"pointer_move","x":10,"y":20}"#);

    let transition = apply(
        &mut state,
        r#"{"event_type":"pointer_down","x":-1,"y":5,"buttons":[1]}"#,
    );

    assert_eq!(transition, Transition::Redraw);
    assert_eq!(state.pointer(), Some((10.0, 20.0)));
    // Buttons still apply
    assert_eq!(state.pressed_buttons(), vec![0]);
}

#[test]
fn test_first_touch_wins() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"pointer_down","x":1,"y":1,
            "touches":{"5":{"x":30,"y":40},"1":{"x":70,"y":80}}}"#,
    );

    assert_eq!(state.pointer(), Some((30.0, 40.0)));
}

#[test]
fn test_negative_touch_is_ignored() {
    let mut state = InputState::new();
    state.set_pointer(3.0, 3.0);
    apply(
        &mut state,
        r#"{"event_type":"pointer_up","x":9,"y":9,"touches":[{"x":-2,"y":4}]}"#,
    );

    assert_eq!(state.pointer(), Some((3.0, 3.0)));
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_named_key_sets_slot() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"key","key":"ArrowLeft","pressed":true,"modifiers":["Shift"]}"#,
    );

    assert!(state.is_key_down(NamedKey::ArrowLeft));
    assert_eq!(
        state.modifiers(),
        ModifierFlags {
            shift: true,
            ..Default::default()
        }
    );

    apply(
        &mut state,
        r#"{"event_type":"key","key":"ArrowLeft","pressed":false}"#,
    );
    assert!(!state.is_key_down(NamedKey::ArrowLeft));
}

#[test]
fn test_unmapped_key_still_updates_modifiers() {
    let mut state = InputState::new();
    apply(
        &mut state,
        r#"{"event_type":"key","key":"Enter","pressed":true,"modifiers":["Control","Alt"]}"#,
    );

    let transition = apply(
        &mut state,
        r#"{"event_type":"key","key":"q","pressed":true,"modifiers":["Meta"]}"#,
    );

    assert_eq!(transition, Transition::Redraw);
    assert_eq!(state.pressed_keys(), vec![NamedKey::Enter]);
    assert_eq!(
        state.modifiers(),
        ModifierFlags {
            super_key: true,
            ..Default::default()
        }
    );
}

#[test]
fn test_every_table_key_maps() {
    for name in [
        "ArrowLeft",
        "ArrowRight",
        "ArrowUp",
        "ArrowDown",
        "Enter",
        "Escape",
        "Tab",
        "Backspace",
        "Delete",
        "Space",
        "Home",
        "End",
        "PageUp",
        "PageDown",
    ] {
        let mut state = InputState::new();
        let json = format!(r#"{{"event_type":"key","key":"{}","pressed":true}}"#, name);
        apply(&mut state, &json);

        let key = NamedKey::from_name(name).unwrap();
        assert!(state.is_key_down(key), "{}", name);
        assert_eq!(state.pressed_keys().len(), 1, "{}", name);
    }
}

#[test]
fn test_unknown_event_is_noop() {
    let mut state = InputState::new();
    let before = state.clone();

    let transition = apply(&mut state, r#"{"event_type":"scroll","dy":3}"#);

    assert_eq!(transition, Transition::Ignored);
    assert!(!transition.needs_redraw());
    assert_eq!(state, before);
}
