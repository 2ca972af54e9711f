use super::*;

fn ev(id: u64, kind: PointerKind, button: PointerButton, x: f64, y: f64, time: f64) -> PointerEvent {
    PointerEvent {
        id,
        kind,
        button,
        position: Point::new(x, y),
        time,
        modifiers: Modifiers::default(),
    }
}

fn mouse(x: f64, y: f64, time: f64) -> PointerEvent {
    ev(1, PointerKind::Mouse, PointerButton::Primary, x, y, time)
}

fn touch(id: u64, x: f64, y: f64, time: f64) -> PointerEvent {
    ev(id, PointerKind::Touch, PointerButton::None, x, y, time)
}

fn control() -> OrbitControl {
    OrbitControl::new(&PreviewConfig::default())
}

#[test]
fn starts_at_base_pitch() {
    let c = control();
    assert_eq!(c.yaw(), 0.0);
    assert_eq!(c.pitch(), PreviewConfig::default().base_pitch);
}

#[test]
fn auto_rotate_advances_yaw() {
    let mut c = control();
    assert!(c.advance(1.0));
    assert!((c.yaw() - 0.35).abs() < 1e-12);
    assert!(!c.advance(-1.0));
    c.set_auto_rotate(false);
    assert!(!c.advance(1.0));
    assert!(!c.is_rotating());
}

#[test]
fn mouse_drag_rotates_and_pauses_auto_rotate() {
    let mut c = control();
    assert_eq!(c.pointer_down(&mouse(100.0, 100.0, 0.0)), PointerOutcome::DragStarted);
    assert!(c.is_dragging());
    assert!(!c.advance(1.0));

    let pitch0 = c.pitch();
    assert_eq!(c.pointer_move(&mouse(90.0, 110.0, 0.1)), PointerOutcome::Rotated);
    assert!((c.yaw() - 10.0 * 0.008).abs() < 1e-12);
    assert!((c.pitch() - (pitch0 + 10.0 * 0.008)).abs() < 1e-12);

    assert_eq!(c.pointer_up(&mouse(90.0, 110.0, 0.2)), PointerOutcome::DragEnded);
    assert!(!c.is_dragging());
    assert!(c.advance(0.1));
}

#[test]
fn shift_halves_sensitivity() {
    let mut c = control();
    c.pointer_down(&mouse(0.0, 0.0, 0.0));
    let mut m = mouse(-10.0, 0.0, 0.1);
    m.modifiers.shift = true;
    c.pointer_move(&m);
    assert!((c.yaw() - 10.0 * 0.004).abs() < 1e-12);
}

#[test]
fn pitch_is_clamped() {
    let mut c = control();
    c.pointer_down(&mouse(0.0, 0.0, 0.0));
    c.pointer_move(&mouse(0.0, 10_000.0, 0.1));
    assert!((c.pitch() - PreviewConfig::default().max_pitch).abs() < 1e-12);
    c.pointer_move(&mouse(0.0, -10_000.0, 0.2));
    assert!((c.pitch() - PreviewConfig::default().min_pitch).abs() < 1e-12);
}

#[test]
fn middle_drags_secondary_is_ignored() {
    let mut c = control();
    let right = ev(1, PointerKind::Mouse, PointerButton::Secondary, 0.0, 0.0, 0.0);
    assert_eq!(c.pointer_down(&right), PointerOutcome::Ignored);
    assert!(!c.is_dragging());

    let middle = ev(1, PointerKind::Mouse, PointerButton::Middle, 0.0, 0.0, 0.0);
    assert_eq!(c.pointer_down(&middle), PointerOutcome::DragStarted);
    assert!(c.is_dragging());
}

#[test]
fn moves_from_other_pointers_are_ignored() {
    let mut c = control();
    c.pointer_down(&mouse(0.0, 0.0, 0.0));
    let other = ev(9, PointerKind::Pen, PointerButton::Primary, 50.0, 0.0, 0.1);
    assert_eq!(c.pointer_move(&other), PointerOutcome::Ignored);
    assert_eq!(c.yaw(), 0.0);
}

#[test]
fn single_touch_does_not_rotate() {
    let mut c = control();
    c.pointer_down(&touch(1, 0.0, 0.0, 0.0));
    assert_eq!(c.pointer_move(&touch(1, 50.0, 0.0, 0.1)), PointerOutcome::Ignored);
    assert_eq!(c.yaw(), 0.0);
}

#[test]
fn two_finger_drag_uses_centroid() {
    let mut c = control();
    c.pointer_down(&touch(1, 0.0, 0.0, 0.0));
    assert_eq!(c.pointer_down(&touch(2, 100.0, 0.0, 1.0)), PointerOutcome::DragStarted);

    // Moving one finger by 20 moves the centroid by 10.
    assert_eq!(c.pointer_move(&touch(2, 80.0, 0.0, 1.1)), PointerOutcome::Rotated);
    assert!((c.yaw() - 10.0 * 0.008).abs() < 1e-12);

    assert_eq!(c.pointer_up(&touch(1, 0.0, 0.0, 1.2)), PointerOutcome::DragEnded);
    assert!(!c.is_dragging());
    assert_eq!(c.pointer_move(&touch(2, 0.0, 0.0, 1.3)), PointerOutcome::Ignored);
}

#[test]
fn finger_set_changes_do_not_jump_the_view() {
    let mut c = control();
    c.pointer_down(&touch(1, 100.0, 100.0, 0.0));
    c.pointer_down(&touch(2, 200.0, 100.0, 0.1));
    assert!(c.is_dragging());

    // A third finger far away shifts the centroid but must not rotate.
    assert_eq!(c.pointer_down(&touch(3, 700.0, 100.0, 0.2)), PointerOutcome::Ignored);
    assert_eq!(c.yaw(), 0.0);

    // Three fingers: moving one by 3 px moves the centroid by 1 px.
    c.pointer_move(&touch(1, 97.0, 100.0, 0.3));
    assert!((c.yaw() - 0.008).abs() < 1e-12, "yaw = {}", c.yaw());

    // Lifting back to two fingers keeps the drag without a jump.
    assert_eq!(c.pointer_up(&touch(3, 700.0, 100.0, 0.4)), PointerOutcome::Ignored);
    assert!(c.is_dragging());
    assert!((c.yaw() - 0.008).abs() < 1e-12);

    // Two fingers: moving one by 2 px moves the centroid by 1 px.
    c.pointer_move(&touch(1, 95.0, 100.0, 0.5));
    assert!((c.yaw() - 0.016).abs() < 1e-12, "yaw = {}", c.yaw());
}

#[test]
fn double_click_within_window() {
    let mut c = control();
    c.pointer_down(&mouse(10.0, 10.0, 0.0));
    c.pointer_up(&mouse(10.0, 10.0, 0.05));
    assert_eq!(c.pointer_down(&mouse(14.0, 13.0, 0.2)), PointerOutcome::DoubleTap);
    c.pointer_up(&mouse(14.0, 13.0, 0.25));

    // A third click starts a new pair.
    assert_eq!(c.pointer_down(&mouse(14.0, 13.0, 0.3)), PointerOutcome::DragStarted);
}

#[test]
fn slow_or_distant_clicks_are_not_double() {
    let mut c = control();
    c.pointer_down(&mouse(0.0, 0.0, 0.0));
    c.pointer_up(&mouse(0.0, 0.0, 0.0));
    assert_eq!(c.pointer_down(&mouse(0.0, 0.0, 0.5)), PointerOutcome::DragStarted);
    c.pointer_up(&mouse(0.0, 0.0, 0.5));
    assert_eq!(c.pointer_down(&mouse(30.0, 0.0, 0.6)), PointerOutcome::DragStarted);
}

#[test]
fn double_tap_with_one_finger() {
    let mut c = control();
    c.pointer_down(&touch(1, 5.0, 5.0, 0.0));
    c.pointer_up(&touch(1, 5.0, 5.0, 0.05));
    assert_eq!(c.pointer_down(&touch(2, 6.0, 5.0, 0.2)), PointerOutcome::DoubleTap);
}

#[test]
fn set_angles_and_reset() {
    let mut c = control();
    c.set_angles(1.0, 5.0);
    assert_eq!(c.yaw(), 1.0);
    assert!((c.pitch() - PreviewConfig::default().max_pitch).abs() < 1e-12);
    c.reset();
    assert_eq!(c.yaw(), 0.0);
    assert_eq!(c.pitch(), PreviewConfig::default().base_pitch);
}
