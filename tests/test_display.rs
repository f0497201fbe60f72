mod common;

use alien_invasion::display::{render, Viewport};

use common::{harness, started};

#[test]
fn viewport_keeps_cells_inside_the_border() {
    let h = harness();
    let view = Viewport::new(80, 24, &h.game);
    assert_eq!(view.col(0.0), 1);
    assert_eq!(view.row(0.0), 2);
    assert!(view.col(1000.0) <= 78);
    assert!(view.row(700.0) <= 21);
    assert!(view.col(-50.0) >= 1);
}

#[test]
fn viewport_scales_widths() {
    let h = harness();
    let view = Viewport::new(102, 24, &h.game);
    assert_eq!(view.span(50.0), 5);
    assert_eq!(view.span(1.0), 1);
}

#[test]
fn play_button_is_clickable_at_its_center() {
    let h = harness();
    let view = Viewport::new(80, 24, &h.game);
    let (bx, by, bw) = view.play_button();
    assert!(view.play_button_contains(bx + bw / 2, by));
    assert!(!view.play_button_contains(bx + bw, by));
    assert!(!view.play_button_contains(bx, by + 1));
}

#[test]
fn menu_frame_shows_play_button() {
    let h = harness();
    let view = Viewport::new(80, 24, &h.game);
    let mut out = Vec::new();
    render(&mut out, &h.game, &view).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("PLAY"));
    assert!(text.contains("LEVEL 1"));
}

#[test]
fn active_frame_hides_play_button() {
    let mut h = started();
    h.game.fire_bullet();
    let view = Viewport::new(80, 24, &h.game);
    let mut out = Vec::new();
    render(&mut out, &h.game, &view).unwrap();
    let text = String::from_utf8_lossy(&out);
    assert!(!text.contains("PLAY"));
    assert!(text.contains('║'));
    assert!(text.contains('▲'));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let h = harness();
    let view = Viewport::new(4, 3, &h.game);
    let mut out = Vec::new();
    render(&mut out, &h.game, &view).unwrap();
}
