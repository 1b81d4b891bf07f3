use super::*;

fn cell(value: &str) -> Character {
    Character::new(0, value, CharKind::Body, None, Rect::new(0.0, 0.0, 10.0, 18.0), 0.0)
}

fn visible(c: &mut Character) {
    c.flags.transition_in = true;
    c.flags.hover = true;
    c.flags.body_revealed = true;
}

#[test]
fn target_opacity_priority() {
    let mut c = cell("a");
    assert_eq!(c.target_opacity(), 0.0);

    visible(&mut c);
    assert_eq!(c.target_opacity(), 1.0);

    c.flags.hover = false;
    assert_eq!(c.target_opacity(), 0.0);

    c.flags.lit = true;
    assert_eq!(c.target_opacity(), 0.0, "per-frame lit only drives brightness");

    c.flags.light = true;
    assert_eq!(c.target_opacity(), 1.0);

    c.flags.transition_out = true;
    assert_eq!(c.target_opacity(), 0.0);
}

#[test]
fn fade_out_is_fast_and_starts_at_half() {
    let fade = FadeTuning::default();
    let mut c = cell("a");
    c.opacity = 1.0;
    c.update(fade.fade_out / 4.0, &fade);
    assert!((c.opacity - 0.25).abs() < 1e-9);
    c.update(fade.fade_out, &fade);
    assert_eq!(c.opacity, 0.0);
}

#[test]
fn fade_in_never_overshoots() {
    let fade = FadeTuning::default();
    let mut c = cell("a");
    visible(&mut c);
    c.update(fade.fade_in / 2.0, &fade);
    assert!((c.opacity - 0.5).abs() < 1e-9);
    for _ in 0..10 {
        c.update(1.0 / 60.0, &fade);
        assert!(c.opacity <= 1.0);
    }
    assert_eq!(c.opacity, 1.0);
}

#[test]
fn light_brightness_rises_and_decays_exponentially() {
    let fade = FadeTuning::default();
    let mut c = cell(" ");
    c.flags.lit = true;
    c.update(fade.light_rise_half_life, &fade);
    assert!((c.light_brightness - 0.5).abs() < 1e-9);
    c.update(fade.light_rise_half_life, &fade);
    assert!((c.light_brightness - 0.75).abs() < 1e-9);

    c.flags.lit = false;
    c.update(fade.light_decay_half_life, &fade);
    assert!((c.light_brightness - 0.375).abs() < 1e-9);
}

#[test]
fn a_lit_cell_stays_visible_after_its_light_goes_out() {
    let fade = FadeTuning::default();
    let mut c = cell(" ");
    c.flags.lit = true;
    c.flags.light = true;
    for _ in 0..30 {
        c.update(1.0 / 60.0, &fade);
    }
    assert_eq!(c.opacity, 1.0);

    c.flags.lit = false;
    for _ in 0..30 {
        c.update(1.0 / 60.0, &fade);
    }
    assert_eq!(c.opacity, 1.0);
    assert!(c.light_brightness < 0.1);
}

#[test]
fn link_identity_is_by_url() {
    let link = Arc::new(Link {
        url: "u".to_string(),
        source_filter: "f".to_string(),
        thumbnail: "t".to_string(),
    });
    let mut c = cell("x");
    c.link = Some(link.clone());
    let other = Link {
        url: "u".to_string(),
        source_filter: "other".to_string(),
        thumbnail: "other".to_string(),
    };
    assert!(c.has_link(&other));
    assert!(!cell("x").is_space());
    assert!(cell(" ").is_space());
}
