use super::*;

#[test]
fn empty_chain_holds_initial_value() {
    let k = Keyframes::new(3.0);
    assert_eq!(k.sample(-1.0), 3.0);
    assert_eq!(k.sample(100.0), 3.0);
    assert_eq!(k.duration(), 0.0);
}

#[test]
fn linear_segment_interpolates_and_clamps() {
    let k = Keyframes::new(0.0).to(10.0, 2.0, Ease::Linear);
    assert_eq!(k.sample(-5.0), 0.0);
    assert_eq!(k.sample(1.0), 5.0);
    assert_eq!(k.sample(2.0), 10.0);
    assert_eq!(k.sample(50.0), 10.0);
}

#[test]
fn segments_chain_in_order() {
    let k = Keyframes::new(0.0)
        .to(1.0, 1.0, Ease::Linear)
        .wait(1.0)
        .to(0.0, 2.0, Ease::Linear);
    assert_eq!(k.duration(), 4.0);
    assert_eq!(k.sample(1.5), 1.0);
    assert_eq!(k.sample(3.0), 0.5);
    assert_eq!(k.sample(4.0), 0.0);
}

#[test]
fn zero_duration_segment_jumps() {
    let k = Keyframes::new(Color::BLACK)
        .to(Color::WHITE, 10.0, Ease::InQuad)
        .to(Color::TRANSPARENT_WHITE, 0.0, Ease::Linear);
    assert_eq!(k.sample(0.0), Color::BLACK);
    let mid = k.sample(5.0);
    assert!((mid.r - 0.25).abs() < 1e-12);
    assert_eq!(mid.a, 1.0);
    assert_eq!(k.sample(10.0), Color::TRANSPARENT_WHITE);
}
