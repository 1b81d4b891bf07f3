use rand::{SeedableRng, rngs::StdRng};

use super::*;
use crate::{
    foundation::core::Rect, layout::char::CharKind, timeline::clip_timeline::ClipTimelineParams,
};

fn chars(delays: &[f64]) -> Vec<Character> {
    delays
        .iter()
        .enumerate()
        .map(|(i, d)| Character::new(i, "a", CharKind::Body, None, Rect::ZERO, *d))
        .collect()
}

fn timeline() -> ClipTimeline {
    ClipTimeline::new(ClipTimelineParams {
        initial_delay: 10.0,
        initial_clips: 2,
        initial_clip_duration: 3.0,
        loop_durations: vec![4.0, 6.0],
    })
    .unwrap()
}

fn link() -> Arc<Link> {
    Arc::new(Link {
        url: "https://player.example/1".to_string(),
        source_filter: "MC1".to_string(),
        thumbnail: "MC1_00000".to_string(),
    })
}

fn catalog() -> ClipCatalog {
    ClipCatalog::new(
        (0..4)
            .map(|i| Clip {
                url: format!("/videos/MC1_{i:05}.webm"),
                image: format!("/videos/MC1_{i:05}.webp"),
                duration: 5.0,
            })
            .chain(std::iter::once(Clip {
                url: "/videos/OTHER.webm".to_string(),
                image: "/videos/OTHER.webp".to_string(),
                duration: 5.0,
            }))
            .collect(),
    )
}

#[test]
fn intro_reveals_text_after_warm_up() {
    let palette = Palette::default();
    let t = Transition::intro(&timeline(), &palette);
    assert_eq!(t.kind(), TransitionKind::Intro);

    let mut cs = chars(&[0.0, 0.5, 1.0]);
    let s = t.apply(0.0, &mut cs);
    assert_eq!(s.background, palette.black);
    assert_eq!(s.overlay, palette.black);
    assert!(!s.links_enabled);
    assert!(cs.iter().all(|c| !c.flags.transition_in));

    let s = t.apply(16.5, &mut cs);
    assert!(s.links_enabled);
    assert_eq!(s.illumination, Illumination::Current);
    assert_eq!(
        cs.iter().map(|c| c.flags.transition_in).collect::<Vec<_>>(),
        vec![true, true, false]
    );
}

#[test]
fn intro_overlay_flashes_white_then_clears() {
    let palette = Palette::default();
    let t = Transition::intro(&timeline(), &palette);
    let mut cs = chars(&[]);
    let mid = t.apply(9.99, &mut cs);
    assert!(mid.overlay.r > 0.9 && mid.overlay.a == 1.0);
    let at = t.apply(10.0, &mut cs);
    assert_eq!(at.overlay, palette.transparent_white);
    assert_eq!(at.background, palette.grey);
}

#[test]
fn fast_intro_ripples_by_index() {
    let tuning = TransitionTuning::default();
    let palette = Palette::default();
    let t = Transition::fast_intro(&tuning, &palette);
    let mut cs = chars(&[100.0; 4]);
    let s = t.apply(tuning.fast_intro_stagger * 1.5, &mut cs);
    assert!(s.links_enabled);
    assert_eq!(
        cs.iter().map(|c| c.flags.transition_in).collect::<Vec<_>>(),
        vec![true, true, false, false]
    );
    assert!((s.overlay.a - 1.0).abs() < 1e-6);

    let s = t.apply(tuning.fast_intro_duration, &mut cs);
    assert_eq!(s.background, palette.grey);
    assert_eq!(s.overlay, palette.transparent_white);
}

#[test]
fn exit_turns_lights_out_over_time() {
    let tuning = TransitionTuning::default();
    let palette = Palette::default();
    let mut rng = StdRng::seed_from_u64(7);
    let t = Transition::exit(Some(link()), &catalog(), &mut rng, &tuning, &palette);
    assert_eq!(t.kind(), TransitionKind::Exit);
    assert_eq!(t.exit_link(), Some(&link()));
    assert_eq!(t.exit_order().len(), 4);
    assert!(t.exit_order().iter().all(|c| c.url.contains("MC1")));

    let mut cs = chars(&[0.0, 0.0]);
    let lit = |s: &TransitionSample| match &s.illumination {
        Illumination::Clips(c) => c.len(),
        Illumination::Current => usize::MAX,
    };

    let s = t.apply(0.0, &mut cs);
    assert_eq!(lit(&s), 4);
    assert!(!s.links_enabled);
    assert!(cs.iter().all(|c| c.flags.transition_out));
    assert_eq!(s.background, palette.grey);
    assert_eq!(s.overlay, palette.white);

    assert_eq!(lit(&t.apply(1.0, &mut cs)), 2);
    assert_eq!(lit(&t.apply(2.0, &mut cs)), 0);
    assert_eq!(lit(&t.apply(10.0, &mut cs)), 0);

    assert!(!t.is_complete(1.9));
    assert!(t.is_complete(2.0));
}

#[test]
fn exit_order_is_a_permutation_fixed_at_construction() {
    let tuning = TransitionTuning::default();
    let palette = Palette::default();
    let t = Transition::exit(
        Some(link()),
        &catalog(),
        &mut StdRng::seed_from_u64(1),
        &tuning,
        &palette,
    );
    let mut urls: Vec<_> = t.exit_order().iter().map(|c| c.url.clone()).collect();
    let mut cs = chars(&[0.0]);
    let Illumination::Clips(first) = t.apply(0.0, &mut cs).illumination else {
        panic!("exit must light explicit clips");
    };
    assert_eq!(first.as_slice(), t.exit_order());

    urls.sort();
    assert_eq!(
        urls,
        (0..4)
            .map(|i| format!("/videos/MC1_{i:05}.webm"))
            .collect::<Vec<_>>()
    );
}

#[test]
fn exit_without_link_lights_nothing() {
    let t = Transition::exit(
        None,
        &catalog(),
        &mut StdRng::seed_from_u64(1),
        &TransitionTuning::default(),
        &Palette::default(),
    );
    let mut cs = chars(&[0.0]);
    assert_eq!(
        t.apply(0.0, &mut cs).illumination,
        Illumination::Clips(Vec::new())
    );
    assert!(t.exit_link().is_none());
}

#[test]
fn only_exit_completes() {
    let palette = Palette::default();
    assert!(!Transition::intro(&timeline(), &palette).is_complete(1e9));
    assert!(!Transition::fast_intro(&TransitionTuning::default(), &palette).is_complete(1e9));
}
