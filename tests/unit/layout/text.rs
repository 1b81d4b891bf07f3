use super::*;

fn link(n: u32) -> Arc<Link> {
    Arc::new(Link {
        url: format!("https://player.example/{n}"),
        source_filter: format!("F{n}_"),
        thumbnail: format!("F{n}_00000"),
    })
}

fn content(body: &[&str], credits: &[&str]) -> Content {
    Content {
        title: "Kinetype".to_string(),
        films: vec![
            Film {
                long_title: "The First Film".to_string(),
                short_title: "First".to_string(),
                subtitle: "2019".to_string(),
                link: Some(link(1)),
            },
            Film {
                long_title: "The Second Film".to_string(),
                short_title: "Second".to_string(),
                subtitle: "2021".to_string(),
                link: None,
            },
        ],
        body_paragraphs: body.iter().map(|s| s.to_string()).collect(),
        credit_paragraphs: credits.iter().map(|s| s.to_string()).collect(),
    }
}

fn params(max_width_px: f64, gutter_width_px: f64, char_width_px: f64) -> LayoutParams {
    LayoutParams {
        char_width_px,
        line_height_px: 18.0,
        max_width_px,
        gutter_width_px,
    }
}

fn build(p: LayoutParams, c: &Content) -> TextLayout {
    TextLayout::new(p, c, &LayoutTuning::default()).unwrap()
}

fn line_text(layout: &TextLayout, i: usize) -> String {
    layout.line(i).iter().map(|c| c.value.as_str()).collect()
}

fn sample_content() -> Content {
    content(
        &[
            "Every line of this paragraph is revealed one character at a time[.]while clips play behind it.",
            "A second paragraph[:]with a short pause.",
        ],
        &["Credits one.", "Credits two[;]and more."],
    )
}

#[test]
fn one_line_body_on_large_breakpoint() {
    let layout = build(params(800.0, 0.0, 10.0), &content(&["AB CD"], &[]));
    assert_eq!(layout.breakpoint(), Breakpoint::Large);
    assert_eq!(layout.column_width_chars(), 40);
    assert_eq!(layout.width_chars(), 80);

    let idx = (0..layout.line_count())
        .find(|&i| line_text(&layout, i).starts_with("AB CD"))
        .unwrap();
    let body: Vec<&Character> = layout.line(idx).iter().take(5).collect();
    assert!(body.iter().all(|c| c.kind == CharKind::Body));
    assert_eq!(
        body.iter().map(|c| c.value.as_str()).collect::<String>(),
        "AB CD"
    );
    let medium = LayoutTuning::default().rates.medium;
    for w in body.windows(2) {
        assert!((w[1].reveal_delay - w[0].reveal_delay - medium).abs() < 1e-9);
    }
    assert!(line_text(&layout, idx)[5..].chars().all(|c| c == ' '));
}

#[test]
fn selects_breakpoints_from_column_width() {
    let c = sample_content();

    let small = build(params(600.0, 40.0, 12.0), &c);
    assert_eq!(small.breakpoint(), Breakpoint::Small);
    assert_eq!(small.width_chars(), 50);

    let medium = build(params(700.0, 0.0, 10.0), &c);
    assert_eq!(medium.breakpoint(), Breakpoint::Medium);
    assert_eq!(medium.width_chars(), 70);
    assert_eq!(medium.gutter_width_chars(), 0);

    let large = build(params(1000.0, 100.0, 10.0), &c);
    assert_eq!(large.breakpoint(), Breakpoint::Large);
    assert_eq!(large.column_width_chars(), 45);
    assert_eq!(large.gutter_width_chars(), 10);
}

#[test]
fn small_breakpoint_rounds_width_to_even() {
    let layout = build(params(250.0, 0.0, 10.0), &sample_content());
    assert_eq!(layout.breakpoint(), Breakpoint::Small);
    assert_eq!(layout.width_chars(), 24);
}

#[test]
fn line_starts_strictly_increase_and_round_trip() {
    for p in [
        params(600.0, 40.0, 12.0),
        params(700.0, 0.0, 10.0),
        params(1000.0, 100.0, 10.0),
    ] {
        let layout = build(p, &sample_content());
        for i in 0..layout.line_count() {
            if i + 1 < layout.line_count() {
                assert!(layout.line_delay(i) < layout.line_delay(i + 1));
            }
            assert_eq!(layout.line_index_at_time(layout.line_delay(i)), i);
        }
    }
}

#[test]
fn every_line_fills_the_grid_width() {
    for p in [params(600.0, 40.0, 12.0), params(1000.0, 100.0, 10.0)] {
        let layout = build(p, &sample_content());
        for line in layout.lines() {
            assert_eq!(line.len(), layout.width_chars());
        }
        assert_eq!(layout.to_text().lines().count(), layout.line_count());
    }
}

#[test]
fn reveal_delays_are_monotonic_and_cells_are_placed_on_the_grid() {
    let layout = build(params(700.0, 0.0, 10.0), &sample_content());
    for w in layout.chars().windows(2) {
        assert!(w[0].reveal_delay <= w[1].reveal_delay);
        assert_eq!(w[1].index, w[0].index + 1);
    }
    for (row, line) in layout.lines().enumerate() {
        for (col, c) in line.iter().enumerate() {
            assert_eq!(c.rect, Rect::new(col as f64 * 10.0, row as f64 * 18.0, 10.0, 18.0));
        }
    }
    assert_eq!(layout.height_px(), layout.line_count() as f64 * 18.0);
    assert_eq!(layout.width_px(), 700.0);
}

#[test]
fn line_durations_cover_the_sequence_and_wrap() {
    let layout = build(params(700.0, 0.0, 10.0), &sample_content());
    let total: f64 = layout.line_durations().iter().sum();
    assert!((total - layout.duration()).abs() < 1e-9);

    let n = layout.line_count();
    assert_eq!(layout.line_duration(n), layout.line_duration(0));
    assert_eq!(layout.line_delay(n + 2), layout.line_delay(2));
    assert_eq!(layout.line_index_at_time(-1.0), 0);
    assert_eq!(layout.line_index_at_time(f64::INFINITY), n - 1);
}

#[test]
fn large_header_places_films_side_by_side() {
    let layout = build(params(800.0, 0.0, 10.0), &sample_content());
    let header = line_text(&layout, 0);
    assert!(header.starts_with("The First Film"));
    assert_eq!(&header[36..40], "2019");
    assert!(header[40..].starts_with("The Second Film"));

    let first = &layout.line(0)[0];
    assert_eq!(first.kind, CharKind::Link);
    assert_eq!(layout.line(0)[40].kind, CharKind::InactiveLink);
    assert!(layout.line(0)[40].link.is_none());

    let slow = LayoutTuning::default().rates.slow;
    assert!((layout.line(0)[1].reveal_delay - slow).abs() < 1e-9);
}

#[test]
fn link_regions_cover_linked_characters() {
    let layout = build(params(800.0, 0.0, 10.0), &sample_content());
    assert_eq!(layout.link_rects().len(), 1);
    let l = link(1);
    assert_eq!(layout.link_rect(&l), Some(Rect::new(0.0, 0.0, 400.0, 18.0)));

    assert_eq!(layout.link_at(Point::new(5.0, 5.0)).map(|l| l.url.as_str()), Some(l.url.as_str()));
    assert!(layout.link_at(Point::new(405.0, 5.0)).is_none());
    assert!(layout.link_at(Point::new(5.0, 40.0)).is_none());
}

#[test]
fn medium_header_puts_title_beside_first_film() {
    let layout = build(params(700.0, 0.0, 10.0), &sample_content());
    let row0 = line_text(&layout, 0);
    assert!(row0.starts_with("Kinetype"));
    assert_eq!(&row0[35..40], "First");
    assert!(row0.ends_with("2019"));
    assert_eq!(layout.line(0)[0].kind, CharKind::Title);
    assert_eq!(layout.line(0)[35].kind, CharKind::Link);

    let row1 = line_text(&layout, 1);
    assert!(row1[..35].chars().all(|c| c == ' '));
    assert_eq!(&row1[35..41], "Second");
    assert_eq!(layout.line(1)[35].kind, CharKind::InactiveLink);
}

#[test]
fn small_header_stacks_title_gap_and_films() {
    let layout = build(params(600.0, 40.0, 12.0), &sample_content());
    assert!(line_text(&layout, 0).starts_with("Kinetype"));
    assert!(line_text(&layout, 1).chars().all(|c| c == ' '));
    assert_eq!(layout.line(1)[0].kind, CharKind::Gap);

    let films = line_text(&layout, 2);
    assert!(films.starts_with("First"));
    assert_eq!(&films[25..29], "2019");
    assert!(line_text(&layout, 3).starts_with("Second"));
}

#[test]
fn markup_widths_depend_on_breakpoint() {
    let c = content(&["a[.]b"], &[]);
    let large = build(params(800.0, 0.0, 10.0), &c);
    assert!(large.to_text().contains(&format!("a{}b", " ".repeat(12))));

    let medium = build(params(700.0, 0.0, 10.0), &c);
    assert!(medium.to_text().contains(&format!("a{}b", " ".repeat(5))));
}

#[test]
fn gap_lines_follow_header() {
    let layout = build(params(700.0, 0.0, 10.0), &content(&["AB CD"], &[]));
    // two header rows, five blank rows, then the body
    for i in 2..7 {
        assert!(layout.line(i).iter().all(|c| c.kind == CharKind::Gap && c.is_space()));
    }
    assert!(line_text(&layout, 7).starts_with("AB CD"));
}

#[test]
fn rejects_unusable_sizing() {
    let c = sample_content();
    let err = TextLayout::new(params(800.0, 0.0, 0.0), &c, &LayoutTuning::default()).unwrap_err();
    assert!(matches!(err, KinetypeError::Layout(_)));

    let err = TextLayout::new(params(15.0, 0.0, 10.0), &c, &LayoutTuning::default()).unwrap_err();
    assert!(err.to_string().contains("at least 2 cells"));

    assert!(params(f64::NAN, 0.0, 10.0).validate().is_err());
}
