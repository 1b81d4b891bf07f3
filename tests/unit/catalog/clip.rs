use super::*;

fn clip(url: &str, duration: f64) -> Clip {
    Clip {
        url: url.to_string(),
        image: url.replace(".webm", ".webp"),
        duration,
    }
}

fn link() -> Link {
    Link {
        url: "https://player.example/1".to_string(),
        source_filter: "MC1".to_string(),
        thumbnail: "MC1_00000".to_string(),
    }
}

#[test]
fn parses_manifest_array() {
    let catalog = ClipCatalog::from_json_str(
        r#"[{"url":"/videos/a.webm","image":"/videos/a.webp","duration":3.5}]"#,
    )
    .unwrap();
    catalog.validate().unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.clips()[0].duration, 3.5);
}

#[test]
fn candidates_filter_by_duration_and_substring() {
    let catalog = ClipCatalog::new(vec![
        clip("/videos/MC1_00000.webm", 1.0),
        clip("/videos/MC1_00001.webm", 5.0),
        clip("/videos/OTHER_0.webm", 9.0),
    ]);
    let urls: Vec<_> = catalog
        .candidates(2.0, None)
        .into_iter()
        .map(|c| c.url.as_str())
        .collect();
    assert_eq!(urls, vec!["/videos/MC1_00001.webm", "/videos/OTHER_0.webm"]);

    let urls: Vec<_> = catalog
        .candidates(2.0, Some("MC1"))
        .into_iter()
        .map(|c| c.url.as_str())
        .collect();
    assert_eq!(urls, vec!["/videos/MC1_00001.webm"]);

    assert_eq!(catalog.candidates(0.0, Some("")).len(), 3);
}

#[test]
fn link_lookups_preserve_manifest_order() {
    let catalog = ClipCatalog::new(vec![
        clip("/videos/X.webm", 1.0),
        clip("/videos/MC1_00003.webm", 1.0),
        clip("/videos/MC1_00000.webm", 1.0),
    ]);
    let for_link = catalog.clips_for_link(&link());
    assert_eq!(for_link.len(), 2);
    assert_eq!(for_link[0].url, "/videos/MC1_00003.webm");
    assert_eq!(
        catalog.thumbnail_for(&link()).map(|c| c.url.as_str()),
        Some("/videos/MC1_00000.webm")
    );
}

#[test]
fn validation_rejects_negative_duration() {
    let catalog = ClipCatalog::new(vec![clip("/videos/a.webm", -1.0)]);
    assert!(catalog.validate().is_err());
}
