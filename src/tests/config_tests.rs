use super::*;

#[test]
fn defaults_to_local_api() {
    let settings = resolve(None, None, Overrides::default());
    assert_eq!(settings.api_base, "http://localhost:8080");
    assert_eq!(settings.refresh_policy, RefreshPolicy::LastCompletionWins);
}

#[test]
fn layers_apply_in_precedence_order() {
    let file = FileSettings {
        api_base: Some("http://file:1".into()),
        discard_stale_refreshes: None,
    };
    let settings = resolve(
        Some(file),
        Some("http://env:2/".into()),
        Overrides::default(),
    );
    assert_eq!(settings.api_base, "http://env:2");

    let file = FileSettings {
        api_base: Some("http://file:1".into()),
        discard_stale_refreshes: Some(true),
    };
    let settings = resolve(
        Some(file),
        Some("http://env:2".into()),
        Overrides {
            api_base: Some("http://cli:3".into()),
            discard_stale_refreshes: false,
        },
    );
    assert_eq!(settings.api_base, "http://cli:3");
    assert_eq!(settings.refresh_policy, RefreshPolicy::LatestIssuedWins);
}

#[test]
fn blank_values_are_ignored() {
    let settings = resolve(
        Some(FileSettings {
            api_base: Some("  ".into()),
            discard_stale_refreshes: Some(false),
        }),
        Some(String::new()),
        Overrides::default(),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn reads_toml_file_and_tolerates_missing_one() {
    let dir = std::env::temp_dir().join(format!("smartrelief-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("mkdir");

    let missing = dir.join("absent.toml");
    assert!(read_file_settings(&missing).expect("missing ok").is_none());

    let path = dir.join("admin.toml");
    std::fs::write(
        &path,
        "api_base = \"https://relief.example.org\"\ndiscard_stale_refreshes = true\n",
    )
    .expect("write");
    let file = read_file_settings(&path).expect("read").expect("present");
    assert_eq!(file.api_base.as_deref(), Some("https://relief.example.org"));
    assert_eq!(file.discard_stale_refreshes, Some(true));

    std::fs::write(&path, "api_bsae = \"typo\"\n").expect("write");
    assert!(read_file_settings(&path).is_err());

    let _ = std::fs::remove_dir_all(&dir);
}
