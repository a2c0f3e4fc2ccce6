use std::path::PathBuf;

use reverie::config::{ConfigFlags, InputMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".reverierc");
    let content = r#"
# comment
--hide-toolbar

--input-mode plain
   
--log-file=reverie.log
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.hide_toolbar);
    assert_eq!(flags.input_mode, Some(InputMode::Plain));
    assert_eq!(flags.log_file, Some(PathBuf::from("reverie.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".reverierc");
    let content = "--hide-toolbar\n--input-mode plain\n--entry 2\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "reverie".to_string(),
        "--input-mode".to_string(),
        "html".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.hide_toolbar, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(
        effective.input_mode,
        Some(InputMode::Html),
        "cli should override input mode"
    );
    assert_eq!(
        effective.entry.as_deref(),
        Some("2"),
        "file config should be preserved when CLI does not override"
    );
    assert!(!effective.toolbar_visible());
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "reverie".to_string(),
        "--input-mode=html".to_string(),
        "--entry=4".to_string(),
        "--log-file=session.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.input_mode, Some(InputMode::Html));
    assert_eq!(flags.entry.as_deref(), Some("4"));
    assert_eq!(flags.log_file, Some(PathBuf::from("session.log")));
}

#[test]
fn test_parse_flag_tokens_ignores_dangling_value_flag() {
    let flags = parse_flag_tokens(&["--entry".to_string()]);
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        hide_toolbar: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        toolbar: true,
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.hide_toolbar);
    assert!(merged.toolbar);
    assert!(merged.perf);
    assert!(merged.toolbar_visible());
}
