use std::path::PathBuf;

use elmo::config::{ConfigFlags, ThemeName, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".elmorc");
    let content = r"
# comment
--tab-width 2

--theme gruvbox

--log-file=elmo.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert_eq!(flags.tab_width, Some(2));
    assert_eq!(flags.theme, Some(ThemeName::Gruvbox));
    assert_eq!(flags.log_file, Some(PathBuf::from("elmo.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".elmorc");
    let content = "--no-highlight\n--theme gruvbox\n--log-file file.log\n--tab-width 2\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "elmo".to_string(),
        "--theme".to_string(),
        "frappe".to_string(),
        "--tab-width=8".to_string(),
        "--perf".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_highlight, "file flags should remain enabled");
    assert!(effective.perf, "cli flags should be applied");
    assert_eq!(effective.theme, Some(ThemeName::Frappe), "cli should override theme");
    assert_eq!(effective.tab_width, Some(8), "cli should override tab width");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_wins_over_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".elmorc");
    std::fs::write(&global, "--scroll-margin 4\n--theme gruvbox\n").unwrap();
    std::fs::write(&local, "--scroll-margin 1\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.scroll_margin, Some(1));
    assert_eq!(merged.theme, Some(ThemeName::Gruvbox));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_highlight: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        perf: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.no_highlight);
    assert!(merged.perf);
}
