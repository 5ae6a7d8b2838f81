use mccmd::Tool;
use mccmd::core::command::{self, BookSpec, SignSpec, TitleSlot};
use mccmd::core::history::{self, HistoryEntry};
use mccmd::core::legacy::{DEFAULT_PREFIXES, parse_legacy, to_legacy};
use mccmd::core::selector::{SelectorBase, Target, TargetSelector};
use mccmd::core::text::drop_empty;
use mccmd::{SerializeOptions, TextSegment, VersionTier};

// ============================================================================
// Helper Functions
// ============================================================================

fn legacy(s: &str) -> Vec<TextSegment> {
    parse_legacy(s, &DEFAULT_PREFIXES)
}

fn entry(command: &str) -> HistoryEntry {
    HistoryEntry::new(
        Tool::Tellraw,
        VersionTier::V1_21_5,
        command.to_string(),
        vec![TextSegment::plain(command)],
    )
}

// ============================================================================
// Legacy input through to commands
// ============================================================================

#[test]
fn test_legacy_text_to_tellraw() {
    let segments = legacy("&6Gold &lBold");
    let command = command::tellraw(
        &Target::default(),
        &segments,
        &SerializeOptions::new(VersionTier::V1_21_5),
    );
    assert_eq!(
        command,
        r#"/tellraw @a [{"text":"Gold ","color":"gold"},{"text":"Bold","color":"gold","bold":true}]"#
    );
}

#[test]
fn test_legacy_round_trip_keeps_styles() {
    let segments = legacy("§cRed §lbold");
    assert_eq!(legacy(&to_legacy(&segments)), segments);
}

#[test]
fn test_segments_file_drops_empty_runs() {
    let json = r#"[{"text":""},{"text":"A","bold":false}]"#;
    let segments = drop_empty(serde_json::from_str::<Vec<TextSegment>>(json).unwrap());
    let options = SerializeOptions::new(VersionTier::V1_21_5);
    assert_eq!(mccmd::serialize(&segments, &options), r#""A""#);
    assert_eq!(
        command::tellraw(&Target::default(), &segments, &options),
        r#"/tellraw @a "A""#
    );
}

#[test]
fn test_selector_target_in_title() {
    let target: Target = TargetSelector::new(SelectorBase::AllPlayers)
        .tag("vip")
        .into();
    let command = command::title(
        &target,
        TitleSlot::Actionbar,
        &[TextSegment::plain("Welcome")],
        &SerializeOptions::new(VersionTier::V1_16),
    );
    assert_eq!(command, r#"/title @a[tag=vip] actionbar "Welcome""#);
}

#[test]
fn test_sign_lines_per_tier() {
    let spec = SignSpec {
        lines: vec![legacy("Hello")],
        ..SignSpec::default()
    };
    assert_eq!(
        command::sign(&spec, VersionTier::V1_21_5),
        r#"/setblock ~ ~ ~ minecraft:oak_sign{front_text:{messages:["Hello","","",""]}}"#
    );
    assert_eq!(
        command::sign(&spec, VersionTier::V1_13),
        r#"/setblock ~ ~ ~ minecraft:sign{Text1:'"Hello"',Text2:'""',Text3:'""',Text4:'""'}"#
    );
}

#[test]
fn test_book_defaults() {
    let spec = BookSpec {
        pages: vec![legacy("Page one")],
        ..BookSpec::default()
    };
    assert_eq!(
        command::book(&spec, VersionTier::V1_16),
        r#"/give @p minecraft:written_book{title:"Untitled",author:"Anonymous",pages:['"Page one"']}"#
    );
}

#[test]
fn test_build_matches_individual_builders() {
    let segments = [TextSegment::plain("Hi")];
    let options = SerializeOptions::new(VersionTier::V1_20);
    let target = Target::default();
    assert_eq!(
        command::build(Tool::Tellraw, &target, &segments, &options),
        command::tellraw(&target, &segments, &options)
    );
    assert_eq!(
        command::build(Tool::Subtitle, &target, &segments, &options),
        command::title(&target, TitleSlot::Subtitle, &segments, &options)
    );
}

// ============================================================================
// History persistence
// ============================================================================

#[test]
fn test_history_newest_first_and_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    history::record(dir.path(), entry("/a"), 10).unwrap();
    history::record(dir.path(), entry("/b"), 10).unwrap();
    history::record(dir.path(), entry("/a"), 10).unwrap();

    let commands: Vec<String> = history::load(dir.path())
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.command)
        .collect();
    assert_eq!(commands, vec!["/a", "/b"]);
}

#[test]
fn test_history_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..5 {
        history::record(dir.path(), entry(&format!("/cmd {i}")), 3).unwrap();
    }
    let entries = history::load(dir.path()).unwrap().entries;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].command, "/cmd 4");
}

#[test]
fn test_history_remove_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let first = entry("/a");
    let id = first.id.clone();
    history::record(dir.path(), first, 10).unwrap();
    history::record(dir.path(), entry("/b"), 10).unwrap();

    assert!(history::remove(dir.path(), &id).unwrap());
    assert!(!history::remove(dir.path(), &id).unwrap());
    assert_eq!(history::load(dir.path()).unwrap().entries.len(), 1);

    history::clear(dir.path()).unwrap();
    assert!(history::load(dir.path()).unwrap().entries.is_empty());
}

#[test]
fn test_history_keeps_segments_for_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let segments = legacy("&aGreen");
    history::record(
        dir.path(),
        HistoryEntry::new(Tool::Title, VersionTier::V1_20, "/title @a title x".into(), segments.clone()),
        10,
    )
    .unwrap();

    let loaded = &history::load(dir.path()).unwrap().entries[0];
    assert_eq!(loaded.segments, segments);
    assert_eq!(loaded.tool, Tool::Title);
    assert_eq!(loaded.version, VersionTier::V1_20);
}
