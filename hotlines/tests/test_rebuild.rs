use hotlines::domain::{DataSource, LineStat, NormalizedName, SourceError};
use hotlines::index::ProfileContext;
use std::io::Write;

const SOURCE1: &str = "tests/fixtures/source1.json";
const SOURCE2: &str = "tests/fixtures/source2.json";
const MALFORMED: &str = "tests/fixtures/malformed.json";
const APP_RUN: &str = "tests/fixtures/app_run.json";

fn rebuilt(sources: Vec<DataSource>) -> ProfileContext {
    let mut ctx = ProfileContext::new(sources);
    ctx.rebuild();
    ctx
}

#[test]
fn test_current_file_lookup_sums_sources() {
    let ctx = rebuilt(vec![DataSource::new(SOURCE1), DataSource::new(SOURCE2)]);
    let name = NormalizedName::from("a.py");

    let ranked = ctx.rank_current_file_hot_lines(&name);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].line, 3);
    assert_eq!(ranked[0].count, 7);
    assert_eq!(ranked[0].time, 15.0);
    assert_eq!(ctx.index().combined_line_stat(&name, 3), Some(LineStat::new(7, 15.0)));
}

#[test]
fn test_malformed_source_does_not_block_siblings() {
    let ctx = rebuilt(vec![DataSource::new(MALFORMED), DataSource::new(SOURCE1)]);
    let name = NormalizedName::from("a.py");

    assert_eq!(ctx.diagnostics().len(), 1);
    assert_eq!(ctx.diagnostics()[0].source_index, 0);
    assert!(matches!(ctx.diagnostics()[0].error, SourceError::Malformed { .. }));

    assert_eq!(ctx.line_stat(0, &name, 3), None);
    assert_eq!(ctx.line_stat(1, &name, 3), Some(LineStat::new(5, 12.0)));
    assert_eq!(ctx.rank_hot_lines(1).len(), 1);
    assert_eq!(ctx.rank_current_file_hot_lines(&name)[0].stat(), LineStat::new(5, 12.0));
}

#[test]
fn test_unreadable_source_is_reported() {
    let ctx = rebuilt(vec![DataSource::new("tests/fixtures/nope.json"), DataSource::new(SOURCE2)]);

    assert_eq!(ctx.diagnostics().len(), 1);
    assert!(matches!(ctx.diagnostics()[0].error, SourceError::Unreadable { .. }));
    assert_eq!(ctx.index().loaded_count(), 1);
}

#[test]
fn test_disabling_source_removes_it_everywhere() {
    let mut ctx = rebuilt(vec![DataSource::new(SOURCE1), DataSource::new(SOURCE2)]);
    let name = NormalizedName::from("a.py");

    ctx.set_enabled(SOURCE2, false);

    assert_eq!(ctx.index().len(), 1);
    assert_eq!(ctx.index().combined_line_stat(&name, 3), Some(LineStat::new(5, 12.0)));
    let ranked = ctx.rank_current_file_hot_lines(&name);
    assert_eq!(ranked[0].stat(), LineStat::new(5, 12.0));
    assert!(ctx.rank_hot_lines(1).is_empty());

    ctx.set_enabled(SOURCE2, true);
    assert_eq!(ctx.index().combined_line_stat(&name, 3), Some(LineStat::new(7, 15.0)));
}

#[test]
fn test_all_sources_disabled_is_empty() {
    let ctx = rebuilt(vec![DataSource::disabled(SOURCE1)]);

    assert!(ctx.diagnostics().is_empty());
    assert!(ctx.index().is_empty());
    assert!(ctx.rank_current_file_hot_lines(&NormalizedName::from("a.py")).is_empty());
}

#[test]
fn test_same_base_name_in_different_directories_is_one_file() {
    let ctx = rebuilt(vec![DataSource::new(APP_RUN)]);
    let name = NormalizedName::from("/somewhere/else/UTIL.py");

    // lib/Util.py:4 and vendored/util.py:4 are merged
    assert_eq!(ctx.line_stat(0, &name, 4), Some(LineStat::new(1203, 8.0)));
    assert_eq!(ctx.line_stat(0, &name, 9), Some(LineStat::new(8, 64.0)));

    let ranked = ctx.rank_current_file_hot_lines(&name);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].line, 9);
    assert_eq!(ranked[1].stat(), LineStat::new(1203, 8.0));
    assert_eq!(ranked[1].function_name, "slugify");
    assert_eq!(ranked[1].source_path, "/home/dev/project/lib/Util.py");
}

#[test]
fn test_widths_follow_loaded_data_and_reset() {
    let mut ctx = rebuilt(vec![DataSource::new(APP_RUN)]);

    // 1200 → 4 digits, "340ms" → 5 chars
    assert_eq!(ctx.widths().count(), 4);
    assert_eq!(ctx.widths().duration(), 5);

    ctx.remove_source(APP_RUN);
    assert_eq!(ctx.widths().count(), 1);
    assert_eq!(ctx.widths().duration(), 3);
}

#[test]
fn test_rebuild_replaces_snapshot_wholesale() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"a.py": {{"f": {{"1": {{"count": 1, "time": 5}}}}}}}}"#).unwrap();
    file.flush().unwrap();
    let location = file.path().to_string_lossy().into_owned();
    let name = NormalizedName::from("a.py");

    let mut ctx = rebuilt(vec![DataSource::new(location.clone())]);
    assert_eq!(ctx.line_stat(0, &name, 1), Some(LineStat::new(1, 5.0)));

    std::fs::write(&location, r#"{"a.py": {"f": {"2": {"count": 4, "time": 9}}}}"#).unwrap();
    ctx.rebuild();

    assert_eq!(ctx.line_stat(0, &name, 1), None);
    assert_eq!(ctx.line_stat(0, &name, 2), Some(LineStat::new(4, 9.0)));

    std::fs::write(&location, "not json at all").unwrap();
    assert_eq!(ctx.rebuild().len(), 1);
    assert_eq!(ctx.line_stat(0, &name, 2), None);
}
