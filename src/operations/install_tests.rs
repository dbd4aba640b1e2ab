use super::*;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::GyoshuError;

struct TestRoot {
    temp: TempDir,
    config: InstallConfig,
}

impl TestRoot {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config = InstallConfig::new(temp.path().join("opencode"), temp.path().join("assets"));
        let root = Self { temp, config };
        root.source("command/gyoshu.md", "# /gyoshu\n");
        root.source("skill/rigor/SKILL.md", "# rigor\n");
        root.source("skill/rigor/refs/checklist.md", "- hold out a test set\n");
        root
    }

    fn source(&self, relative: &str, content: &str) {
        write(&self.config.source_root.join(relative), content);
    }

    fn target(&self, relative: &str) -> PathBuf {
        self.config.target_root.join(relative)
    }

    fn state(&self) -> Option<InstallState> {
        StateStore::new(&self.config.state_path).load()
    }

    fn run(&self, manifest: &Manifest) -> RunSummary {
        InstallOperation::new(&self.config, manifest)
            .execute()
            .unwrap()
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn manifest() -> Manifest {
    Manifest::new("1.0.0")
        .with_category("command", ["gyoshu.md"])
        .with_category("skill", ["rigor"])
}

#[test]
fn test_fresh_install() {
    let root = TestRoot::new();

    let summary = root.run(&manifest());

    assert_eq!(
        (summary.installed, summary.skipped, summary.updated),
        (2, 0, 0)
    );
    assert!(summary.errors.is_empty());
    assert!(summary.warnings.is_empty());
    assert_eq!(summary.installed_files, vec!["command/gyoshu.md", "skill/rigor"]);
    assert_eq!(
        fs::read(root.target("command/gyoshu.md")).unwrap(),
        fs::read(root.config.source_root.join("command/gyoshu.md")).unwrap()
    );
    assert_eq!(
        fs::read_to_string(root.target("skill/rigor/refs/checklist.md")).unwrap(),
        "- hold out a test set\n"
    );

    let state = root.state().unwrap();
    assert_eq!(state.version, "1.0.0");
    assert!(state.is_owned("command/gyoshu.md"));
    assert!(state.is_owned("skill/rigor"));
}

#[test]
fn test_second_run_updates_owned_entries() {
    let root = TestRoot::new();
    root.run(&manifest());

    let summary = root.run(&manifest());

    assert_eq!(
        (summary.installed, summary.skipped, summary.updated),
        (0, 0, 2)
    );
    assert!(summary.errors.is_empty());
}

#[test]
fn test_user_file_is_protected() {
    let root = TestRoot::new();
    write(&root.target("command/gyoshu.md"), "my own command\n");

    let summary = root.run(&manifest());

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.installed, 1);
    assert_eq!(
        fs::read_to_string(root.target("command/gyoshu.md")).unwrap(),
        "my own command\n"
    );
    let state = root.state().unwrap();
    assert!(!state.is_owned("command/gyoshu.md"));
    assert!(state.is_owned("skill/rigor"));
}

#[test]
fn test_traversal_entry_is_reported_and_not_written() {
    let root = TestRoot::new();
    let manifest = Manifest::new("1.0.0").with_category("command", ["../../../etc/cron.d/x"]);

    let summary = root.run(&manifest);

    assert_eq!(summary.touched(), 0);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("../../../etc/cron.d/x"));
    assert!(!root.temp.path().join("etc").exists());
    assert!(root.state().is_none());
}

#[test]
fn test_errors_do_not_stop_the_run() {
    let root = TestRoot::new();
    let manifest = Manifest::new("1.0.0")
        .with_category("command", ["/etc/passwd", "missing.md", "gyoshu.md"])
        .with_category("themes", ["dark.json"]);

    let summary = root.run(&manifest);

    assert_eq!(summary.installed, 1);
    assert_eq!(summary.errors.len(), 3);
    assert!(summary.errors[0].starts_with("command//etc/passwd: "));
    assert!(summary.errors[1].starts_with("command/missing.md: "));
    assert!(summary.errors[2].starts_with("themes/dark.json: "));
    assert!(summary.has_errors());
}

#[test]
fn test_owned_bundle_replaced_without_leftovers() {
    let root = TestRoot::new();
    root.run(&manifest());
    write(&root.target("skill/rigor/stale.md"), "left from v1");
    fs::remove_file(root.config.source_root.join("skill/rigor/refs/checklist.md")).unwrap();
    root.source("skill/rigor/SKILL.md", "# rigor v2\n");

    let summary = root.run(&manifest());

    assert_eq!(summary.updated, 2);
    assert!(!root.target("skill/rigor/stale.md").exists());
    assert!(!root.target("skill/rigor/refs/checklist.md").exists());
    assert_eq!(
        fs::read_to_string(root.target("skill/rigor/SKILL.md")).unwrap(),
        "# rigor v2\n"
    );
}

#[test]
fn test_nothing_touched_leaves_state_alone() {
    let root = TestRoot::new();
    write(&root.target("command/gyoshu.md"), "mine");
    let manifest = Manifest::new("1.0.0").with_category("command", ["gyoshu.md"]);

    let summary = root.run(&manifest);

    assert_eq!(summary.skipped, 1);
    assert!(!root.config.state_path.exists());
}

#[test]
fn test_state_keeps_prior_ownership() {
    let root = TestRoot::new();
    root.run(&manifest());

    let next = Manifest::new("2.0.0").with_category("command", ["gyoshu.md"]);
    root.run(&next);

    let state = root.state().unwrap();
    assert_eq!(state.version, "2.0.0");
    assert!(state.is_owned("skill/rigor"));
}

#[test]
fn test_corrupt_state_means_no_ownership() {
    let root = TestRoot::new();
    root.run(&manifest());
    fs::write(&root.config.state_path, "not json").unwrap();

    let summary = root.run(&manifest());

    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.updated, 0);
}

#[test]
fn test_state_save_failure_is_a_warning() {
    let root = TestRoot::new();
    let blocker = root.temp.path().join("blocker");
    fs::write(&blocker, "a file, not a directory").unwrap();
    let config = root.config.clone().with_state_path(blocker.join("install.json"));

    let summary = InstallOperation::new(&config, &manifest())
        .execute()
        .unwrap();

    assert_eq!(summary.installed, 2);
    assert!(summary.errors.is_empty());
    assert_eq!(summary.warnings.len(), 1);
}

#[test]
fn test_uncreatable_target_root_is_fatal() {
    let root = TestRoot::new();
    let blocker = root.temp.path().join("blocker");
    fs::write(&blocker, "file").unwrap();
    let config = InstallConfig::new(blocker.join("opencode"), &root.config.source_root);

    let err = InstallOperation::new(&config, &manifest())
        .execute()
        .unwrap_err();
    assert!(matches!(err, GyoshuError::TargetRootCreateFailed { .. }));
}

#[test]
fn test_reports_follow_manifest_order() {
    let root = TestRoot::new();

    let (_, reports) = InstallOperation::new(&root.config, &manifest())
        .execute_with_reports()
        .unwrap();

    let keys: Vec<_> = reports.iter().map(|r| r.relative.as_str()).collect();
    assert_eq!(keys, vec!["command/gyoshu.md", "skill/rigor"]);
}

#[test]
fn test_summary_json_shape() {
    let summary = RunSummary {
        installed: 1,
        installed_files: vec!["agent/a.md".to_string()],
        ..RunSummary::default()
    };

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["installed"], 1);
    assert_eq!(value["installedFiles"], serde_json::json!(["agent/a.md"]));
    assert_eq!(value["errors"], serde_json::json!([]));
    assert_eq!(value["warnings"], serde_json::json!([]));
}
