// tests/release_flow_test.rs
use changeset_release::aggregator::Aggregator;
use changeset_release::cli::orchestration::{
    exit_code_for, run_add, run_publish, run_status, run_tag, run_version, PublishOptions,
};
use changeset_release::config::ReleaseConfig;
use changeset_release::domain::{ReleaseType, Version};
use changeset_release::git::{Git2Repository, Repository};
use changeset_release::store::{FsChangelogStore, FsNoteStore, NoteStore};
use changeset_release::warnings::ReleaseWarning;
use changeset_release::ChangesetError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn aggregator(root: &Path) -> Aggregator<FsNoteStore, FsChangelogStore> {
    Aggregator::new(
        FsNoteStore::new(root.join(".changesets"), "md"),
        FsChangelogStore::new(root.join("CHANGELOG.md")),
    )
}

fn write_note(root: &Path, name: &str, content: &str) {
    let dir = root.join(".changesets");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn no_prompt<T>() -> anyhow::Result<T> {
    panic!("prompt should not be shown")
}

fn init_git(root: &Path) -> Git2Repository {
    let repo = git2::Repository::init(root).unwrap();
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }
    Git2Repository::from_git2(repo)
}

#[test]
fn test_first_release_from_notes() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "minor-1.md", "Add feature X");
    write_note(dir.path(), "patch-2.md", "Fix bug Y");

    let report = run_version(&aggregator(dir.path())).unwrap();
    assert_eq!(report.version, Version::new(0, 1, 0));
    assert_eq!(report.release_type, ReleaseType::Minor);
    assert_eq!(report.consumed, 2);
    assert!(report.warnings.is_empty());

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert_eq!(
        changelog,
        "## 0.1.0\n\n### Minor Changes\n\n- Add feature X\n\n### Patch Changes\n\n- Fix bug Y\n\n"
    );
    assert!(!dir.path().join(".changesets/minor-1.md").exists());
    assert!(!dir.path().join(".changesets/patch-2.md").exists());
}

#[test]
fn test_release_on_top_of_existing_changelog() {
    let dir = TempDir::new().unwrap();
    let existing = "## 1.4.2\n\n### Patch Changes\n\n- Old fix\n\n";
    fs::write(dir.path().join("CHANGELOG.md"), existing).unwrap();
    write_note(dir.path(), "major-api.md", "# Drop legacy API\n\nDetails follow.");
    write_note(dir.path(), "README.txt", "not a note");

    let report = run_version(&aggregator(dir.path())).unwrap();
    assert_eq!(report.version, Version::new(2, 0, 0));

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.starts_with("## 2.0.0\n\n### Major Changes\n\n- Drop legacy API\n\n"));
    assert!(changelog.ends_with(existing));
    assert!(dir.path().join(".changesets/README.txt").exists());
}

#[test]
fn test_status_does_not_modify_anything() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "patch-1.md", "Fix");

    let batch = run_status(&aggregator(dir.path())).unwrap();
    assert_eq!(batch.version, Version::new(0, 0, 1));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(dir.path().join(".changesets/patch-1.md").exists());
}

#[test]
fn test_second_apply_has_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "patch-1.md", "Fix");

    run_version(&aggregator(dir.path())).unwrap();
    let err = run_version(&aggregator(dir.path())).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChangesetError>(),
        Some(ChangesetError::NotFound)
    ));
    assert_eq!(exit_code_for(&err), 1);
}

#[test]
fn test_unclassifiable_notes_only() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "feature-x.md", "Something");
    write_note(dir.path(), "patch-empty.md", "   \n\n");

    let err = run_version(&aggregator(dir.path())).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChangesetError>(),
        Some(ChangesetError::NoValidNotes)
    ));
    assert!(!dir.path().join("CHANGELOG.md").exists());
    assert!(dir.path().join(".changesets/feature-x.md").exists());
}

#[test]
fn test_added_note_is_released() {
    let dir = TempDir::new().unwrap();
    let notes = FsNoteStore::new(dir.path().join(".changesets"), "md");

    let path = run_add(
        &notes,
        Some(ReleaseType::Minor),
        Some("Add feature X".to_string()),
        no_prompt::<ReleaseType>,
        no_prompt::<String>,
    )
    .unwrap();
    assert!(path.starts_with(dir.path().join(".changesets")));
    assert_eq!(notes.list_entries().unwrap().len(), 1);

    let report = run_version(&aggregator(dir.path())).unwrap();
    assert_eq!(report.version, Version::new(0, 1, 0));
}

#[test]
fn test_publish_commits_and_tags() {
    let dir = TempDir::new().unwrap();
    let repo = init_git(dir.path());
    fs::write(dir.path().join("README.md"), "hello\n").unwrap();
    repo.commit_all("initial").unwrap();

    write_note(dir.path(), "minor-1.md", "Add feature X");
    let release = ReleaseConfig::default();
    let options = PublishOptions::from_config(&release, true, false);

    let result = run_publish(
        &aggregator(dir.path()),
        &repo,
        &release,
        &options,
        |_, _| panic!("confirmation skipped with --yes"),
    )
    .unwrap();

    assert_eq!(result.tag, "v0.1.0");
    assert!(result.committed);
    assert!(!result.pushed);
    assert!(result.warnings.is_empty());
    assert!(repo.tag_exists("v0.1.0").unwrap());

    // Working tree is clean after the release commit
    assert_eq!(repo.commit_all("nothing").unwrap(), None);
}

#[test]
fn test_tag_command_after_version() {
    let dir = TempDir::new().unwrap();
    let repo = init_git(dir.path());
    write_note(dir.path(), "patch-1.md", "Fix bug Y");

    let agg = aggregator(dir.path());
    run_version(&agg).unwrap();
    repo.commit_all("chore: release v0.0.1").unwrap();

    let release = ReleaseConfig::default();
    let options = PublishOptions::from_config(&release, true, false);

    let created = run_tag(agg.changelog_store(), &repo, &release, &options).unwrap();
    assert_eq!(created.tag, "v0.0.1");
    assert!(created.created);

    let again = run_tag(agg.changelog_store(), &repo, &release, &options).unwrap();
    assert!(!again.created);
}

#[test]
fn test_publish_cancelled_leaves_notes() {
    let dir = TempDir::new().unwrap();
    let repo = init_git(dir.path());
    write_note(dir.path(), "patch-1.md", "Fix");
    let release = ReleaseConfig::default();
    let options = PublishOptions::from_config(&release, false, false);

    let err = run_publish(&aggregator(dir.path()), &repo, &release, &options, |_, _| {
        Ok(false)
    })
    .unwrap_err();

    assert_eq!(exit_code_for(&err), 2);
    assert!(dir.path().join(".changesets/patch-1.md").exists());
    assert!(!dir.path().join("CHANGELOG.md").exists());
}

#[test]
fn test_publish_with_existing_tag_warns() {
    let dir = TempDir::new().unwrap();
    let repo = init_git(dir.path());
    fs::write(dir.path().join("README.md"), "hello\n").unwrap();
    repo.commit_all("initial").unwrap();
    repo.create_annotated_tag("v0.0.1", "stale").unwrap();

    write_note(dir.path(), "patch-1.md", "Fix");
    let release = ReleaseConfig::default();
    let options = PublishOptions::from_config(&release, true, false);

    let result =
        run_publish(&aggregator(dir.path()), &repo, &release, &options, |_, _| Ok(true)).unwrap();
    assert_eq!(
        result.warnings,
        vec![ReleaseWarning::TagExists {
            tag: "v0.0.1".to_string()
        }]
    );
}

#[test]
fn test_non_utf8_note_is_released_with_the_rest() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "minor-1.md", "Add feature X");
    fs::write(dir.path().join(".changesets/patch-2.md"), b"Fix caf\xe9 bug").unwrap();

    let report = run_version(&aggregator(dir.path())).unwrap();
    assert_eq!(report.version, Version::new(0, 1, 0));
    assert_eq!(report.consumed, 2);

    let changelog = fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap();
    assert!(changelog.contains("- Add feature X\n"));
    assert!(changelog.contains("- Fix caf\u{FFFD} bug\n"));
    assert!(!dir.path().join(".changesets/patch-2.md").exists());
}

#[test]
fn test_overflowing_heading_fails_without_consuming() {
    let dir = TempDir::new().unwrap();
    let existing = "## 18446744073709551615.0.0\n";
    fs::write(dir.path().join("CHANGELOG.md"), existing).unwrap();
    write_note(dir.path(), "major-1.md", "Drop legacy API");

    let err = run_version(&aggregator(dir.path())).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ChangesetError>(),
        Some(ChangesetError::InvalidVersion(_))
    ));
    assert_eq!(exit_code_for(&err), 1);
    assert_eq!(fs::read_to_string(dir.path().join("CHANGELOG.md")).unwrap(), existing);
    assert!(dir.path().join(".changesets/major-1.md").exists());
}
