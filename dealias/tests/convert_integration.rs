//! Integration tests for the alias conversion walk.
//!
//! These tests exercise the full classifier/resolver/walker pipeline over
//! real temporary directory trees, with the OS services replaced by the
//! mock classifier and original-item source.

#![cfg(unix)]

use std::fs;
use std::path::{Path, PathBuf};

use dealias::{
    ConvertOptions, Converter, Error, LogLevel, Logger, MockClassifier, MockOriginalItemSource,
    RunTally,
};
use tempfile::TempDir;

/// A temp tree with a `tree/` folder to convert and a `docs/` folder
/// holding resolution targets outside the converted tree.
struct Fixture {
    #[allow(dead_code)]
    env: TempDir,
    tree: PathBuf,
    docs: PathBuf,
    classifier: MockClassifier,
    source: MockOriginalItemSource,
}

impl Fixture {
    fn new() -> Self {
        let env = tempfile::tempdir().expect("failed to create temp dir");
        let tree = env.path().join("tree");
        let docs = env.path().join("docs");
        fs::create_dir_all(&tree).unwrap();
        fs::create_dir_all(&docs).unwrap();

        Self {
            env,
            tree,
            docs,
            classifier: MockClassifier::empty(),
            source: MockOriginalItemSource::empty(),
        }
    }

    /// Create a regular file standing in for an alias, classified as one
    /// and resolving to `target`.
    fn add_alias(&mut self, path: &Path, target: &Path) {
        fs::write(path, b"alias bookmark data").unwrap();
        self.classifier.mark_alias(path.to_path_buf());
        self.source.insert(path.to_path_buf(), target.to_path_buf());
    }

    /// Create an alias with no resolvable target.
    fn add_broken_alias(&mut self, path: &Path) {
        fs::write(path, b"alias bookmark data").unwrap();
        self.classifier.mark_alias(path.to_path_buf());
    }

    /// Mark an existing directory as an alias resolving to `target`.
    fn mark_alias_dir(&mut self, path: &Path, target: &Path) {
        self.classifier.mark_alias(path.to_path_buf());
        self.source.insert(path.to_path_buf(), target.to_path_buf());
    }

    fn converter(&self, options: ConvertOptions) -> Converter<MockClassifier, MockOriginalItemSource> {
        Converter::with_services(
            self.classifier.clone(),
            self.source.clone(),
            options,
            Logger::new(LogLevel::Quiet),
        )
    }

    fn run(&self) -> RunTally {
        self.converter(ConvertOptions::default())
            .convert(&self.tree)
            .expect("conversion should not fail at the root")
    }
}

#[test]
fn converts_alias_file_and_keeps_backup() {
    let mut fx = Fixture::new();
    let alias = fx.tree.join("link1");
    let target = fx.docs.join("report.pdf");
    fs::write(&target, b"pdf bytes").unwrap();
    fx.add_alias(&alias, &target);

    let tally = fx.run();

    assert_eq!(
        tally,
        RunTally {
            converted: 1,
            failed: 0,
        }
    );

    let backup = fx.tree.join(".link1.backup");
    assert!(backup.is_file(), "backup of the original alias must remain");
    assert_eq!(fs::read(&backup).unwrap(), b"alias bookmark data");

    assert!(alias.is_symlink(), "alias must be replaced by a symlink");
    assert_eq!(fs::read_link(&alias).unwrap(), target);
}

#[test]
fn hidden_entries_are_never_touched() {
    let mut fx = Fixture::new();
    let hidden = fx.tree.join(".secret");
    let target = fx.docs.join("file");
    fx.add_alias(&hidden, &target);

    let tally = fx.run();

    assert_eq!(tally, RunTally::default());
    assert!(hidden.is_file());
    assert!(!hidden.is_symlink());
}

#[test]
fn hidden_directories_are_never_recursed_into() {
    let mut fx = Fixture::new();
    let stash = fx.tree.join(".stash");
    fs::create_dir(&stash).unwrap();

    // Fully convertible alias, but inside a hidden directory
    let inner = stash.join("inner");
    let target = fx.docs.join("inner_target");
    fs::write(&target, b"x").unwrap();
    fx.add_alias(&inner, &target);

    let tally = fx.run();

    assert_eq!(tally, RunTally::default());
    assert!(inner.is_file());
    assert!(!inner.is_symlink());
    assert!(!stash.join(".inner.backup").exists());
}

#[test]
fn plain_files_are_ignored() {
    let fx = Fixture::new();
    let notes = fx.tree.join("notes.txt");
    fs::write(&notes, b"just notes").unwrap();

    let tally = fx.run();

    assert_eq!(tally, RunTally::default());
    assert_eq!(fs::read(&notes).unwrap(), b"just notes");
}

#[test]
fn broken_alias_counts_as_failure_without_mutation() {
    let mut fx = Fixture::new();
    let broken = fx.tree.join("broken");
    fx.add_broken_alias(&broken);

    let tally = fx.run();

    assert_eq!(
        tally,
        RunTally {
            converted: 0,
            failed: 1,
        }
    );
    assert!(broken.is_file(), "failed resolution must not touch the file");
    assert!(!fx.tree.join(".broken.backup").exists());
}

#[test]
fn failed_backup_rename_counts_failure_and_continues() {
    let mut fx = Fixture::new();

    // The backup name for this alias is already taken by a non-empty
    // directory, so the rename step must fail
    let bad = fx.tree.join("bad");
    let bad_target = fx.docs.join("bad_target");
    fs::write(&bad_target, b"x").unwrap();
    fx.add_alias(&bad, &bad_target);

    let occupied = fx.tree.join(".bad.backup");
    fs::create_dir(&occupied).unwrap();
    fs::write(occupied.join("sentinel"), b"keep").unwrap();

    // A convertible sibling; must succeed whichever entry the walk
    // meets first
    let good = fx.tree.join("zgood");
    let good_target = fx.docs.join("good_target");
    fs::write(&good_target, b"y").unwrap();
    fx.add_alias(&good, &good_target);

    let tally = fx.run();

    assert_eq!(
        tally,
        RunTally {
            converted: 1,
            failed: 1,
        }
    );
    assert!(bad.is_file(), "the alias whose backup failed stays in place");
    assert!(!bad.is_symlink());
    assert!(occupied.join("sentinel").is_file());
    assert!(good.is_symlink(), "one entry's failure must not end the walk");
}

#[test]
fn cyclic_alias_directory_is_skipped_entirely() {
    let mut fx = Fixture::new();
    let loop_dir = fx.tree.join("loop");
    fs::create_dir(&loop_dir).unwrap();
    // The alias directory's original item is the tree being walked
    let tree = fx.tree.clone();
    fx.mark_alias_dir(&loop_dir, &tree);

    // An alias inside the cycle would convert if the walker descended
    let inner = loop_dir.join("inner");
    let target = fx.docs.join("inner_target");
    fx.add_alias(&inner, &target);

    let tally = fx.run();

    assert_eq!(tally, RunTally::default());
    assert!(loop_dir.is_dir());
    assert!(!loop_dir.is_symlink(), "alias directories are never converted");
    assert!(inner.is_file(), "walker must not descend into the cycle");
}

#[test]
fn safe_alias_directory_is_recursed_but_not_converted() {
    let mut fx = Fixture::new();
    let sub = fx.tree.join("sub");
    fs::create_dir(&sub).unwrap();
    // Original item far outside the walked tree; need not exist
    fx.mark_alias_dir(&sub, Path::new("/Library/Application Support/data"));

    let inner = sub.join("link2");
    let target = fx.docs.join("file2");
    fs::write(&target, b"x").unwrap();
    fx.add_alias(&inner, &target);

    let tally = fx.run();

    assert_eq!(
        tally,
        RunTally {
            converted: 1,
            failed: 0,
        }
    );
    assert!(sub.is_dir());
    assert!(!sub.is_symlink());
    assert!(inner.is_symlink());
}

#[test]
fn nested_alias_files_are_converted() {
    let mut fx = Fixture::new();
    let sub = fx.tree.join("a").join("b");
    fs::create_dir_all(&sub).unwrap();
    let alias = sub.join("deep");
    let target = fx.docs.join("deep_target");
    fs::write(&target, b"x").unwrap();
    fx.add_alias(&alias, &target);

    let tally = fx.run();

    assert_eq!(
        tally,
        RunTally {
            converted: 1,
            failed: 0,
        }
    );
    assert!(alias.is_symlink());
    assert!(sub.join(".deep.backup").is_file());
}

#[test]
fn non_recursive_mode_skips_subdirectories() {
    let mut fx = Fixture::new();
    let top = fx.tree.join("top");
    let top_target = fx.docs.join("t1");
    fs::write(&top_target, b"x").unwrap();
    fx.add_alias(&top, &top_target);

    let sub = fx.tree.join("sub");
    fs::create_dir(&sub).unwrap();
    let nested = sub.join("nested");
    let nested_target = fx.docs.join("t2");
    fs::write(&nested_target, b"y").unwrap();
    fx.add_alias(&nested, &nested_target);

    let tally = fx
        .converter(ConvertOptions { recursive: false })
        .convert(&fx.tree)
        .unwrap();

    assert_eq!(
        tally,
        RunTally {
            converted: 1,
            failed: 0,
        }
    );
    assert!(top.is_symlink());
    assert!(nested.is_file());
    assert!(!nested.is_symlink());
}

#[test]
fn second_run_converts_nothing() {
    let mut fx = Fixture::new();
    let alias = fx.tree.join("link1");
    let target = fx.docs.join("report.pdf");
    fs::write(&target, b"pdf").unwrap();
    fx.add_alias(&alias, &target);

    let first = fx.run();
    assert_eq!(first.converted, 1);

    // The converted entry is now a symlink and no longer classifies as
    // an alias, so a second pass finds nothing to do.
    let second = fx.run();
    assert_eq!(second, RunTally::default());
    assert!(alias.is_symlink());
    assert!(fx.tree.join(".link1.backup").is_file());
}

#[test]
fn root_must_be_a_directory() {
    let fx = Fixture::new();
    let file = fx.tree.join("plain");
    fs::write(&file, b"x").unwrap();

    let err = fx
        .converter(ConvertOptions::default())
        .convert(&file)
        .unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));

    let err = fx
        .converter(ConvertOptions::default())
        .convert(&fx.tree.join("missing"))
        .unwrap_err();
    assert!(matches!(err, Error::NotADirectory { .. }));
}

#[test]
fn mixed_tree_tallies_successes_and_failures() {
    let mut fx = Fixture::new();

    let good = fx.tree.join("good");
    let target = fx.docs.join("target");
    fs::write(&target, b"x").unwrap();
    fx.add_alias(&good, &target);

    let broken = fx.tree.join("broken");
    fx.add_broken_alias(&broken);

    fs::write(fx.tree.join("plain.txt"), b"untouched").unwrap();

    let tally = fx.run();

    assert_eq!(
        tally,
        RunTally {
            converted: 1,
            failed: 1,
        }
    );
}
