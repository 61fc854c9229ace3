use std::fs;
use std::path::{Path, PathBuf};
use tagger_core::config::{AppConfig, DEFAULT_EXTENSIONS};
use tagger_core::models::TagFolderMap;
use tagger_core::organizer::Organizer;
use tagger_core::scanner::Scanner;
use tagger_core::tags::TagAssigner;
use tagger_core::App;
use tempfile::tempdir;

fn scanner_for(roots: &[&Path]) -> Scanner {
    let exts: Vec<String> = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
    Scanner::new(roots.iter().map(|r| r.to_path_buf()).collect(), &exts).unwrap()
}

fn app_in(home: &Path) -> App {
    let cfg = AppConfig::for_home(home);
    for root in cfg.roots() {
        fs::create_dir_all(root).unwrap();
    }
    App::from_config(&cfg).unwrap()
}

#[test]
fn scan_returns_only_allowed_extensions() {
    let temp = tempdir().unwrap();
    let downloads = temp.path().join("Downloads");
    let documents = temp.path().join("Documents");
    fs::create_dir_all(&downloads).unwrap();
    fs::create_dir_all(&documents).unwrap();
    for name in ["a.CSV", "b.xls", "c.xlsx", "d.pdf", "e.png"] {
        fs::write(downloads.join(name), "x").unwrap();
    }
    for name in ["f.doc", "g.DocX", "h.txt", "i.md"] {
        fs::write(documents.join(name), "x").unwrap();
    }

    let mut scanner = scanner_for(&[&downloads, &documents]);
    let files = scanner.scan();
    let mut names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["a.CSV", "b.xls", "c.xlsx", "f.doc", "g.DocX", "h.txt"]);
    for f in files {
        let ext = f.ext.to_lowercase();
        assert!(DEFAULT_EXTENSIONS.contains(&ext.as_str()), "{}", f.name);
    }
}

#[test]
fn tag_survives_rescan_of_unmoved_file() {
    let temp = tempdir().unwrap();
    let mut app = app_in(temp.path());
    let report = temp.path().join("Downloads").join("report.xlsx");
    fs::write(&report, "x").unwrap();

    app.scan();
    app.assign_tag(&["report.xlsx"], "work").unwrap();
    app.scan();
    assert_eq!(app.tags().get_tag("report.xlsx"), Some("work"));
    assert_eq!(app.rows()[0].tag, "work");
}

#[test]
fn cleanup_without_tags_moves_nothing() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Downloads");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let organizer = Organizer::new(temp.path().join("Tagged Files"));
    let report = organizer.cleanup(&files, &TagAssigner::new(), &TagFolderMap::new());

    assert_eq!(report.moved_count, 0);
    assert!(report.failures.is_empty());
    assert!(root.join("a.txt").exists());
    assert!(!temp.path().join("Tagged Files").exists());
    assert_eq!(scanner.scan(), files.as_slice());
}

#[test]
fn cleanup_moves_tagged_files_to_mapped_folder() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Downloads");
    let dest = temp.path().join("dest");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("b.csv"), "b").unwrap();
    fs::write(root.join("c.doc"), "c").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["a.txt", "b.csv"], "bills").unwrap();
    let mut folders = TagFolderMap::new();
    folders.insert("bills".into(), dest.clone());

    let report = Organizer::new(temp.path().join("Tagged Files")).cleanup(&files, &tags, &folders);

    assert_eq!(report.moved_count, 2);
    assert!(report.failures.is_empty());
    assert!(dest.join("a.txt").exists());
    assert!(dest.join("b.csv").exists());
    assert!(!root.join("a.txt").exists());
    assert!(!root.join("b.csv").exists());
    assert!(root.join("c.doc").exists());
}

#[test]
fn unmapped_tag_goes_to_default_folder() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Documents");
    let base = temp.path().join("Documents").join("Tagged Files");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("memo.docx"), "m").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["memo.docx"], "x").unwrap();

    let report = Organizer::new(&base).cleanup(&files, &tags, &TagFolderMap::new());

    assert_eq!(report.moved_count, 1);
    assert!(base.join("x").is_dir());
    assert!(base.join("x").join("memo.docx").exists());
    assert_eq!(report.moves[0].to, base.join("x").join("memo.docx"));
}

#[test]
fn collision_is_reported_and_batch_continues() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Downloads");
    let dest = temp.path().join("dest");
    fs::create_dir_all(&root).unwrap();
    fs::create_dir_all(&dest).unwrap();
    fs::write(root.join("a.txt"), "new").unwrap();
    fs::write(root.join("b.txt"), "b").unwrap();
    fs::write(dest.join("a.txt"), "old").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["a.txt", "b.txt"], "t").unwrap();
    let mut folders = TagFolderMap::new();
    folders.insert("t".into(), dest.clone());

    let report = Organizer::new(temp.path()).cleanup(&files, &tags, &folders);

    assert_eq!(report.moved_count, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file_name, "a.txt");
    assert!(report.failures[0].reason.contains("already exists"));
    assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "old");
    assert!(root.join("a.txt").exists());
    assert!(dest.join("b.txt").exists());
}

#[test]
fn vanished_source_is_a_failure_not_an_abort() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Downloads");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("gone.txt"), "g").unwrap();
    fs::write(root.join("kept.txt"), "k").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    fs::remove_file(root.join("gone.txt")).unwrap();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["gone.txt", "kept.txt"], "t").unwrap();

    let base = temp.path().join("out");
    let report = Organizer::new(&base).cleanup(&files, &tags, &TagFolderMap::new());

    assert_eq!(report.moved_count, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].file_name, "gone.txt");
    assert!(base.join("t").join("kept.txt").exists());
}

#[test]
fn dry_run_plans_without_touching_disk() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Downloads");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["a.txt"], "bills").unwrap();

    let base = temp.path().join("out");
    let report = Organizer::new(&base)
        .dry_run(true)
        .cleanup(&files, &tags, &TagFolderMap::new());

    assert!(report.dry_run);
    assert_eq!(report.moved_count, 0);
    assert_eq!(report.moves.len(), 1);
    assert_eq!(report.moves[0].to, base.join("bills").join("a.txt"));
    assert!(root.join("a.txt").exists());
    assert!(!base.exists());
}

#[test]
fn copy_then_delete_mode_moves_content() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("Downloads");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.csv"), "1,2,3").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["a.csv"], "data").unwrap();

    let base = temp.path().join("out");
    let report = Organizer::new(&base)
        .copy_then_delete(true)
        .cleanup(&files, &tags, &TagFolderMap::new());

    assert_eq!(report.moved_count, 1);
    assert!(!root.join("a.csv").exists());
    assert_eq!(
        fs::read_to_string(base.join("data").join("a.csv")).unwrap(),
        "1,2,3"
    );
}

#[test]
fn app_cleanup_rescans_and_uses_persisted_folder() {
    let temp = tempdir().unwrap();
    let mut app = app_in(temp.path());
    let downloads = temp.path().join("Downloads");
    fs::write(downloads.join("a.txt"), "a").unwrap();
    fs::write(downloads.join("b.csv"), "b").unwrap();
    let dest = temp.path().join("bills");

    app.scan();
    app.set_folder("bills", &dest).unwrap();
    app.assign_tag(&["a.txt"], "bills").unwrap();
    let report = app.cleanup();

    assert_eq!(report.moved_count, 1);
    assert!(dest.join("a.txt").exists());
    let names: Vec<&str> = app.files().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["b.csv"]);

    let persisted = fs::read_to_string(temp.path().join(".file_organizer_tags.json")).unwrap();
    let map: TagFolderMap = serde_json::from_str(&persisted).unwrap();
    assert_eq!(map.get("bills"), Some(&PathBuf::from(&dest)));
}

#[test]
fn app_rejects_unknown_and_blank_input() {
    let temp = tempdir().unwrap();
    let mut app = app_in(temp.path());
    fs::write(temp.path().join("Downloads").join("a.txt"), "a").unwrap();
    app.scan();

    assert!(app.assign_tag(&["nope.txt"], "t").unwrap_err().is_validation());
    assert!(app.assign_tag(&["a.txt"], " ").unwrap_err().is_validation());
    assert!(app.assign_tag::<&str>(&[], "t").unwrap_err().is_validation());
    assert!(app.tags().is_empty());
    assert!(app.known_tags().is_empty());
}

#[test]
fn known_tags_start_from_folder_map() {
    let temp = tempdir().unwrap();
    let mut app = app_in(temp.path());
    app.set_folder("bills", temp.path().join("b")).unwrap();
    drop(app);

    let mut app = app_in(temp.path());
    fs::write(temp.path().join("Documents").join("n.txt"), "n").unwrap();
    app.scan();
    app.assign_tag(&["n.txt"], "notes").unwrap();
    app.assign_tag(&["n.txt"], "bills").unwrap();
    assert_eq!(app.known_tags(), &["bills".to_string(), "notes".to_string()]);
}

#[test]
fn column_sort_toggles_direction() {
    let temp = tempdir().unwrap();
    let mut app = app_in(temp.path());
    for name in ["b.txt", "a.txt", "c.txt"] {
        fs::write(temp.path().join("Downloads").join(name), name).unwrap();
    }
    app.scan();

    assert!(!app.sort_by_column(tagger_core::sort::SortKey::Name));
    let names: Vec<String> = app.rows().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);

    assert!(app.sort_by_column(tagger_core::sort::SortKey::Name));
    let names: Vec<String> = app.rows().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["c.txt", "b.txt", "a.txt"]);
}

#[test]
fn move_to_another_filesystem_falls_back_to_copy() {
    let shm = Path::new("/dev/shm");
    if !shm.is_dir() {
        return;
    }
    let temp = tempdir().unwrap();
    let other_fs = tempfile::tempdir_in(shm).unwrap();
    let root = temp.path().join("Downloads");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "cross").unwrap();

    let mut scanner = scanner_for(&[&root]);
    let files = scanner.scan().to_vec();
    let mut tags = TagAssigner::new();
    tags.assign_tag(["a.txt"], "bills").unwrap();
    let mut folders = TagFolderMap::new();
    folders.insert("bills".into(), other_fs.path().join("bills"));

    let report = Organizer::new(temp.path()).cleanup(&files, &tags, &folders);

    assert_eq!(report.moved_count, 1, "{:?}", report.failures);
    assert!(!root.join("a.txt").exists());
    assert_eq!(
        fs::read_to_string(other_fs.path().join("bills").join("a.txt")).unwrap(),
        "cross"
    );
}
