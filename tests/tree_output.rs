mod common;

use common::{bare_options, create_fixture, create_fixture_with_content, write_file};
use dirtree::tree::{generate_tree, write_tree, TreeOptions};
use regex::Regex;
use std::fs;

// --- Exact output shape ---

#[test]
fn utf8_shape_and_default_labels() {
    let tmp = create_fixture_with_content(&[("a.txt", "x"), ("sub/b.txt", "yz")]);
    let lines = generate_tree(tmp.path(), &TreeOptions::default()).unwrap();

    assert_eq!(lines.len(), 4, "got: {lines:#?}");
    assert!(
        lines[0].ends_with("/ [3 B, 1 files, 1 dirs]"),
        "root line: {}",
        lines[0]
    );
    assert_eq!(lines[1], "│   ├── sub/ [2 B, 1 files, 0 dirs]");
    assert_eq!(lines[2], "│       └── b.txt [2 B]");
    assert_eq!(lines[3], "    └── a.txt [1 B]");
}

#[test]
fn ascii_shape() {
    let tmp = create_fixture_with_content(&[("a.txt", "x"), ("sub/b.txt", "yz")]);
    let opts = TreeOptions {
        use_ascii: true,
        ..bare_options()
    };
    let lines = generate_tree(tmp.path(), &opts).unwrap();

    assert_eq!(lines[1], "|   +-- sub/");
    assert_eq!(lines[2], "|       `-- b.txt");
    assert_eq!(lines[3], "    `-- a.txt");
    for line in &lines {
        assert!(
            !line.contains('├') && !line.contains('└') && !line.contains('│'),
            "ASCII output must not contain box-drawing glyphs: {line}"
        );
    }
}

#[test]
fn nested_shape() {
    let tmp = create_fixture_with_content(&[
        ("a.txt", "x"),
        ("z.txt", "1234"),
        ("sub/b.txt", "yz"),
        ("sub/deep/c.txt", "abc"),
    ]);
    let lines = generate_tree(tmp.path(), &bare_options()).unwrap();

    let expected_tail = [
        "│   ├── sub/",
        "│   │   ├── deep/",
        "│   │       └── c.txt",
        "│       └── b.txt",
        "│   ├── a.txt",
        "    └── z.txt",
    ];
    assert_eq!(&lines[1..], &expected_tail, "full output: {lines:#?}");
}

// --- Structural properties ---

#[test]
fn line_count_is_descendants_plus_root() {
    let tmp = create_fixture(&["a/", "a/b.txt", "a/c.txt", "d/", "e.txt"]);
    let lines = generate_tree(tmp.path(), &bare_options()).unwrap();
    // 5 filtered-in descendants plus the root line.
    assert_eq!(lines.len(), 6, "got: {lines:#?}");
}

#[test]
fn directory_lines_end_with_separator() {
    let tmp = create_fixture(&["dir/", "dir/nested/", "file.txt"]);
    let lines = generate_tree(tmp.path(), &bare_options()).unwrap();
    for line in &lines {
        let name = line.trim_start_matches(|c: char| "│├└─ ".contains(c));
        if ["dir/", "nested/"].contains(&name) {
            assert!(line.ends_with('/'), "directory line missing slash: {line}");
        }
        if name == "file.txt" {
            assert!(!line.ends_with('/'), "file line has slash: {line}");
        }
    }
}

#[test]
fn directories_sort_before_files_case_insensitive() {
    let tmp = create_fixture(&["Zdir/", "adir/", "Banana.txt", "apple.txt"]);
    let lines = generate_tree(tmp.path(), &bare_options()).unwrap();
    let order: Vec<usize> = ["adir/", "Zdir/", "apple.txt", "Banana.txt"]
        .iter()
        .map(|name| {
            lines
                .iter()
                .position(|l| l.ends_with(name))
                .unwrap_or_else(|| panic!("{name} not found in {lines:#?}"))
        })
        .collect();
    assert!(
        order.windows(2).all(|w| w[0] < w[1]),
        "wrong order: {lines:#?}"
    );
}

#[test]
fn generation_is_idempotent() {
    let tmp = create_fixture(&["a/", "a/b.txt", "c.txt"]);
    let opts = TreeOptions::default();
    let first = generate_tree(tmp.path(), &opts).unwrap();
    let second = generate_tree(tmp.path(), &opts).unwrap();
    assert_eq!(first, second);
}

// --- Labels ---

#[test]
fn date_labels_have_iso_shape() {
    let tmp = create_fixture_with_content(&[("a.txt", "x")]);
    let opts = TreeOptions {
        show_dates: true,
        show_sizes: false,
        show_folder_file_count: false,
        show_folder_subfolder_count: false,
        ..TreeOptions::default()
    };
    let lines = generate_tree(tmp.path(), &opts).unwrap();
    let date_re = Regex::new(r"\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\]$").unwrap();
    let file_line = lines.iter().find(|l| l.contains("a.txt")).unwrap();
    assert!(date_re.is_match(file_line), "no date label: {file_line}");
    // Folder dates follow the general flag.
    assert!(date_re.is_match(&lines[0]), "no folder date: {}", lines[0]);
}

#[test]
fn total_file_count_label() {
    let tmp = create_fixture_with_content(&[("a.txt", "x"), ("sub/b.txt", "yz")]);
    let opts = TreeOptions {
        show_folder_total_file_count: true,
        ..TreeOptions::default()
    };
    let lines = generate_tree(tmp.path(), &opts).unwrap();
    assert!(
        lines[0].ends_with("2 total files]"),
        "root line: {}",
        lines[0]
    );
}

#[test]
fn filtered_root_yields_single_line() {
    let tmp = create_fixture(&["a.txt"]);
    let opts = TreeOptions {
        include: Some("nomatch".into()),
        ..TreeOptions::default()
    };
    let lines = generate_tree(tmp.path(), &opts).unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("/ [FILTERED]"), "got: {}", lines[0]);
}

// --- write_tree ---

#[test]
fn write_tree_creates_parents_and_trailing_newline() {
    let tmp = create_fixture(&["a.txt"]);
    let out_dir = tempfile::TempDir::new().unwrap();
    let outfile = out_dir.path().join("nested/dir/tree.txt");

    write_tree(&outfile, tmp.path(), &bare_options()).unwrap();

    let content = fs::read_to_string(&outfile).unwrap();
    assert!(content.ends_with('\n'));
    assert!(!content.ends_with("\n\n"));
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("a.txt"));
}

#[test]
fn write_tree_for_unresolvable_root_writes_error_line() {
    let out_dir = tempfile::TempDir::new().unwrap();
    let outfile = out_dir.path().join("tree.txt");
    write_tree(&outfile, "/no/such/root/anywhere", &TreeOptions::default()).unwrap();
    let content = fs::read_to_string(&outfile).unwrap();
    assert!(content.starts_with("Error resolving root directory"));
}

// --- Unreadable subtrees degrade, not abort ---

#[test]
#[cfg(unix)]
fn permission_denied_becomes_inline_error() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = create_fixture(&["open/", "open/visible.txt", "locked/", "locked/secret.txt"]);
    let locked = tmp.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can see everything when the test runs as root; only assert the
    // degradation contract when the permission bits actually apply.
    let denied = fs::read_dir(&locked).is_err();
    let lines = generate_tree(tmp.path(), &bare_options()).unwrap();

    if denied {
        assert!(
            lines.iter().any(|l| l.contains("[ERROR listing contents:")),
            "expected synthetic error line: {lines:#?}"
        );
        assert!(lines.iter().all(|l| !l.contains("secret.txt")));
    }
    assert!(
        lines.iter().any(|l| l.contains("visible.txt")),
        "readable subtree must still be reported: {lines:#?}"
    );

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

// --- Root forms ---

#[test]
fn root_line_uses_resolved_basename() {
    let tmp = create_fixture(&["x.txt"]);
    let sub = tmp.path().join("here");
    fs::create_dir(&sub).unwrap();
    write_file(&sub, "y.txt", "");

    let lines = generate_tree(&sub, &bare_options()).unwrap();
    assert!(lines[0].starts_with("here/"), "got: {}", lines[0]);
    assert!(lines.iter().any(|l| l.ends_with("y.txt")));
}
