//! Digest output for well-formed trees

use crate::common::TestTree;
use crate::ts;
use anyhow::Result;
use std::collections::HashSet;

const SHA1_EMPTY: &str = "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709";
const SHA1_ABC: &str = "A9993E364706816ABA3E25717850C26C9CD0D89D";
const SHA1_X: &str = "11F6AD8EC52A2984ABAAFD7C3B516503785C2072";

#[test]
fn test_single_file_root() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("abc.txt", b"abc")?;

    let result = ts!(tree.path(), "abc.txt").assert_success()?;

    assert_eq!(result.stdout, format!("{} abc.txt\n", SHA1_ABC));
    assert!(result.stderr.is_empty(), "unexpected stderr: {}", result.stderr);
    Ok(())
}

#[test]
fn test_directory_with_empty_file_and_subdir() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("data/a.txt", b"")?.file("data/sub/b.txt", b"x")?;

    let result = ts!(tree.path(), "data").assert_success()?;

    assert_eq!(
        result.digests()?,
        vec![
            (SHA1_EMPTY.to_string(), "data/a.txt".to_string()),
            (SHA1_X.to_string(), "data/sub/b.txt".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn test_every_file_appears_exactly_once() -> Result<()> {
    let tree = TestTree::new()?;
    let mut expected = HashSet::new();
    for depth in 0..5 {
        let dir = (0..depth).map(|d| format!("level{}", d)).collect::<Vec<_>>().join("/");
        for i in 0..5 {
            let rel = if dir.is_empty() {
                format!("root/file{}.bin", i)
            } else {
                format!("root/{}/file{}.bin", dir, i)
            };
            tree.file(&rel, format!("{}:{}", depth, i).as_bytes())?;
            expected.insert(rel);
        }
    }

    let result = ts!(tree.path(), "root").assert_success()?;
    let digests = result.digests()?;

    assert_eq!(digests.len(), 25);
    let seen: HashSet<String> = digests.into_iter().map(|(_, path)| path).collect();
    assert_eq!(seen, expected);
    Ok(())
}

#[test]
fn test_repeat_runs_are_identical() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("data/one", b"first")?
        .file("data/two/three", b"second")?
        .file("data/two/four", &vec![7u8; 100_000])?;

    let first = ts!(tree.path(), "data").assert_success()?;
    let second = ts!(tree.path(), "data").assert_success()?;

    assert_eq!(first.digests()?, second.digests()?);
    Ok(())
}

#[test]
fn test_empty_directories_produce_nothing() -> Result<()> {
    let tree = TestTree::new()?;
    tree.dir("data/empty/deeper/still_empty")?;

    let result = ts!(tree.path(), "data").assert_success()?;

    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinks_produce_no_lines() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("outside/target.txt", b"abc")?
        .file("data/real.txt", b"abc")?;
    tree.symlink(&tree.join("outside"), "data/dir_link")?
        .symlink(&tree.join("outside/target.txt"), "data/file_link")?;

    let result = ts!(tree.path(), "data").assert_success()?;

    assert_eq!(
        result.digests()?,
        vec![(SHA1_ABC.to_string(), "data/real.txt".to_string())]
    );
    assert_eq!(result.digest_for("data/file_link"), None);
    Ok(())
}

#[test]
fn test_verbose_logs_stay_on_stderr() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("data/a", b"abc")?;

    let result = ts!(tree.path(), "--verbose", "data").assert_success()?;

    assert_eq!(result.digest_for("data/a").as_deref(), Some(SHA1_ABC));
    assert_eq!(result.digests()?.len(), 1);
    assert!(result.stderr.contains("traversal finished"));
    Ok(())
}

#[test]
fn test_log_env_overrides_verbose() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("data/a", b"abc")?;

    let result = ts!(tree.path(), "-v", "data")
        .env("TREESUM_LOG", "off")
        .assert_success()?;

    assert_eq!(result.digests()?.len(), 1);
    assert!(result.stderr.is_empty(), "unexpected stderr: {}", result.stderr);
    Ok(())
}

#[test]
fn test_trailing_slash_root_is_not_normalized() -> Result<()> {
    let tree = TestTree::new()?;
    tree.file("data/a.txt", b"")?.file("data/sub/b.txt", b"x")?;

    let result = ts!(tree.path(), "data/").assert_success()?;

    assert_eq!(
        result.digests()?,
        vec![
            (SHA1_EMPTY.to_string(), "data//a.txt".to_string()),
            (SHA1_X.to_string(), "data//sub/b.txt".to_string()),
        ]
    );
    Ok(())
}
