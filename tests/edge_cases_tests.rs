mod common;

use std::fs;

use anyhow::Result;
use common::{GO_HEADER, HEADER, create_processor, pattern_under, snapshot, write_file};
use tempfile::tempdir;

#[test]
fn test_empty_file_gets_header_and_separator() -> Result<()> {
  let temp_dir = tempdir()?;
  let path = write_file(temp_dir.path(), "empty.go", "")?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  processor.process()?;

  assert_eq!(fs::read_to_string(&path)?, GO_HEADER);
  Ok(())
}

#[test]
fn test_crlf_header_is_recognized() -> Result<()> {
  let temp_dir = tempdir()?;
  let content = GO_HEADER.replace('\n', "\r\n") + "package main\r\n";
  write_file(temp_dir.path(), "main.go", &content)?;
  let before = snapshot(temp_dir.path())?;

  let (processor, reporter) = create_processor(temp_dir.path(), HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.already_present, 1);
  assert!(reporter.messages().is_empty());
  assert_eq!(snapshot(temp_dir.path())?, before);
  Ok(())
}

#[test]
fn test_header_with_trailing_whitespace_is_not_recognized() -> Result<()> {
  let temp_dir = tempdir()?;
  let content = GO_HEADER.replacen('\n', " \n", 1) + "package main\n";
  let path = write_file(temp_dir.path(), "main.go", &content)?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.changed, 1);
  assert_eq!(fs::read_to_string(&path)?, format!("{GO_HEADER}{content}"));
  Ok(())
}

#[test]
fn test_header_in_the_wrong_comment_style_is_not_recognized() -> Result<()> {
  let temp_dir = tempdir()?;
  let content = format!("{GO_HEADER}name: app\n");
  let path = write_file(temp_dir.path(), "app.yaml", &content)?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  processor.process()?;

  let expected = GO_HEADER.replace("// ", "# ");
  assert_eq!(fs::read_to_string(&path)?, format!("{expected}{content}"));
  Ok(())
}

#[test]
fn test_header_after_a_leading_line_is_not_recognized() -> Result<()> {
  let temp_dir = tempdir()?;
  let content = format!("//go:build linux\n{GO_HEADER}package main\n");
  let path = write_file(temp_dir.path(), "main_linux.go", &content)?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.changed, 1);
  assert_eq!(fs::read_to_string(&path)?, format!("{GO_HEADER}{content}"));
  Ok(())
}

#[test]
fn test_files_with_a_required_first_line_are_skipped_by_default() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "deploy.sh", "#!/bin/bash\necho hi\n")?;
  write_file(temp_dir.path(), "tool.py", "#!/usr/bin/env python3\nprint('hi')\n")?;
  write_file(temp_dir.path(), "index.php", "<?php\necho 'hi';\n")?;
  let before = snapshot(temp_dir.path())?;

  let (processor, reporter) = create_processor(temp_dir.path(), HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.checked, 0);
  assert!(reporter.messages().is_empty());
  assert_eq!(snapshot(temp_dir.path())?, before);
  Ok(())
}

#[test]
fn test_binary_content_is_preserved() -> Result<()> {
  let temp_dir = tempdir()?;
  let path = temp_dir.path().join("blob.c");
  let original: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
  fs::write(&path, &original)?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  processor.process()?;

  let written = fs::read(&path)?;
  assert!(written.starts_with(GO_HEADER.as_bytes()));
  assert_eq!(&written[GO_HEADER.len()..], &original[..]);
  Ok(())
}

#[test]
fn test_files_without_extension_are_skipped() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "Dockerfile", "FROM scratch\n")?;
  write_file(temp_dir.path(), "LICENSE", "Apache-2.0\n")?;
  write_file(temp_dir.path(), ".gitignore", "target/\n")?;
  let before = snapshot(temp_dir.path())?;

  let (processor, reporter) = create_processor(temp_dir.path(), HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.checked, 0);
  assert!(reporter.messages().is_empty());
  assert_eq!(snapshot(temp_dir.path())?, before);
  Ok(())
}

#[test]
fn test_extension_lookup_ignores_case() -> Result<()> {
  let temp_dir = tempdir()?;
  let path = write_file(temp_dir.path(), "Main.GO", "package main\n")?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  processor.process()?;

  assert!(fs::read_to_string(&path)?.starts_with(GO_HEADER));
  Ok(())
}

#[test]
fn test_single_file_root() -> Result<()> {
  let temp_dir = tempdir()?;
  let target = write_file(temp_dir.path(), "main.go", "package main\n")?;
  let sibling = write_file(temp_dir.path(), "other.go", "package main\n")?;

  let (processor, reporter) = create_processor(&target, HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.changed, 1);
  assert_eq!(reporter.messages(), vec![format!("added header to {}", target.display())]);
  assert_eq!(fs::read_to_string(&sibling)?, "package main\n");
  Ok(())
}

#[test]
fn test_single_file_root_honors_exclusions() -> Result<()> {
  let temp_dir = tempdir()?;
  let target = write_file(temp_dir.path(), "main_test.go", "package main\n")?;

  let pattern = pattern_under(temp_dir.path(), "*_test.go");
  let (processor, _) = create_processor(&target, HEADER, &[pattern.as_str()], false);
  let summary = processor.process()?;

  assert_eq!(summary.checked, 0);
  assert_eq!(fs::read_to_string(&target)?, "package main\n");
  Ok(())
}

#[test]
fn test_exclusion_matches_the_same_files_from_a_nested_root() -> Result<()> {
  let temp_dir = tempdir()?;
  let project = temp_dir.path();
  let vendored = write_file(project, "src/vendor/lib.go", "package lib\n")?;
  write_file(project, "src/main.go", "package main\n")?;
  write_file(project, "cmd/tool.go", "package main\n")?;
  let pattern = pattern_under(project, "src/vendor/**");

  // Walking only src/ must exclude exactly what walking the project does
  let (processor, _) = create_processor(&project.join("src"), HEADER, &[pattern.as_str()], true);
  let nested = processor.process()?;
  let (processor, _) = create_processor(project, HEADER, &[pattern.as_str()], true);
  let whole = processor.process()?;

  assert_eq!(nested.changed, 1);
  assert_eq!(whole.changed, 2);

  let (processor, _) = create_processor(&project.join("src"), HEADER, &[pattern.as_str()], false);
  processor.process()?;
  assert_eq!(fs::read_to_string(&vendored)?, "package lib\n");
  Ok(())
}

#[test]
fn test_root_relative_patterns_do_not_match_absolute_walks() -> Result<()> {
  let temp_dir = tempdir()?;
  let path = write_file(temp_dir.path(), "gen/api.go", "package gen\n")?;

  // The walked path starts with the root, so "gen/" alone never matches it
  let (processor, _) = create_processor(temp_dir.path(), HEADER, &["gen/"], false);
  processor.process()?;

  assert!(fs::read_to_string(&path)?.starts_with(GO_HEADER));
  Ok(())
}

#[test]
fn test_invalid_exclusion_pattern_is_ignored() -> Result<()> {
  let temp_dir = tempdir()?;
  let path = write_file(temp_dir.path(), "main.go", "package main\n")?;

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &["[unclosed"], false);
  let summary = processor.process()?;

  assert_eq!(summary.changed, 1);
  assert!(fs::read_to_string(&path)?.starts_with(GO_HEADER));
  Ok(())
}

#[test]
fn test_no_temporary_files_are_left_behind() -> Result<()> {
  let temp_dir = tempdir()?;
  for i in 0..10 {
    write_file(temp_dir.path(), &format!("dir{}/file{i}.rs", i % 3), "fn main() {}\n")?;
  }

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  processor.process()?;

  let names: Vec<String> = snapshot(temp_dir.path())?.into_iter().map(|(name, _)| name).collect();
  assert_eq!(names.len(), 10);
  assert!(names.iter().all(|name| name.ends_with(".rs")));
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_followed_or_replaced() -> Result<()> {
  use std::os::unix::fs::symlink;

  let temp_dir = tempdir()?;
  let outside = tempdir()?;
  let target = write_file(outside.path(), "target.go", "package target\n")?;
  let link = temp_dir.path().join("link.go");
  symlink(&target, &link)?;

  let (processor, reporter) = create_processor(temp_dir.path(), HEADER, &[], false);
  let summary = processor.process()?;

  assert_eq!(summary.checked, 0);
  assert!(reporter.messages().is_empty());
  assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
  assert_eq!(fs::read_to_string(&target)?, "package target\n");
  Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_aborts_with_check_error() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  use copygen::processor::ProcessError;

  let temp_dir = tempdir()?;
  let path = write_file(temp_dir.path(), "secret.go", "package secret\n")?;
  let later = write_file(temp_dir.path(), "tool.go", "package tool\n")?;
  fs::set_permissions(&path, fs::Permissions::from_mode(0o000))?;

  // Root can read the file regardless of its mode
  if fs::read(&path).is_ok() {
    return Ok(());
  }

  let (processor, _) = create_processor(temp_dir.path(), HEADER, &[], false);
  let err = processor.process().expect_err("unreadable file");

  fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;
  assert!(matches!(err, ProcessError::CheckHeader { .. }));
  assert_eq!(fs::read_to_string(&later)?, "package tool\n");
  Ok(())
}
