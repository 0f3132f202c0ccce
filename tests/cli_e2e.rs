#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn blogdesk(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("blogdesk"));
    cmd.env("BLOGDESK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("BLOGDESK_LOG");
    cmd
}

fn initialized() -> TempDir {
    let home = TempDir::new().unwrap();
    blogdesk(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Blog store initialized."));
    home
}

#[test]
fn init_seeds_categories_and_themes() {
    let home = initialized();

    assert!(home.path().join("blog-manager-posts.json").exists());
    blogdesk(&home)
        .args(["category", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Technology"))
        .stdout(predicate::str::contains("Travel"));

    blogdesk(&home)
        .args(["theme", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default Light"))
        .stdout(predicate::str::contains("Elegant"));

    // Second run does not reseed.
    blogdesk(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added").not());
}

#[test]
fn create_list_and_view_posts() {
    let home = initialized();

    blogdesk(&home)
        .args([
            "post", "new", "First trip", "--content", "We went **far**.", "--category", "cat-3",
            "--tag", "travel",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blog post saved as draft: First trip"));

    blogdesk(&home)
        .args(["post", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First trip [Travel]"))
        .stdout(predicate::str::contains("draft"));

    blogdesk(&home)
        .args(["post", "view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("We went **far**."))
        .stdout(predicate::str::contains("Tags: travel"));

    blogdesk(&home)
        .args(["post", "list", "--search", "nothing-matches"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No blog posts found."));
}

#[test]
fn blank_title_is_rejected() {
    let home = initialized();
    blogdesk(&home)
        .args(["post", "new", "  ", "--content", "Body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Please enter a title for your blog post",
        ));
}

#[test]
fn post_body_from_stdin() {
    let home = initialized();
    blogdesk(&home)
        .args(["post", "new", "Piped", "--file", "-"])
        .write_stdin("From a pipe")
        .assert()
        .success();

    blogdesk(&home)
        .args(["post", "view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From a pipe"));
}

#[test]
fn deleting_category_strips_it_from_posts() {
    let home = initialized();
    blogdesk(&home)
        .args(["post", "new", "Tagged", "--content", "x", "--category", "cat-1"])
        .assert()
        .success();

    blogdesk(&home)
        .args(["category", "delete", "cat-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed from 1 post"));

    let posts = fs::read_to_string(home.path().join("blog-manager-posts.json")).unwrap();
    assert!(!posts.contains("cat-1"));

    blogdesk(&home)
        .args(["post", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tagged"));
}

#[test]
fn preview_writes_themed_html() {
    let home = initialized();
    blogdesk(&home)
        .args(["post", "new", "Hello", "--content", "# Title\nSome *text*"])
        .assert()
        .success();

    blogdesk(&home)
        .args(["preview", "1", "--theme", "elegant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains("font-family:Georgia, serif"))
        .stdout(predicate::str::contains("<h1>Title</h1>"))
        .stdout(predicate::str::contains("<em>text</em>"));

    let out = home.path().join("hello.html");
    blogdesk(&home)
        .args(["preview", "1", "--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Preview written to"));
    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("background-color:#ffffff"));
}

#[test]
fn active_theme_cannot_be_deleted() {
    let home = initialized();
    blogdesk(&home)
        .args(["theme", "delete", "default-light"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Cannot delete the active theme",
        ));

    blogdesk(&home)
        .args(["theme", "activate", "elegant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme activated successfully"));

    blogdesk(&home)
        .args(["theme", "delete", "default-light"])
        .assert()
        .success();

    blogdesk(&home)
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Elegant (active)"));
}

#[test]
fn invalid_theme_color_is_rejected() {
    let home = initialized();
    blogdesk(&home)
        .args(["theme", "add", "Bad", "--primary", "teal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid primary color"));
}

#[test]
fn config_round_trip() {
    let home = TempDir::new().unwrap();
    blogdesk(&home)
        .args(["config", "excerpt-length", "20"])
        .assert()
        .success();
    blogdesk(&home)
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("excerpt-length = 20"));
}

#[test]
fn export_creates_archive() {
    let home = initialized();
    blogdesk(&home)
        .args(["post", "new", "Backup me", "--content", "body"])
        .assert()
        .success();

    let archive = home.path().join("posts.tar.gz");
    blogdesk(&home)
        .args(["export", "--output", archive.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 blog post(s)"));
    assert!(archive.exists());
}

#[test]
fn unknown_index_fails() {
    let home = initialized();
    blogdesk(&home)
        .args(["post", "view", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("blog not found: 9"));
}
