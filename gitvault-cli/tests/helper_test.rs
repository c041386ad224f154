use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use gitvault_test_utils::StoreFixture;
use predicates::prelude::*;

const BOB: &str = "protocol=https\nhost=example.com\nusername=bob\n";

/// Build a helper invocation isolated to the fixture's store and config
fn helper_cmd(fixture: &StoreFixture, verb: &str) -> assert_cmd::Command {
  let mut cmd = cargo_bin_cmd!("git-credential-gitvault");
  cmd
    .env("GITVAULT_STORE_DIR", fixture.root())
    .env("XDG_CONFIG_HOME", fixture.root().with_file_name("xdg-config"))
    .arg(verb);
  cmd
}

#[test]
fn help_output_shows_usage() {
  cargo_bin_cmd!("git-credential-gitvault")
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("git credential helper"))
    .stdout(predicate::str::contains("get"))
    .stdout(predicate::str::contains("store"))
    .stdout(predicate::str::contains("erase"))
    .stdout(predicate::str::contains("configure"));
}

#[test]
fn get_with_no_entry_prints_nothing() {
  let fixture = StoreFixture::new();

  helper_cmd(&fixture, "get")
    .write_stdin(BOB)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn store_then_get_round_trip() {
  let fixture = StoreFixture::new();

  helper_cmd(&fixture, "store")
    .write_stdin(format!("{BOB}password=secr3=t\n"))
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  assert!(fixture.has_entry("git/example.com/bob"));
  assert!(fixture.read_entry("git/example.com/bob").contains("login: bob"));

  helper_cmd(&fixture, "get")
    .write_stdin(BOB)
    .assert()
    .success()
    .stdout(predicate::str::contains("password=secr3=t\n"))
    .stdout(predicate::str::contains("username=bob\n"));
}

#[test]
fn get_resolves_single_user_for_host() {
  let fixture = StoreFixture::new().with_entry("git/example.com/bob", "secr3=t", &[("login", "bob")]);

  helper_cmd(&fixture, "get")
    .write_stdin("host=example.com\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("username=bob\n"))
    .stdout(predicate::str::contains("password=secr3=t\n"));
}

#[test]
fn get_with_two_users_for_host_stays_silent() {
  let fixture = StoreFixture::new()
    .with_entry("git/example.com/alice", "pw-a", &[("login", "alice")])
    .with_entry("git/example.com/bob", "pw-b", &[("login", "bob")]);

  helper_cmd(&fixture, "get")
    .write_stdin("host=example.com\n")
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("multiple store entries"));
}

#[test]
fn store_prefix_flag_isolates_credentials() {
  let fixture = StoreFixture::new();

  helper_cmd(&fixture, "store")
    .arg("--store=teststore")
    .write_stdin(format!("{BOB}password=secr3=t\n"))
    .assert()
    .success();

  assert!(fixture.has_entry("teststore/git/example.com/bob"));

  helper_cmd(&fixture, "get")
    .arg("--store=otherstore")
    .write_stdin(BOB)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  helper_cmd(&fixture, "get")
    .arg("--store=teststore")
    .write_stdin(BOB)
    .assert()
    .success()
    .stdout(predicate::str::contains("password=secr3=t\n"));
}

#[test]
fn erase_removes_the_entry() {
  let fixture = StoreFixture::new().with_entry("git/example.com/bob", "secr3=t", &[("login", "bob")]);

  helper_cmd(&fixture, "erase")
    .write_stdin(BOB)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  assert!(!fixture.has_entry("git/example.com/bob"));

  helper_cmd(&fixture, "get")
    .write_stdin(BOB)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
}

#[test]
fn truncated_request_fails_every_verb() {
  let fixture = StoreFixture::new();

  for verb in ["get", "store", "erase"] {
    helper_cmd(&fixture, verb)
      .write_stdin("a")
      .assert()
      .failure()
      .stderr(predicate::str::contains("unexpected end of input"));
  }
}

#[test]
fn config_file_supplies_default_prefix() {
  let fixture = StoreFixture::new();

  let config_dir = fixture.root().with_file_name("xdg-config").join("gitvault");
  fs::create_dir_all(&config_dir).unwrap();
  fs::write(config_dir.join("config.toml"), "store = \"cfgstore\"\n").unwrap();

  helper_cmd(&fixture, "store")
    .write_stdin(format!("{BOB}password=secr3=t\n"))
    .assert()
    .success();

  assert!(fixture.has_entry("cfgstore/git/example.com/bob"));
}
