// Regression tests for the command surface: exit codes, diagnostics, outputs.
// Requires: assert_cmd, predicates, tempfile crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::tempdir;

fn corpus_cmd() -> Command {
    Command::cargo_bin("sutra-corpus").unwrap()
}

#[test]
fn cli_flat_dump_writes_documents() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(define gold 10)").unwrap();
    let out = tempdir().unwrap();

    corpus_cmd()
        .arg("flat-dump")
        .arg(input.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(contains("Wrote 1 documents"));

    let doc = fs::read_to_string(out.path().join("00000001.txt")).unwrap();
    assert_eq!(doc, "define gold 10");
}

#[test]
fn cli_tree_dump_without_literals() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(define gold 10)").unwrap();
    let out = tempdir().unwrap();

    corpus_cmd()
        .args(["tree-dump", "--literals", "false", "-o"])
        .arg(out.path())
        .arg(input.path())
        .assert()
        .success();

    let doc = fs::read_to_string(out.path().join("00000001.txt")).unwrap();
    assert_eq!(doc, "((define gold ()))");
}

#[test]
fn cli_reports_collision_and_fails() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(a)").unwrap();
    let out = tempdir().unwrap();
    fs::write(out.path().join("00000001.txt"), "previous run").unwrap();

    corpus_cmd()
        .arg("flat-dump")
        .arg(input.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(contains("sutra_corpus::collision").or(contains("already exists")));

    let doc = fs::read_to_string(out.path().join("00000001.txt")).unwrap();
    assert_eq!(doc, "previous run");
}

#[test]
fn cli_skips_unparsable_and_succeeds() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("bad.sutra"), "(define x 42" /* missing closing paren */).unwrap();
    fs::write(input.path().join("good.sutra"), "(x)").unwrap();
    let out = tempdir().unwrap();

    corpus_cmd()
        .arg("flat-dump")
        .arg(input.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stderr(contains("unparsable"))
        .stdout(contains("Skipped (unparsable): 1"));

    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 1);
}

#[test]
fn cli_writes_manifest() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(a)").unwrap();
    fs::write(input.path().join("b.md"), "# notes").unwrap();
    let out = tempdir().unwrap();
    let manifest_dir = tempdir().unwrap();
    let manifest = manifest_dir.path().join("manifest.json");

    corpus_cmd()
        .arg("flat-dump")
        .arg(input.path())
        .arg("--out")
        .arg(out.path())
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(json["entries_visited"], 2);
    assert_eq!(json["written"], 1);
    assert_eq!(json["skipped_unparsable"], 0);
    assert_eq!(json["skipped_extension"], 1);
    assert_eq!(json["encoding"]["mode"], "flat");
    assert_eq!(json["encoding"]["include_literals"], true);
    assert_eq!(json["encoding"]["subtokenize"], false);
    assert_eq!(json["files"][0]["status"], "written");
    assert_eq!(json["files"][1]["status"], "skipped_non_matching_extension");
}

#[test]
fn cli_manifest_records_tree_options() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(a)").unwrap();
    fs::write(input.path().join("b.sutra"), "(b").unwrap();
    let out = tempdir().unwrap();
    let manifest_dir = tempdir().unwrap();
    let manifest = manifest_dir.path().join("manifest.json");

    corpus_cmd()
        .args(["tree-dump", "--literals", "false", "--subtokenize", "--manifest"])
        .arg(&manifest)
        .arg("--out")
        .arg(out.path())
        .arg(input.path())
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(json["encoding"]["mode"], "tree");
    assert_eq!(json["encoding"]["include_literals"], false);
    assert_eq!(json["encoding"]["subtokenize"], true);
    assert_eq!(json["written"], 1);
    assert_eq!(json["skipped_unparsable"], 1);
}

#[test]
fn cli_subtokenized_flat_dump() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(setKind ASTParser)").unwrap();
    let out = tempdir().unwrap();

    corpus_cmd()
        .args(["flat-dump", "--subtokenize", "--out"])
        .arg(out.path())
        .arg(input.path())
        .assert()
        .success();

    let doc = fs::read_to_string(out.path().join("00000001.txt")).unwrap();
    assert_eq!(doc, "set kind ast parser");
}

#[test]
fn cli_vocab_writes_sorted_counts() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(give gold 10) (give gold 5)").unwrap();
    fs::write(input.path().join("b.sutra"), "(take gold)").unwrap();
    let dir = tempdir().unwrap();
    let vocab = dir.path().join("vocab.txt");

    corpus_cmd()
        .arg("vocab")
        .arg(input.path())
        .arg("--out")
        .arg(&vocab)
        .assert()
        .success()
        .stdout(contains("Wrote 2 tokens"));

    let text = fs::read_to_string(&vocab).unwrap();
    assert_eq!(text, "3\tgold\n2\tgive\n");
}

#[test]
fn cli_vocab_subtokens_with_min_count() {
    let input = tempdir().unwrap();
    fs::write(input.path().join("a.sutra"), "(setGold getGold \"x\")").unwrap();
    let dir = tempdir().unwrap();
    let vocab = dir.path().join("vocab.txt");

    corpus_cmd()
        .args(["vocab", "--subtokenize", "--literals", "false", "--min-count", "1", "-o"])
        .arg(&vocab)
        .arg(input.path())
        .assert()
        .success();

    let text = fs::read_to_string(&vocab).unwrap();
    assert_eq!(text, "2\tgold\n1\tget\n1\tset\n");
}

#[test]
fn cli_requires_out() {
    let input = tempdir().unwrap();
    corpus_cmd()
        .arg("flat-dump")
        .arg(input.path())
        .assert()
        .failure();
}

#[test]
fn cli_rejects_extra_input_paths() {
    let a = tempdir().unwrap();
    let b = tempdir().unwrap();
    let out = tempdir().unwrap();
    corpus_cmd()
        .arg("tree-dump")
        .arg("--out")
        .arg(out.path())
        .arg(a.path())
        .arg(b.path())
        .assert()
        .failure();
}

#[test]
fn cli_show_prints_encoding() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("s.sutra");
    fs::write(&file, "(go north)").unwrap();

    corpus_cmd()
        .arg("show")
        .arg(&file)
        .arg("--tree")
        .assert()
        .success()
        .stdout("((go north ))\n");
}

#[test]
fn cli_show_reports_parse_diagnostic() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("bad.sutra");
    fs::write(&file, "(define x 42").unwrap();

    corpus_cmd()
        .arg("show")
        .arg(&file)
        .assert()
        .failure()
        .stderr(contains("sutra_corpus::parse").or(contains("Parse error")));
}
