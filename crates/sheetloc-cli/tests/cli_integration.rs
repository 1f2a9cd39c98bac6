use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;

mod helpers;
use helpers::*;

fn two_languages() -> Project {
    let p = Project::new(&["de", "fr"]);
    p.catalog("de", "app", &[("Hello", ""), ("Bye", "Tschüss")]);
    p.catalog("de", "errors", &[("Oops", "")]);
    p.catalog("fr", "app", &[("Hello", "Bonjour"), ("Bye", "")]);
    p
}

#[test]
fn help_lists_commands() {
    let p = Project::new(&["de"]);
    p.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn export_writes_one_workbook_per_language() {
    let p = two_languages();
    let out = p
        .cmd()
        .args(["export", "sheetloc.config.toml", "sheets", "all", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let summary = json_stdout(&out);
    assert_eq!(summary["mode"], "all");
    assert_eq!(summary["rows"], 5);
    assert_eq!(summary["workbooks"].as_array().unwrap().len(), 2);
    assert!(p.sheets.join("de.xlsx").is_file());
    assert!(p.sheets.join("fr.xlsx").is_file());
}

#[test]
fn export_new_mode_is_the_default() {
    let p = two_languages();
    let out = p
        .cmd()
        .args(["export", "sheetloc.config.toml", "sheets", "--format", "json"])
        .output()
        .unwrap();
    let summary = json_stdout(&out);
    assert_eq!(summary["mode"], "new");
    // de: Hello + Oops, fr: Bye
    assert_eq!(summary["rows"], 3);
}

#[test]
fn export_without_output_directory_fails_before_writing() {
    let p = two_languages();
    p.cmd()
        .args(["export", "sheetloc.config.toml", "missing-dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory does not exist"));
    assert!(!p.path().join("missing-dir").exists());
}

#[test]
fn wrong_catalog_format_is_fatal() {
    let p = two_languages();
    fs::write(
        &p.config,
        "format = \"json\"\nmessagePath = \"messages\"\nlanguages = [\"de\"]\n",
    )
    .unwrap();
    p.cmd()
        .args(["export", "sheetloc.config.toml", "sheets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format must be \"toml\""));
    assert_eq!(fs::read_dir(&p.sheets).unwrap().count(), 0);
}

#[test]
fn empty_language_list_is_fatal() {
    let p = two_languages();
    fs::write(&p.config, "messagePath = \"messages\"\nlanguages = []\n").unwrap();
    p.cmd()
        .args(["import", "sheetloc.config.toml", "sheets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Languages cannot be empty"));
}

#[test]
fn nothing_to_export_is_not_an_error() {
    let p = two_languages();
    p.cmd()
        .args([
            "export",
            "sheetloc.config.toml",
            "sheets",
            "--unlisted-languages",
            "exclude",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("nothing to export"));
    assert_eq!(fs::read_dir(&p.sheets).unwrap().count(), 0);
}

#[test]
fn export_then_import_applies_translations() {
    let p = two_languages();
    p.cmd()
        .args(["export", "sheetloc.config.toml", "sheets", "all"])
        .assert()
        .success();
    p.workbook("de", &[("app", &[("Hello", "Hallo"), ("Bye", "Tschüss")])]);

    let out = p
        .cmd()
        .args(["import", "sheetloc.config.toml", "sheets", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let summary = json_stdout(&out);
    assert_eq!(summary["updated"], 1);
    assert_eq!(summary["keys"], 1);
    assert_eq!(
        p.read_catalog("de", "app"),
        catalog(&[("Hello", "Hallo"), ("Bye", "Tschüss")])
    );
    // fr came back from its own export untouched
    assert_eq!(
        p.read_catalog("fr", "app"),
        catalog(&[("Hello", "Bonjour"), ("Bye", "")])
    );
}

#[test]
fn excluded_language_catalogs_stay_untouched() {
    let p = two_languages();
    let fr = p.catalog_path("fr", "app");
    let before = fs::read(&fr).unwrap();
    p.workbook("de", &[("app", &[("Hello", "Hallo")])]);
    p.workbook("fr", &[("app", &[("Bye", "Au revoir")])]);

    p.cmd()
        .args([
            "import",
            "sheetloc.config.toml",
            "sheets",
            "--languages",
            "de",
        ])
        .assert()
        .success();
    assert_eq!(fs::read(&fr).unwrap(), before);
    assert_eq!(p.read_catalog("de", "app")["Hello"], "Hallo");
}

#[test]
fn new_mode_import_keeps_existing_translations() {
    let p = two_languages();
    p.workbook("de", &[("app", &[("Hello", "Hallo"), ("Bye", "Ciao")])]);
    let out = p
        .cmd()
        .args(["import", "sheetloc.config.toml", "sheets", "xlsx", "new", "--format", "json"])
        .output()
        .unwrap();
    let summary = json_stdout(&out);
    assert_eq!(summary["mode"], "new");
    assert_eq!(summary["files"][0]["kept"][0], "Bye");
    assert_eq!(
        p.read_catalog("de", "app"),
        catalog(&[("Hello", "Hallo"), ("Bye", "Tschüss")])
    );
}

#[test]
fn missing_category_and_removed_keys_do_not_fail_the_run() {
    let p = two_languages();
    p.workbook(
        "de",
        &[
            ("app", &[("Hello", "Hallo"), ("Removed", "X")]),
            ("gone", &[("Whatever", "Egal")]),
        ],
    );
    let out = p
        .cmd()
        .args(["import", "sheetloc.config.toml", "sheets", "--format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let summary = json_stdout(&out);
    assert_eq!(summary["missing"], 1);
    assert_eq!(summary["updated"], 1);
    assert!(!p.catalog_path("de", "gone").exists());
    assert!(!p.read_catalog("de", "app").contains_key("Removed"));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no catalog at"), "{stderr}");
}

#[test]
fn dry_run_writes_nothing() {
    let p = two_languages();
    let de = p.catalog_path("de", "app");
    let before = fs::read(&de).unwrap();
    p.workbook("de", &[("app", &[("Hello", "Hallo")])]);
    p.cmd()
        .args(["import", "sheetloc.config.toml", "sheets", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("planned"))
        .stdout(predicate::str::contains("DRY-RUN"));
    assert_eq!(fs::read(&de).unwrap(), before);
}

#[test]
fn backup_keeps_the_previous_catalog() {
    let p = two_languages();
    let de = p.catalog_path("de", "app");
    let before = fs::read(&de).unwrap();
    p.workbook("de", &[("app", &[("Hello", "Hallo")])]);
    p.cmd()
        .args(["import", "sheetloc.config.toml", "sheets", "--backup"])
        .assert()
        .success();
    assert_eq!(fs::read(de.with_extension("toml.bak")).unwrap(), before);
}

#[test]
fn defaults_file_sets_export_mode() {
    let p = two_languages();
    fs::write(p.path().join("sheetloc.toml"), "[export]\nmode = \"all\"\n").unwrap();
    let out = p
        .cmd()
        .args(["export", "sheetloc.config.toml", "sheets", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&out)["mode"], "all");
}

#[test]
fn no_color_output_has_no_ansi() {
    let p = two_languages();
    let out = p
        .cmd()
        .args(["--no-color", "export", "sheetloc.config.toml", "sheets", "all"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(!has_ansi(&String::from_utf8_lossy(&out.stdout)));
}

#[test]
fn schema_dumps_report_schemas() {
    let p = Project::new(&["de"]);
    p.cmd()
        .args(["schema", "--out-dir", "schemas"])
        .assert()
        .success();
    for name in [
        "export_summary.schema.json",
        "import_summary.schema.json",
        "catalog_file_stat.schema.json",
    ] {
        let text = fs::read_to_string(p.path().join("schemas").join(name)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(v.get("title").is_some(), "{name}");
    }
}
