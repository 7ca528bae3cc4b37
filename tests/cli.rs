use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("downgrade-source").unwrap();
    cmd.env_remove("DOWNGRADE_PKG_PATH")
        .env_remove("DOWNGRADE_TARGET_VERSION")
        .env("NO_COLOR", "1");
    cmd
}

fn package() -> (TempDir, String) {
    let tmp = TempDir::new().unwrap();
    let pkg = tmp.path().join("pkg");
    fs::create_dir_all(&pkg).unwrap();
    fs::write(pkg.join("mod.py"), "x: int = 1\n").unwrap();
    let pkg = pkg.display().to_string();
    (tmp, pkg)
}

#[test]
fn list_checkers() {
    cmd()
        .arg("--list-checkers")
        .assert()
        .code(0)
        .stdout(contains("Checkers List:"))
        .stdout(contains("  - NoStarImports"));
}

#[test]
fn list_fixers_needs_no_files() {
    cmd()
        .arg("--list-fixers")
        .assert()
        .code(0)
        .stdout(contains("Fixers List:"))
        .stdout(contains("  - RemoveAnnAssignFixer"));
}

#[test]
fn unknown_checker_is_usage_error() {
    let (_tmp, pkg) = package();
    cmd()
        .args(["--pkg-path", pkg.as_str(), "--sc", "NoSuchChecker"])
        .arg(format!("{}/mod.py", pkg))
        .assert()
        .code(2)
        .stderr(contains("NoSuchChecker is not a valid checker"));
    assert!(!std::path::Path::new(&pkg).join("downgraded").exists());
}

#[test]
fn unknown_fixer_is_usage_error() {
    let (_tmp, pkg) = package();
    cmd()
        .args(["--pkg-path", pkg.as_str(), "--skip-fixer", "NoSuchFixer"])
        .arg(format!("{}/mod.py", pkg))
        .assert()
        .code(2)
        .stderr(contains("NoSuchFixer is not a valid fixer"));
}

#[test]
fn no_files_is_usage_error() {
    let (_tmp, pkg) = package();
    cmd()
        .args(["--pkg-path", pkg.as_str()])
        .assert()
        .code(2)
        .stderr(contains("No files were passed"));
}

#[test]
fn missing_pkg_path_is_usage_error() {
    let (_tmp, pkg) = package();
    cmd()
        .arg(format!("{}/mod.py", pkg))
        .assert()
        .code(2)
        .stderr(contains("--pkg-path is required"));
}

#[test]
fn file_outside_package_is_rejected_before_any_write() {
    let (tmp, pkg) = package();
    let stray = tmp.path().join("stray.py");
    fs::write(&stray, "y = 2\n").unwrap();

    cmd()
        .args(["--pkg-path", pkg.as_str()])
        .arg(format!("{}/mod.py", pkg))
        .arg(&stray)
        .assert()
        .code(2)
        .stderr(contains("is not inside the package path"));
    assert!(!std::path::Path::new(&pkg).join("downgraded").exists());
}

#[test]
fn missing_input_file() {
    let (_tmp, pkg) = package();
    cmd()
        .args(["--pkg-path", pkg.as_str()])
        .arg(format!("{}/nope.py", pkg))
        .assert()
        .code(2)
        .stderr(contains("File not found"));
}

#[test]
fn missing_interpreter_is_run_failure() {
    let (_tmp, pkg) = package();
    cmd()
        .args([
            "--pkg-path",
            pkg.as_str(),
            "--python",
            "definitely-not-a-python-interpreter-4242",
            "--no-black",
        ])
        .arg(format!("{}/mod.py", pkg))
        .assert()
        .code(3)
        .stderr(contains("not found in PATH"));
}
