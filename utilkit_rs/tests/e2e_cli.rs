//! End-to-End CLI Tests for utilkit
//!
//! Drives the binary through stdin scripts (interactive mode) and argv
//! (one-shot mode).

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary running in an empty temp dir so no stray config is picked up.
fn utilkit(cwd: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("utilkit");
    cmd.current_dir(cwd.path()).env_remove("UTILKIT_LOG");
    cmd
}

// ============================================
// Interactive Mode
// ============================================

mod interactive {
    use super::*;

    #[test]
    fn trims_quoted_argument() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .write_stdin("strutil:Trim '  hello  '\nexit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("> hello\n"));
    }

    #[test]
    fn prints_banner_and_registration_status() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .args(["--color", "never"])
            .write_stdin("quit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("utilkit interactive tools"))
            .stderr(predicate::str::contains("strutil register success"))
            .stderr(predicate::str::contains("fileutil register success"));
    }

    #[test]
    fn no_banner_flag() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .arg("--no-banner")
            .write_stdin("exit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("interactive tools").not());
    }

    #[test]
    fn list_shows_registered_functions() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .write_stdin("list\nexit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("strutil:Trim"))
            .stdout(predicate::str::contains("strutil:ToUpper"))
            .stdout(predicate::str::contains("fileutil:DirStat  (path, int, bool)"));
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .write_stdin(
                "strutil:Trim a b\nnosuch:Fn\na:b:c\nstrutil:Trim 'x\nstrutil:ToUpper done\n",
            )
            .assert()
            .success()
            .stdout(predicate::str::contains("expected 1, got 2"))
            .stdout(predicate::str::contains("function not found: nosuch:Fn"))
            .stdout(predicate::str::contains("malformed command 'a:b:c'"))
            .stdout(predicate::str::contains("unterminated quote"))
            .stdout(predicate::str::contains("DONE"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd).write_stdin("").assert().success();
    }
}

// ============================================
// One-shot Mode
// ============================================

mod one_shot {
    use super::*;

    #[test]
    fn runs_single_command() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .args(["strutil:Trim", "  hello  "])
            .assert()
            .success()
            .stdout("hello\n");
    }

    #[test]
    fn unknown_function_fails() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .args(["strutil:Nope"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("function not found"));
    }

    #[test]
    fn dir_stat_saves_report_under_configured_dir() {
        let cwd = TempDir::new().unwrap();
        std::fs::create_dir_all(cwd.path().join(".utilkit")).unwrap();
        std::fs::write(
            cwd.path().join(".utilkit/config.toml"),
            "report_dir = \"reports\"\n",
        )
        .unwrap();

        let assets = TempDir::new().unwrap();
        std::fs::write(assets.path().join("big.png"), vec![0u8; 4096]).unwrap();
        std::fs::write(assets.path().join("small.css"), vec![0u8; 10]).unwrap();

        utilkit(&cwd)
            .args([
                "fileutil:DirStat",
                assets.path().to_str().unwrap(),
                "1024",
                "true",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Files >= 1.00KB: 1, total size: 4.00KB"))
            .stdout(predicate::str::contains("Large file list saved to:"));

        let saved: Vec<_> = std::fs::read_dir(cwd.path().join("reports"))
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(saved.len(), 1);
        let body = std::fs::read_to_string(saved[0].path()).unwrap();
        assert!(body.contains("big.png"));
        assert!(!body.contains("small.css"));
    }

    #[test]
    fn dir_stat_rejects_non_numeric_threshold() {
        let cwd = TempDir::new().unwrap();
        utilkit(&cwd)
            .args(["fileutil:DirStat", ".", "lots", "false"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("argument 2: expected int"));
    }
}
