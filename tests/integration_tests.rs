//! Integration tests for the recipe-bump CLI
//!
//! These tests run the built binary end-to-end. Manifest requests go to a
//! one-shot HTTP server on localhost and the build tool is a shell stub.
//! Unit tests for individual functions live in their respective source files.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

const RECIPE: &str = "{ fetchurl }:\n{\n  version = \"1.2.0\";\n  sha256 = \"sha256-AAAA\";\n}\n";

fn bump_command(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_recipe-bump"));
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("RUST_LOG", "info");
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_exits_zero() {
    let temp = TempDir::new().unwrap();
    let output = bump_command(&temp).arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--check"));
    assert!(stdout.contains("--force"));
}

#[test]
fn test_unknown_flag_prints_usage_and_exits_one() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("package.nix"), RECIPE).unwrap();

    let output = bump_command(&temp).arg("--bogus").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr was: {}", stderr);
    assert!(stderr.contains("--bogus"));
    // Parsing fails before any manifest request is made
    assert!(!stderr.contains("Fetching release manifest"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_outside_project_fails_before_fetch() {
    let temp = TempDir::new().unwrap();

    let output = bump_command(&temp).arg("--check").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Precondition failed"), "stderr was: {}", stderr);
    assert!(!stderr.contains("Fetching release manifest"));
    assert!(output.stdout.is_empty(), "stdout must stay clean on errors");
}

#[test]
fn test_invalid_project_config_is_reported() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("recipe-bump.yaml"), "timeout_secs: 0\n").unwrap();

    let output = bump_command(&temp).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout_secs"), "stderr was: {}", stderr);
}

#[test]
fn test_version_flag_is_unknown() {
    let temp = TempDir::new().unwrap();
    let output = bump_command(&temp).arg("--version").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
mod with_manifest_server {
    use super::*;
    use std::io::{BufRead, BufReader, ErrorKind, Write};
    use std::net::TcpListener;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use std::thread::{self, JoinHandle};
    use std::time::{Duration, Instant};

    const HEX: &str = "deadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef";
    const NEW_HASH: &str = "sha256-3q2+796tvu/erb7v3q2+796tvu/erb7v3q2+796tvu8=";

    /// Answer exactly one GET with `body`, returning the manifest URL
    fn serve_once(body: String) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/manifest.json", listener.local_addr().unwrap());

        listener.set_nonblocking(true).unwrap();

        let handle = thread::spawn(move || {
            // Give up quietly if the binary never asks, so join() cannot hang
            let deadline = Instant::now() + Duration::from_secs(15);
            let stream = loop {
                match listener.accept() {
                    Ok((stream, _)) => break stream,
                    Err(e) if e.kind() == ErrorKind::WouldBlock && Instant::now() < deadline => {
                        thread::sleep(Duration::from_millis(20));
                    }
                    Err(_) => return,
                }
            };
            stream.set_nonblocking(false).unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            loop {
                line.clear();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
            }

            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
        });

        (url, handle)
    }

    fn manifest(version: &str) -> String {
        format!(
            r#"{{"version": "{}", "linux": {{"amd64": {{"sha256": "{}"}}}}}}"#,
            version, HEX
        )
    }

    /// Project with a stub `nix` whose `build` subcommand exits with `build_status`
    fn project(manifest_url: &str, build_status: i32) -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("flake.nix"), "{ }\n").unwrap();
        fs::write(root.join("package.nix"), RECIPE).unwrap();
        fs::write(
            root.join("recipe-bump.yaml"),
            format!(
                "manifest_url: {}\nlock_command: null\ndiff_command: null\ntimeout_secs: 5\n",
                manifest_url
            ),
        )
        .unwrap();

        let bin = root.join("bin");
        fs::create_dir(&bin).unwrap();
        let stub = bin.join("nix");
        fs::write(
            &stub,
            format!(
                "#!/bin/sh\nif [ \"$1\" = build ]; then echo 'error: builder failed' >&2; exit {}; fi\nexit 0\n",
                build_status
            ),
        )
        .unwrap();
        fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

        temp
    }

    fn run_in(temp: &TempDir, args: &[&str]) -> std::process::Output {
        let path = format!(
            "{}:{}",
            temp.path().join("bin").display(),
            std::env::var("PATH").unwrap_or_default()
        );
        bump_command(temp).args(args).env("PATH", path).output().unwrap()
    }

    fn recipe_of(root: &Path) -> String {
        fs::read_to_string(root.join("package.nix")).unwrap()
    }

    #[test]
    fn test_check_mode_reports_update_and_exits_one() {
        let (url, server) = serve_once(manifest("1.3.0"));
        let temp = project(&url, 0);

        let output = run_in(&temp, &["--check"]);
        server.join().unwrap();

        assert_eq!(
            output.status.code(),
            Some(1),
            "stderr was: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        let new_hash_line = format!("NEW_HASH={}", NEW_HASH);
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(
            lines,
            vec![
                "UPDATE_AVAILABLE=true",
                "CURRENT_VERSION=1.2.0",
                "NEW_VERSION=1.3.0",
                "CURRENT_HASH=sha256-AAAA",
                new_hash_line.as_str(),
            ]
        );
        assert_eq!(recipe_of(temp.path()), RECIPE);
        assert!(!temp.path().join("package.nix.bak").exists());
    }

    #[test]
    fn test_up_to_date_exits_zero_without_writing() {
        let (url, server) = serve_once(manifest("1.2.0"));
        let temp = project(&url, 0);

        let output = run_in(&temp, &[]);
        server.join().unwrap();

        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr was: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert!(output.stdout.is_empty());
        assert_eq!(recipe_of(temp.path()), RECIPE);
    }

    #[test]
    fn test_failed_build_restores_recipe_and_exits_one() {
        let (url, server) = serve_once(manifest("1.3.0"));
        let temp = project(&url, 1);

        let output = run_in(&temp, &[]);
        server.join().unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Build verification failed"), "stderr was: {}", stderr);
        assert_eq!(recipe_of(temp.path()), RECIPE);
        assert!(!temp.path().join("package.nix.bak").exists());
    }

    #[test]
    fn test_successful_update_rewrites_recipe() {
        let (url, server) = serve_once(manifest("1.3.0"));
        let temp = project(&url, 0);

        let output = run_in(&temp, &[]);
        server.join().unwrap();

        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr was: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let recipe = recipe_of(temp.path());
        assert!(recipe.contains("version = \"1.3.0\";"));
        assert!(recipe.contains(&format!("sha256 = \"{}\";", NEW_HASH)));
        assert!(!temp.path().join("package.nix.bak").exists());
    }
}
