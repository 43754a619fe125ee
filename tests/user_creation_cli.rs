use httpmock::prelude::*;
use serde_json::json;
use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_user-creation"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn no_arguments_exits_1_with_usage() {
    let out = run(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
    assert!(out.stdout.is_empty());
}

#[test]
fn extra_arguments_exit_1_with_usage() {
    let out = run(&["I'm Sam", "and another thing"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
}

#[test]
fn unknown_provider_exits_1() {
    let out = run(&["--provider", "carrier-pigeon", "I'm Sam"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown provider"));
}

#[test]
fn help_exits_0() {
    let out = run(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("introduction"));
}

/// Point the binary at a mock ollama server through a temporary config file.
fn mock_ollama_config(server: &MockServer) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[llm]\nprovider = \"ollama\"\nbase_url = \"{}\"\ntimeout_secs = 5",
        server.base_url()
    )
    .unwrap();
    file
}

#[test]
fn introduction_starting_with_hyphen_is_sent_to_the_model() {
    let record = r#"{"name":"Sam","age":19,"hometown":"Tulsa","squadron":4,"major":"Physics"}"#;
    for intro in [
        "- Name: Sam, age 19",
        "-Sam here, 19, from Tulsa",
        "--I am Sam",
    ] {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/chat").body_contains(intro);
            then.status(200).json_body(json!({
                "message": { "role": "assistant", "content": record }
            }));
        });
        let config = mock_ollama_config(&server);
        let config_path = config.path().to_str().unwrap();

        let out = run(&["--config", config_path, intro]);

        assert_eq!(
            out.status.code(),
            Some(0),
            "intro {intro:?}: {}",
            String::from_utf8_lossy(&out.stderr)
        );
        assert_eq!(String::from_utf8_lossy(&out.stdout).trim_end(), record);
        mock.assert();
    }
}
