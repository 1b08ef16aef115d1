use std::collections::VecDeque;
use std::path::PathBuf;

use mcmanager::Res;
use mcmanager::config::Config;
use mcmanager::credentials::{AuthSource, Netrc, Prompter, from_netrc, resolve};
use mcmanager::error::Error;
use mcmanager::types::{Credentials, LoginRequest};

/// Answers prompts from a fixed script and records what was asked.
#[derive(Default)]
struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    complaints: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    fn next(&mut self, prompt: String) -> Res<String> {
        self.asked.push(prompt);
        Ok(self.answers.pop_front().expect("prompted more often than scripted"))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Res<String> {
        self.next(prompt.to_string())
    }

    fn password(&mut self, prompt: &str) -> Res<String> {
        self.next(format!("{} (hidden)", prompt))
    }

    fn complain(&mut self, message: &str) {
        self.complaints.push(message.to_string());
    }
}

fn test_config(netrc_path: PathBuf) -> Config {
    Config {
        api_url: "http://127.0.0.1:9".to_string(),
        netrc_path,
        user_agent: "mcmanager-test".to_string(),
    }
}

fn interactive(values: &[&str]) -> AuthSource {
    AuthSource::Interactive(values.iter().map(|v| v.to_string()).collect())
}

#[test]
fn test_no_values_prompts_for_everything() {
    let config = test_config(PathBuf::from("unused"));
    let mut prompter = ScriptedPrompter::new(&["a@b.com", "reader", "secret"]);

    let creds = resolve(&interactive(&[]), &config, &mut prompter).unwrap();

    assert_eq!(
        creds,
        Credentials {
            email: "a@b.com".to_string(),
            username: "reader".to_string(),
            password: "secret".to_string(),
        }
    );
    assert_eq!(prompter.asked, vec!["E-mail", "Username", "Password (hidden)"]);
}

#[test]
fn test_email_given_prompts_for_the_rest() {
    let config = test_config(PathBuf::from("unused"));
    let mut prompter = ScriptedPrompter::new(&["reader", "secret"]);

    let creds = resolve(&interactive(&["a@b.com"]), &config, &mut prompter).unwrap();

    assert_eq!(creds.email, "a@b.com");
    assert_eq!(creds.username, "reader");
    assert_eq!(creds.password, "secret");
    assert_eq!(prompter.asked, vec!["Username", "Password (hidden)"]);
}

#[test]
fn test_all_values_given_prompts_nothing() {
    let config = test_config(PathBuf::from("unused"));
    let mut prompter = ScriptedPrompter::new(&[]);

    let creds = resolve(&interactive(&["a@b.com", "reader", "secret"]), &config, &mut prompter).unwrap();

    assert_eq!(creds.password, "secret");
    assert!(prompter.asked.is_empty());
}

#[test]
fn test_more_than_three_values_is_a_config_error() {
    let config = test_config(PathBuf::from("unused"));
    let mut prompter = ScriptedPrompter::new(&[]);

    let err = resolve(&interactive(&["a@b.com", "reader", "secret", "extra"]), &config, &mut prompter)
        .unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("extra"));
    assert_eq!(err.exit_code(), 2);
    assert!(prompter.asked.is_empty());
}

#[test]
fn test_empty_answers() {
    let config = test_config(PathBuf::from("unused"));
    // empty e-mail and password are asked again, an empty username is kept
    let mut prompter = ScriptedPrompter::new(&["", "a@b.com", "", "", "secret"]);

    let creds = resolve(&interactive(&[]), &config, &mut prompter).unwrap();

    assert_eq!(creds.email, "a@b.com");
    assert_eq!(creds.username, "");
    assert_eq!(creds.password, "secret");
    assert_eq!(
        prompter.asked,
        vec!["E-mail", "E-mail", "Username", "Password (hidden)", "Password (hidden)"]
    );
    assert_eq!(
        prompter.complaints,
        vec!["E-mail cannot be empty!", "Password cannot be empty!"]
    );
}

#[test]
fn test_netrc_machine_maps_to_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("netrc");
    std::fs::write(
        &path,
        "# personal logins\n\
         machine example.org login other password nope\n\
         machine manga.cat\n  login a@b.com\n  password secret\n  account reader\n\
         default login anon password anon\n",
    )
    .unwrap();

    let config = test_config(path);
    let mut prompter = ScriptedPrompter::new(&[]);
    let creds = resolve(&AuthSource::Netrc(None), &config, &mut prompter).unwrap();

    assert_eq!(
        creds,
        Credentials {
            email: "a@b.com".to_string(),
            username: "reader".to_string(),
            password: "secret".to_string(),
        }
    );
    assert!(prompter.asked.is_empty());
}

#[test]
fn test_explicit_netrc_path_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom_netrc");
    std::fs::write(&path, "machine manga.cat login a@b.com password secret account reader").unwrap();

    let config = test_config(dir.path().join("does_not_exist"));
    let creds = resolve(
        &AuthSource::Netrc(Some(path)),
        &config,
        &mut ScriptedPrompter::new(&[]),
    )
    .unwrap();

    assert_eq!(creds.email, "a@b.com");
}

#[test]
fn test_netrc_without_host_is_a_config_error() {
    let netrc = Netrc::parse("machine example.org login a password b\n").unwrap();
    let err = from_netrc(&netrc).unwrap_err();

    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.to_string(), "no \"manga.cat\" machine found in netrc file");
}

#[test]
fn test_default_entry_does_not_stand_in_for_host() {
    let netrc = Netrc::parse("default login a@b.com password secret\n").unwrap();
    assert!(netrc.machine("manga.cat").is_none());
    assert!(from_netrc(&netrc).is_err());
}

#[test]
fn test_netrc_skips_macros() {
    let netrc = Netrc::parse(
        "macdef init\ncd /pub\nget file\n\nmachine manga.cat login a@b.com password secret\n",
    )
    .unwrap();
    let machine = netrc.machine("manga.cat").unwrap();
    assert_eq!(machine.login.as_deref(), Some("a@b.com"));
    assert_eq!(machine.account, None);
}

#[test]
fn test_netrc_quoted_values() {
    let netrc = Netrc::parse(
        "machine manga.cat login a@b.com password \"pass word\" account \"my \\\"reader\\\"\"\n",
    )
    .unwrap();
    let machine = netrc.machine("manga.cat").unwrap();

    assert_eq!(machine.password.as_deref(), Some("pass word"));
    assert_eq!(machine.account.as_deref(), Some("my \"reader\""));
}

#[test]
fn test_netrc_escapes_and_user_synonym() {
    let netrc = Netrc::parse("machine manga.cat\n  user a@b.com\n  password pass\\ word#1\n").unwrap();
    let machine = netrc.machine("manga.cat").unwrap();

    assert_eq!(machine.login.as_deref(), Some("a@b.com"));
    assert_eq!(machine.password.as_deref(), Some("pass word#1"));
}

#[test]
fn test_netrc_file_with_quoted_password_resolves() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("netrc");
    std::fs::write(
        &path,
        "machine manga.cat login a@b.com password \"pass word\" account reader\n",
    )
    .unwrap();

    let config = test_config(path);
    let creds = resolve(&AuthSource::Netrc(None), &config, &mut ScriptedPrompter::new(&[])).unwrap();

    assert_eq!(creds.password, "pass word");
    assert_eq!(creds.username, "reader");
}

#[test]
fn test_netrc_missing_password_is_rejected() {
    let netrc = Netrc::parse("machine manga.cat login a@b.com\n").unwrap();
    assert!(matches!(from_netrc(&netrc), Err(Error::Config(_))));
}

#[test]
fn test_malformed_netrc() {
    assert!(Netrc::parse("machine").is_err());
    assert!(Netrc::parse("login a@b.com").is_err());
    assert!(Netrc::parse("machine manga.cat port 22").is_err());
    assert!(Netrc::parse("macdef init\ncd /pub\n").is_err());
}

#[test]
fn test_missing_netrc_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path().join("nope"));
    let err = resolve(&AuthSource::Netrc(None), &config, &mut ScriptedPrompter::new(&[])).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_login_request_repeats_password() {
    let creds = Credentials {
        email: "a@b.com".to_string(),
        username: "reader".to_string(),
        password: "secret".to_string(),
    };
    let json = serde_json::to_value(LoginRequest::from(&creds)).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "confirmed_password": "secret",
            "email": "a@b.com",
            "password": "secret",
            "username": "reader",
        })
    );
}
