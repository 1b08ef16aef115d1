use std::{collections::HashMap, fs, iter::Peekable, path::Path, str::Chars};

use crate::{Res, error::Error};

/// One `machine` block of a netrc file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    pub login: Option<String>,
    pub password: Option<String>,
    pub account: Option<String>,
}

/// Parsed netrc file. Only named machines are kept; the `default` block and
/// macro definitions are skipped.
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    hosts: HashMap<String, Machine>,
}

impl Netrc {
    pub fn load(path: &Path) -> Res<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "cannot read netrc file \"{}\": {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content).map_err(|msg| {
            Error::Config(format!("{msg} in netrc file \"{}\"", path.display()))
        })
    }

    /// Parses the text of a netrc file.
    ///
    /// Values may be double-quoted to include whitespace, and a backslash
    /// escapes the character after it, quoted or not. `user` is accepted as
    /// a synonym of `login`.
    pub fn parse(content: &str) -> Result<Self, String> {
        let mut hosts = HashMap::new();
        let mut lexer = Lexer::new(content);
        let mut current: Option<(String, Machine)> = None;
        // entries of the `default` block are dropped
        let mut in_default = false;

        while let Some(token) = lexer.next_token() {
            match token.as_str() {
                "machine" => {
                    if let Some((name, machine)) = current.take() {
                        hosts.insert(name, machine);
                    }
                    let name = lexer
                        .next_token()
                        .ok_or("missing name after \"machine\"")?;
                    current = Some((name, Machine::default()));
                    in_default = false;
                }
                "default" => {
                    if let Some((name, machine)) = current.take() {
                        hosts.insert(name, machine);
                    }
                    in_default = true;
                }
                "login" | "user" | "password" | "account" => {
                    let value = lexer
                        .next_token()
                        .ok_or_else(|| format!("missing value after \"{token}\""))?;
                    if in_default {
                        continue;
                    }
                    let Some((_, machine)) = current.as_mut() else {
                        return Err(format!("\"{token}\" outside of a machine block"));
                    };
                    let slot = match token.as_str() {
                        "password" => &mut machine.password,
                        "account" => &mut machine.account,
                        _ => &mut machine.login,
                    };
                    *slot = Some(value);
                }
                "macdef" => {
                    lexer
                        .next_token()
                        .ok_or("missing name after \"macdef\"")?;
                    lexer.skip_macro()?;
                }
                other => return Err(format!("unexpected token \"{other}\"")),
            }
        }

        if let Some((name, machine)) = current.take() {
            hosts.insert(name, machine);
        }
        Ok(Self { hosts })
    }

    pub fn machine(&self, host: &str) -> Option<&Machine> {
        self.hosts.get(host)
    }
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
        }
    }

    fn next_token(&mut self) -> Option<String> {
        loop {
            while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
            match *self.chars.peek()? {
                '#' => {
                    self.rest_of_line();
                }
                '"' => {
                    self.chars.next();
                    return Some(self.quoted());
                }
                _ => return Some(self.bare()),
            }
        }
    }

    fn quoted(&mut self) -> String {
        let mut token = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => break,
                '\\' => token.extend(self.chars.next()),
                c => token.push(c),
            }
        }
        token
    }

    fn bare(&mut self) -> String {
        let mut token = String::new();
        while let Some(c) = self.chars.next_if(|c| !c.is_whitespace()) {
            match c {
                '\\' => token.extend(self.chars.next()),
                c => token.push(c),
            }
        }
        token
    }

    /// Consumes everything up to and including the next newline.
    fn rest_of_line(&mut self) -> Option<String> {
        self.chars.peek()?;
        let mut line = String::new();
        for c in self.chars.by_ref() {
            if c == '\n' {
                break;
            }
            line.push(c);
        }
        Some(line)
    }

    // a macro body runs from the next line up to an empty line
    fn skip_macro(&mut self) -> Result<(), String> {
        self.rest_of_line();
        loop {
            match self.rest_of_line() {
                Some(line) if line.trim_end_matches('\r').is_empty() => return Ok(()),
                Some(_) => {}
                None => return Err("missing empty line after macro definition".to_string()),
            }
        }
    }
}
