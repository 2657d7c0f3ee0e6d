//! Line oriented parser for flip definition files.
//!
//! ```text
//! [app_name]
//! fqdn: <fqdn> <record_type>
//! primary: <comma_separated_values>
//! secondary: <comma_separated_values>
//! ```
//!
//! Every record block must list `fqdn`, `primary` and `secondary` in that
//! order. Anything else is rejected with the offending line number.

use super::models::{ConfigModel, FlipRecord};
use crate::common::{ConfigFormatSnafu, Result};

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    App(&'a str),
    Fqdn { fqdn: &'a str, kind: &'a str },
    Primary(&'a str),
    Secondary(&'a str),
}

impl<'a> Line<'a> {
    /// Classifies one line. Blank lines and comments yield `None`.
    fn parse(raw: &'a str) -> std::result::Result<Option<Self>, String> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim();
            if name.is_empty() {
                return Err("empty application name".into());
            }
            return Ok(Some(Line::App(name)));
        }

        let Some((key, value)) = line.split_once(':') else {
            return Err(format!("unrecognized line '{line}'"));
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("missing value for '{}'", key.trim()));
        }

        match key.trim() {
            "fqdn" => match value.split_whitespace().collect::<Vec<_>>()[..] {
                [fqdn, kind] => Ok(Some(Line::Fqdn { fqdn, kind })),
                _ => Err(format!(
                    "expected 'fqdn: <domain> <record_type>', found 'fqdn: {value}'"
                )),
            },
            "primary" => Ok(Some(Line::Primary(value))),
            "secondary" => Ok(Some(Line::Secondary(value))),
            other => Err(format!("unrecognized key '{other}'")),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Line::App(_) => "an application header",
            Line::Fqdn { .. } => "'fqdn'",
            Line::Primary(_) => "'primary'",
            Line::Secondary(_) => "'secondary'",
        }
    }
}

/// Parser states. `app` names the application records are appended to.
#[derive(Debug)]
enum State {
    AwaitingApp,
    AwaitingFqdn {
        app: String,
    },
    AwaitingPrimary {
        app: String,
        fqdn: String,
        kind: String,
    },
    AwaitingSecondary {
        app: String,
        fqdn: String,
        kind: String,
        primary: String,
    },
}

impl State {
    fn expecting(&self) -> &'static str {
        match self {
            State::AwaitingApp => "an application header",
            State::AwaitingFqdn { .. } => "'fqdn' or an application header",
            State::AwaitingPrimary { .. } => "'primary'",
            State::AwaitingSecondary { .. } => "'secondary'",
        }
    }
}

struct Parser {
    model: ConfigModel,
    state: State,
}

impl Parser {
    fn new() -> Self {
        Self {
            model: ConfigModel::default(),
            state: State::AwaitingApp,
        }
    }

    fn step(&mut self, line: Line<'_>) -> std::result::Result<(), String> {
        let state = std::mem::replace(&mut self.state, State::AwaitingApp);
        self.state = match (state, line) {
            (State::AwaitingApp | State::AwaitingFqdn { .. }, Line::App(name)) => {
                self.model.insert_or_append(name);
                State::AwaitingFqdn {
                    app: name.to_string(),
                }
            }
            (
                State::AwaitingPrimary { fqdn, .. } | State::AwaitingSecondary { fqdn, .. },
                Line::App(name),
            ) => {
                return Err(format!(
                    "record for {fqdn} is incomplete when application '{name}' starts"
                ))
            }
            (State::AwaitingApp, _) => {
                return Err("record declared before any [application] header".into())
            }
            (State::AwaitingFqdn { app }, Line::Fqdn { fqdn, kind }) => State::AwaitingPrimary {
                app,
                fqdn: fqdn.to_string(),
                kind: kind.to_ascii_uppercase(),
            },
            (State::AwaitingPrimary { app, fqdn, kind }, Line::Primary(primary)) => {
                State::AwaitingSecondary {
                    app,
                    fqdn,
                    kind,
                    primary: primary.to_string(),
                }
            }
            (
                State::AwaitingSecondary {
                    app,
                    fqdn,
                    kind,
                    primary,
                },
                Line::Secondary(secondary),
            ) => {
                self.model
                    .insert_or_append(&app)
                    .records
                    .push(FlipRecord {
                        fqdn,
                        kind,
                        primary,
                        secondary: secondary.to_string(),
                    });
                State::AwaitingFqdn { app }
            }
            (state, line) => {
                return Err(format!(
                    "expected {}, found {}",
                    state.expecting(),
                    line.describe()
                ))
            }
        };
        Ok(())
    }

    fn finish(self) -> std::result::Result<ConfigModel, String> {
        match self.state {
            State::AwaitingPrimary { fqdn, .. } | State::AwaitingSecondary { fqdn, .. } => {
                Err(format!("record for {fqdn} is incomplete at end of file"))
            }
            State::AwaitingApp | State::AwaitingFqdn { .. } => Ok(self.model),
        }
    }
}

pub(crate) fn parse(text: &str) -> Result<ConfigModel> {
    let mut parser = Parser::new();
    let mut line_count = 0;

    for (idx, raw) in text.lines().enumerate() {
        line_count = idx + 1;
        let parsed = Line::parse(raw).and_then(|line| match line {
            Some(line) => parser.step(line),
            None => Ok(()),
        });
        if let Err(message) = parsed {
            return ConfigFormatSnafu {
                line: line_count,
                message,
            }
            .fail();
        }
    }

    let model = parser.finish().map_err(|message| {
        ConfigFormatSnafu {
            line: line_count,
            message,
        }
        .build()
    })?;

    tracing::debug!(applications = model.len(), "Parsed flip definitions");
    Ok(model)
}
