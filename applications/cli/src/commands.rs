/// Script commands
///
/// One command per intent, plus `advance` to move simulated time and the
/// read-only `status`/`hints` queries.
use crate::error::{CliError, Result};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Toggle,
    Back,
    Next,
    Seek(f64),
    Volume(u8),
    Mute,
    Shuffle,
    Repeat,
    Select(usize),
    Advance(f64),
    Status,
    Hints,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| CliError::Command("empty command".to_string()))?;
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(CliError::Command(format!("too many arguments: {}", input)));
        }

        let command = match (name.to_ascii_lowercase().as_str(), arg) {
            ("play" | "pause" | "toggle", None) => Command::Toggle,
            ("back" | "prev", None) => Command::Back,
            ("next", None) => Command::Next,
            ("mute", None) => Command::Mute,
            ("shuffle", None) => Command::Shuffle,
            ("repeat", None) => Command::Repeat,
            ("status", None) => Command::Status,
            ("hints", None) => Command::Hints,
            ("seek", Some(arg)) => {
                let fraction: f64 = parse_arg(name, arg)?;
                if !(0.0..=1.0).contains(&fraction) {
                    return Err(CliError::Command(format!(
                        "seek expects a fraction between 0 and 1, got {}",
                        arg
                    )));
                }
                Command::Seek(fraction)
            }
            ("volume", Some(arg)) => {
                let level: u8 = parse_arg(name, arg)?;
                if level > 100 {
                    return Err(CliError::Command(format!(
                        "volume expects 0-100, got {}",
                        level
                    )));
                }
                Command::Volume(level)
            }
            ("select", Some(arg)) => Command::Select(parse_arg(name, arg)?),
            ("advance", Some(arg)) => {
                let secs: f64 = parse_arg(name, arg)?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(CliError::Command(format!(
                        "advance expects a non-negative number of seconds, got {}",
                        arg
                    )));
                }
                Command::Advance(secs)
            }
            ("seek" | "volume" | "select" | "advance", None) => {
                return Err(CliError::Command(format!("{} needs an argument", name)));
            }
            (_, Some(_)) if is_known(name) => {
                return Err(CliError::Command(format!("{} takes no argument", name)));
            }
            _ => return Err(CliError::Command(format!("unknown command: {}", name))),
        };

        Ok(command)
    }
}

/// Parse a `;`- or newline-separated script, skipping blank entries and
/// `#` comments
pub fn parse_script(script: &str) -> Result<Vec<Command>> {
    script
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::parse)
        .collect()
}

fn parse_arg<T: FromStr>(name: &str, arg: &str) -> Result<T> {
    arg.parse()
        .map_err(|_| CliError::Command(format!("invalid argument for {}: {}", name, arg)))
}

fn is_known(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "play"
            | "pause"
            | "toggle"
            | "back"
            | "prev"
            | "next"
            | "mute"
            | "shuffle"
            | "repeat"
            | "status"
            | "hints"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!("play".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("toggle".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("back".parse::<Command>().unwrap(), Command::Back);
        assert_eq!("next".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("seek 0.5".parse::<Command>().unwrap(), Command::Seek(0.5));
        assert_eq!("volume 40".parse::<Command>().unwrap(), Command::Volume(40));
        assert_eq!("mute".parse::<Command>().unwrap(), Command::Mute);
        assert_eq!("shuffle".parse::<Command>().unwrap(), Command::Shuffle);
        assert_eq!("repeat".parse::<Command>().unwrap(), Command::Repeat);
        assert_eq!("select 2".parse::<Command>().unwrap(), Command::Select(2));
        assert_eq!(
            "advance 12.5".parse::<Command>().unwrap(),
            Command::Advance(12.5)
        );
        assert_eq!("status".parse::<Command>().unwrap(), Command::Status);
        assert_eq!("HINTS".parse::<Command>().unwrap(), Command::Hints);
    }

    #[test]
    fn rejects_bad_arguments() {
        for input in [
            "seek",
            "seek 1.5",
            "seek half",
            "volume 101",
            "volume -1",
            "select x",
            "advance -3",
            "next 2",
            "select 1 2",
            "dance",
        ] {
            assert!(
                matches!(input.parse::<Command>(), Err(CliError::Command(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn parses_scripts() {
        let script = "play; advance 3\n# comment\nnext;;  volume 20 ";
        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                Command::Toggle,
                Command::Advance(3.0),
                Command::Next,
                Command::Volume(20),
            ]
        );
    }

    #[test]
    fn script_error_stops_parsing() {
        assert!(parse_script("play; bogus; next").is_err());
    }
}
