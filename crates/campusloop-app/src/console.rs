//! Line commands read from stdin.

use campusloop_common::ErrandCategory;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Plan,
    Errand(ErrandCategory),
    Pick(u32),
    Exit,
    /// Submit the current route or errand; the title applies to errands.
    Submit(Option<String>),
    Complete(String),
    Cancel(String),
    Chat(String),
    Say(String),
    Sos { active: bool, message: String },
    Reconfigure,
    Clear,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConsoleError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArg {
        command: &'static str,
        what: &'static str,
    },
    #[error("`{command}`: {reason}")]
    BadArg {
        command: &'static str,
        reason: String,
    },
}

pub const HELP: &str = "\
commands:
  plan                     start planning a route
  errand <category>        start an errand request (delivery, borrow, favor)
  pick <id>                click a building
  exit                     leave the current mode
  submit [title]           submit the route or errand
  complete <id>            mark an errand completed
  cancel <id>              cancel an errand
  chat <id>                open the chat for an errand
  say <text>               send a chat line
  sos on|off [message]     raise or clear the campus alarm
  reconfigure              regenerate the campus layout
  clear                    hide the revealed route and matches
  status                   print client state
  quit";

pub fn parse(line: &str) -> Result<ConsoleCommand, ConsoleError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "" => return Err(ConsoleError::Empty),
        "plan" => ConsoleCommand::Plan,
        "errand" => {
            let category = required(rest, "errand", "a category")?;
            let category = category.parse().map_err(|reason| ConsoleError::BadArg {
                command: "errand",
                reason,
            })?;
            ConsoleCommand::Errand(category)
        }
        "pick" => {
            let id = required(rest, "pick", "a building id")?;
            let id = id.parse().map_err(|_| ConsoleError::BadArg {
                command: "pick",
                reason: format!("`{id}` is not a building id"),
            })?;
            ConsoleCommand::Pick(id)
        }
        "exit" => ConsoleCommand::Exit,
        "submit" => ConsoleCommand::Submit(Some(rest.to_string()).filter(|t| !t.is_empty())),
        "complete" => ConsoleCommand::Complete(required(rest, "complete", "an errand id")?.into()),
        "cancel" => ConsoleCommand::Cancel(required(rest, "cancel", "an errand id")?.into()),
        "chat" => ConsoleCommand::Chat(required(rest, "chat", "an errand id")?.into()),
        "say" => ConsoleCommand::Say(required(rest, "say", "some text")?.into()),
        "sos" => parse_sos(rest)?,
        "reconfigure" => ConsoleCommand::Reconfigure,
        "clear" => ConsoleCommand::Clear,
        "status" => ConsoleCommand::Status,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "q" => ConsoleCommand::Quit,
        other => return Err(ConsoleError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ConsoleError> {
    if rest.is_empty() {
        Err(ConsoleError::MissingArg { command, what })
    } else {
        Ok(rest)
    }
}

fn parse_sos(rest: &str) -> Result<ConsoleCommand, ConsoleError> {
    let (switch, message) = match rest.split_once(char::is_whitespace) {
        Some((switch, message)) => (switch, message.trim()),
        None => (rest, ""),
    };
    let active = match switch.to_ascii_lowercase().as_str() {
        "on" => true,
        "off" => false,
        "" => {
            return Err(ConsoleError::MissingArg {
                command: "sos",
                what: "on or off",
            })
        }
        other => {
            return Err(ConsoleError::BadArg {
                command: "sos",
                reason: format!("expected on or off, got `{other}`"),
            })
        }
    };
    Ok(ConsoleCommand::Sos {
        active,
        message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_commands() {
        assert_eq!(parse("plan"), Ok(ConsoleCommand::Plan));
        assert_eq!(parse("  STATUS "), Ok(ConsoleCommand::Status));
        assert_eq!(parse("q"), Ok(ConsoleCommand::Quit));
        assert_eq!(parse(""), Err(ConsoleError::Empty));
    }

    #[test]
    fn errand_takes_category() {
        assert_eq!(
            parse("errand borrow"),
            Ok(ConsoleCommand::Errand(ErrandCategory::Borrow))
        );
        assert!(matches!(
            parse("errand"),
            Err(ConsoleError::MissingArg { command: "errand", .. })
        ));
        assert!(matches!(
            parse("errand teleport"),
            Err(ConsoleError::BadArg { command: "errand", .. })
        ));
    }

    #[test]
    fn pick_needs_numeric_id() {
        assert_eq!(parse("pick 7"), Ok(ConsoleCommand::Pick(7)));
        assert!(matches!(parse("pick seven"), Err(ConsoleError::BadArg { .. })));
    }

    #[test]
    fn submit_title_is_optional() {
        assert_eq!(parse("submit"), Ok(ConsoleCommand::Submit(None)));
        assert_eq!(
            parse("submit Lab notes pickup"),
            Ok(ConsoleCommand::Submit(Some("Lab notes pickup".into())))
        );
    }

    #[test]
    fn say_keeps_whole_line() {
        assert_eq!(
            parse("say  be there in 5 "),
            Ok(ConsoleCommand::Say("be there in 5".into()))
        );
    }

    #[test]
    fn sos_switch_and_message() {
        assert_eq!(
            parse("sos on Fire in Lab B"),
            Ok(ConsoleCommand::Sos {
                active: true,
                message: "Fire in Lab B".into()
            })
        );
        assert_eq!(
            parse("sos off"),
            Ok(ConsoleCommand::Sos {
                active: false,
                message: String::new()
            })
        );
        assert!(parse("sos maybe").is_err());
        assert!(parse("sos").is_err());
    }

    #[test]
    fn unknown_command() {
        assert_eq!(parse("fly"), Err(ConsoleError::Unknown("fly".into())));
    }
}
