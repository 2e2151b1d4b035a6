use game_types::ClientMessage;

/// One line typed at the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    Message(ClientMessage),
    Quit,
    Blank,
    Unknown(String),
}

pub fn parse_line(line: &str) -> TerminalInput {
    let line = line.trim();
    if line.is_empty() {
        return TerminalInput::Blank;
    }

    match line.strip_prefix('/') {
        Some(command) => match command.to_lowercase().as_str() {
            "start" => TerminalInput::Message(ClientMessage::StartGame),
            "reset" => TerminalInput::Message(ClientMessage::ResetGame),
            "quit" | "exit" => TerminalInput::Quit,
            _ => TerminalInput::Unknown(line.to_string()),
        },
        None => TerminalInput::Message(ClientMessage::SubmitWord {
            word: line.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("/start"), TerminalInput::Message(ClientMessage::StartGame));
        assert_eq!(parse_line(" /RESET "), TerminalInput::Message(ClientMessage::ResetGame));
        assert_eq!(parse_line("/quit"), TerminalInput::Quit);
        assert_eq!(parse_line("/dance"), TerminalInput::Unknown("/dance".to_string()));
        assert_eq!(parse_line("   "), TerminalInput::Blank);
    }

    #[test]
    fn test_parse_word() {
        assert_eq!(
            parse_line("  Alpha \n"),
            TerminalInput::Message(ClientMessage::SubmitWord {
                word: "Alpha".to_string()
            })
        );
    }
}
