// Slash command handling

use crate::language::LanguageCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Start a new conversation (clears history and the crisis banner)
    New,
    /// Show the recent mood pattern
    Moods,
    /// List quick actions, or send quick action N (1-based)
    Quick(Option<usize>),
    /// Dismiss the crisis banner
    Safe,
    Contacts,
    /// Language used for quick actions and prompts
    Language(LanguageCode),
    Unknown(String),
}

impl Command {
    /// Parse a slash command. Returns `None` for ordinary messages.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return None;
        }

        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

        let command = match (name, arg) {
            ("/help", _) => Command::Help,
            ("/quit" | "/exit", _) => Command::Quit,
            ("/new" | "/reset", _) => Command::New,
            ("/moods" | "/mood", _) => Command::Moods,
            ("/safe", _) => Command::Safe,
            ("/contacts" | "/sos", _) => Command::Contacts,
            ("/quick", None) => Command::Quick(None),
            ("/quick", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Quick(Some(n)),
                _ => Command::Unknown(trimmed.to_string()),
            },
            ("/lang" | "/language", Some(code)) => match code.parse::<LanguageCode>() {
                Ok(language) => Command::Language(language),
                Err(_) => Command::Unknown(trimmed.to_string()),
            },
            _ => Command::Unknown(trimmed.to_string()),
        };
        Some(command)
    }
}

pub fn help_text() -> &'static str {
    "Commands:\n\
     /new            start a new conversation\n\
     /moods          show your recent mood pattern\n\
     /quick [n]      list quick help options, or send option n\n\
     /lang <name>    english or pidgin (quick options)\n\
     /contacts       emergency and helpline numbers\n\
     /safe           dismiss the crisis alert\n\
     /exit           quit"
}
