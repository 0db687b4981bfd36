// Interactive chat shell
//
// Thin presentation layer over ConversationEngine: owns one session state,
// renders replies and keeps the crisis alert visible until dismissed.

use anyhow::Result;
use std::io::{self, BufRead, IsTerminal, Write};

use super::commands::{help_text, Command};
use super::input::InputHandler;
use super::resources::{contacts_text, mood_pattern, prompt_hint, quick_actions};
use crate::engine::{ConversationEngine, ConversationState, EngineResponse};
use crate::language::LanguageCode;

/// What the shell should do after handling a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    Print(String),
    /// Conversation was reset; input history should be cleared too
    Reset(String),
    Exit(String),
}

pub struct Repl {
    engine: ConversationEngine,
    state: ConversationState,
    crisis_active: bool,
    language: LanguageCode,
}

impl Repl {
    pub fn new(engine: ConversationEngine) -> Self {
        let state = engine.new_conversation_state();
        let language = engine.catalog().default_language();
        Self {
            engine,
            state,
            crisis_active: false,
            language,
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn crisis_active(&self) -> bool {
        self.crisis_active
    }

    /// Alert shown before every prompt while a crisis is flagged
    pub fn crisis_banner(&self) -> Option<String> {
        self.crisis_active.then(|| {
            format!(
                "🚨 CRISIS DETECTED: If you're in immediate danger, please call {} \
                 or go to your nearest hospital emergency room. (/safe to dismiss)",
                self.engine.catalog().emergency_contact()
            )
        })
    }

    /// Handle one line of user input
    pub fn handle_line(&mut self, line: &str) -> ReplAction {
        let line = line.trim();
        if line.is_empty() {
            return ReplAction::Print(String::new());
        }

        let Some(command) = Command::parse(line) else {
            return ReplAction::Print(self.send(line));
        };

        match command {
            Command::Help => ReplAction::Print(help_text().to_string()),
            Command::Quit => {
                ReplAction::Exit("Take care. You're not alone in this journey.".to_string())
            }
            Command::New => {
                self.engine.reset_history(&mut self.state);
                self.crisis_active = false;
                ReplAction::Reset("Started a new conversation.".to_string())
            }
            Command::Moods => ReplAction::Print(
                mood_pattern(&self.state).unwrap_or_else(|| "No mood history yet.".to_string()),
            ),
            Command::Quick(None) => {
                let mut out = String::from("Quick Help Options\n");
                for (i, action) in quick_actions(self.language).iter().enumerate() {
                    out.push_str(&format!("  {}. {}\n", i + 1, action.label));
                }
                out.push_str("Send one with /quick <n>");
                ReplAction::Print(out)
            }
            Command::Quick(Some(n)) => match quick_actions(self.language).get(n - 1) {
                Some(action) => {
                    let reply = self.send(action.message);
                    ReplAction::Print(format!("You: {}\n{}", action.message, reply))
                }
                None => ReplAction::Print(format!("No quick option {}.", n)),
            },
            Command::Safe => {
                self.crisis_active = false;
                ReplAction::Print("Glad to hear it. I'm still here if you need me.".to_string())
            }
            Command::Contacts => ReplAction::Print(contacts_text()),
            Command::Language(language) => {
                self.language = language;
                ReplAction::Print(format!(
                    "Quick options now in {}. {}",
                    language.display_name(),
                    prompt_hint(language)
                ))
            }
            Command::Unknown(input) => {
                ReplAction::Print(format!("Unknown command: {} (try /help)", input))
            }
        }
    }

    fn send(&mut self, text: &str) -> String {
        let reply = self.engine.generate(text, &mut self.state);
        if reply.is_crisis {
            self.crisis_active = true;
        }
        render_reply(&reply)
    }

    /// Run the interactive loop until /exit or EOF
    pub fn run(mut self) -> Result<()> {
        println!("🛡️  TalkSafe - your safe space to talk");
        println!("{}", prompt_hint(self.language));
        println!("Type /help for commands, /exit to quit\n");

        let mut input = if io::stdin().is_terminal() {
            match InputHandler::new() {
                Ok(handler) => Some(handler),
                Err(e) => {
                    tracing::warn!("Line editing unavailable, reading plain stdin: {:#}", e);
                    None
                }
            }
        } else {
            None
        };

        loop {
            if let Some(banner) = self.crisis_banner() {
                println!("{}", banner);
            }

            let line = match &mut input {
                Some(handler) => match handler.read_line("> ")? {
                    Some(line) => line,
                    None => break,
                },
                None => {
                    print!("> ");
                    io::stdout().flush()?;
                    let mut line = String::new();
                    if io::stdin().lock().read_line(&mut line)? == 0 {
                        break;
                    }
                    line
                }
            };

            match self.handle_line(&line) {
                ReplAction::Print(text) if text.is_empty() => {}
                ReplAction::Print(text) => println!("{}\n", text),
                ReplAction::Reset(text) => {
                    if let Some(handler) = input.as_mut() {
                        handler.clear_history()?;
                    }
                    println!("{}\n", text);
                }
                ReplAction::Exit(text) => {
                    println!("{}", text);
                    return Ok(());
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}

/// Format a reply for the terminal. Crisis replies carry the contact table.
pub fn render_reply(reply: &EngineResponse) -> String {
    if reply.is_crisis {
        format!("\x1b[1;31mTalkSafe:\x1b[0m {}\n\n{}", reply.response, contacts_text())
    } else {
        format!("TalkSafe: {}", reply.response)
    }
}
