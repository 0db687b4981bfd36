// CLI module
// Interactive shell, slash commands and static support resources

mod commands;
mod input;
mod repl;
mod resources;

pub use commands::{help_text, Command};
pub use input::InputHandler;
pub use repl::{render_reply, Repl, ReplAction};
pub use resources::{
    contacts_text, mood_pattern, prompt_hint, quick_actions, QuickAction, EMERGENCY_CONTACTS,
};
