// Static support resources shown by the shell

use crate::engine::ConversationState;
use crate::language::LanguageCode;

/// (label, number or instruction)
pub const EMERGENCY_CONTACTS: &[(&str, &str)] = &[
    ("National Emergency", "112 (free from any network)"),
    ("MENTal AwareNG", "0809 844 2369"),
    ("Mentally Aware Nigeria", "0803 772 1123"),
    ("Campus Counseling", "Contact your university counseling center"),
    ("Crisis Text Line", "Text \"HELLO\" to 741741"),
];

/// A canned message the user can send with one keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub message: &'static str,
}

const ENGLISH_QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Feeling Anxious",
        message: "I'm feeling anxious and overwhelmed",
    },
    QuickAction {
        label: "Academic Stress",
        message: "I'm stressed about school and my exams",
    },
    QuickAction {
        label: "Relationship Issues",
        message: "I'm having relationship problems that are affecting me",
    },
    QuickAction {
        label: "Financial Pressure",
        message: "I'm stressed about money and financial issues",
    },
];

const PIDGIN_QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "I Dey Worry",
        message: "I dey feel anxiety and I no know wetin to do",
    },
    QuickAction {
        label: "School Wahala",
        message: "School dey stress me and I dey overwhelmed",
    },
    QuickAction {
        label: "Relationship Matter",
        message: "I get relationship wahala wey dey worry me",
    },
    QuickAction {
        label: "Money Problem",
        message: "I get financial stress wey dey affect my mental health",
    },
];

pub fn quick_actions(language: LanguageCode) -> &'static [QuickAction] {
    match language {
        LanguageCode::English => ENGLISH_QUICK_ACTIONS,
        LanguageCode::Pidgin => PIDGIN_QUICK_ACTIONS,
    }
}

pub fn prompt_hint(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::English => "Share what's on your mind...",
        LanguageCode::Pidgin => "Talk wetin dey your mind here...",
    }
}

pub fn contacts_text() -> String {
    let mut out = String::from("Emergency Resources\n");
    for (label, contact) in EMERGENCY_CONTACTS {
        out.push_str(&format!("  {}: {}\n", label, contact));
    }
    out
}

/// "Recent: 😔 😐 😊" for the last five moods, or None before the first message
pub fn mood_pattern(state: &ConversationState) -> Option<String> {
    let recent = state.recent_moods(5);
    if recent.is_empty() {
        return None;
    }
    let emojis: Vec<&str> = recent.iter().map(|m| m.emoji()).collect();
    Some(format!("Recent: {}", emojis.join(" ")))
}
