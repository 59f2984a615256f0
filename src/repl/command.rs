//! Parsing of loop keywords and menu choices.

/// What a line typed at the topic prompt means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Topic(String),
    Menu,
    Languages,
    Exit,
    Empty,
}

/// Keywords are matched case-insensitively; topics keep their casing.
pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    match input.to_lowercase().as_str() {
        "exit" | "quit" => Input::Exit,
        "menu" => Input::Menu,
        "languages" => Input::Languages,
        _ => Input::Topic(input.to_string()),
    }
}

/// Entries of the numbered menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    History,
    ChangeLanguage,
    ClearCache,
    Languages,
    Invalid(String),
}

pub const MENU_ENTRIES: &[(&str, &str)] = &[
    ("1", "Search History"),
    ("2", "Change Language"),
    ("3", "Clear Cache"),
    ("4", "View Supported Languages"),
];

pub fn parse_menu_choice(input: &str) -> MenuChoice {
    match input.trim() {
        "1" => MenuChoice::History,
        "2" => MenuChoice::ChangeLanguage,
        "3" => MenuChoice::ClearCache,
        "4" => MenuChoice::Languages,
        other => MenuChoice::Invalid(other.to_string()),
    }
}
