//! Session loop UI components.

use image::DynamicImage;

use super::command::MENU_ENTRIES;
use crate::ui::Style;
use crate::wiki::Locale;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTRUCTIONS: &[&str] = &[
    "Enter the name of any topic you want to search and learn about.",
    "Type 'exit' or 'quit' to end the program.",
    "If you want to know more about the topic, it will take you to Wikipedia.",
    "You can change the language of the summary from the 'menu'.",
    "You can export the summary and image to a PDF.",
    "Type 'languages' to view supported languages and their codes.",
];

pub fn print_header(locale: &Locale) {
    println!(
        "{} {}",
        Style::banner("wikifetch: General Information Fetcher"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "{} {} ({})",
        Style::label("Language:"),
        Style::value(locale.name),
        Style::code(locale.code)
    );
    println!();
    println!("{}", Style::header("Instructions"));
    for (idx, line) in INSTRUCTIONS.iter().enumerate() {
        println!("  {}. {line}", idx + 1);
    }
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::banner("Exiting the program. Goodbye!"));
}

pub fn print_menu() {
    println!();
    println!("{}", Style::header("Menu"));
    for (key, label) in MENU_ENTRIES {
        println!("  {}. {label}", Style::command(key));
    }
    println!();
}

pub fn print_history(history: &[String]) {
    println!("{}", Style::header("Search History"));
    if history.is_empty() {
        println!("  {}", Style::hint("No searches yet."));
    }
    for (idx, topic) in history.iter().enumerate() {
        println!("  {}. {topic}", idx + 1);
    }
}

pub fn print_summary(topic: &str, summary: &str) {
    println!();
    println!("{}", Style::header(format!("Summary about {topic}")));
    println!();
    println!("{summary}");
    println!();
}

pub fn print_image_info(image: &DynamicImage) {
    println!(
        "{} {}x{}",
        Style::secondary("Image available:"),
        image.width(),
        image.height()
    );
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_warning(message: &str) {
    crate::warn!("{} {message}", Style::warning("Warning:"));
}

pub fn print_error(message: &str) {
    crate::warn!("{} {message}", Style::error("Error:"));
}
