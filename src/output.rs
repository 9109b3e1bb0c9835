//! Console text for the interactive session.
//!
//! Every user-facing string lives here so the session logic stays free of
//! wording. Format functions are pure and return lines; the session writes
//! them to whatever output it was given.
//!
//! # Failure Reporting
//!
//! Failed operations always print the single [`FAILURE`] line. The error
//! itself goes to the `tracing` log (stderr), never to the prompt stream.

pub const LOADING: &str = "App is loading...";

pub const WELCOME: &str = "Hi! Welcome to \"Watermark manager\". Copy your image files to `img` folder. \
Then you'll be able to use them in the app. Are you ready?";

pub const ASK_INPUT: &str = "What file do you want to mark?";
pub const ASK_WATERMARK_TYPE: &str = "Select watermark type?";
pub const ASK_EDIT: &str = "Do you want edit your image?";
pub const ASK_EDIT_OPTIONS: &str = "Select edits (numbers separated by commas, empty for none)";
pub const ASK_TEXT: &str = "Type your watermark text:";
pub const ASK_WATERMARK_FILE: &str = "Type your watermark name:";

pub const EDITED: &str = "Your image has been edited!";
pub const WATERMARK_ADDED: &str = "Your watermark has been added!";
pub const FAILURE: &str = "Something went wrong... Try again!";

/// Welcome line naming the actual image directory.
pub fn welcome(img_dir: &std::path::Path) -> String {
    WELCOME.replace("`img`", &format!("`{}`", img_dir.display()))
}

/// Question line with its default shown the way prompt libraries do.
pub fn format_question(message: &str, default: Option<&str>) -> String {
    match default {
        Some(d) if !d.is_empty() => format!("? {message} ({d}) "),
        _ => format!("? {message} "),
    }
}

/// Yes/no question with the default capitalized.
pub fn format_confirm(message: &str, default: bool) -> String {
    let hint = if default { "Y/n" } else { "y/N" };
    format!("? {message} ({hint}) ")
}

/// Numbered choice list, 1-based.
pub fn format_choices(choices: &[&str]) -> Vec<String> {
    choices
        .iter()
        .enumerate()
        .map(|(i, c)| format!("  {}) {c}", i + 1))
        .collect()
}

/// Hint shown when an answer cannot be parsed.
pub fn format_invalid_answer(answer: &str, expected: &str) -> String {
    format!(">> '{answer}' is not valid: {expected}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn question_with_default() {
        assert_eq!(
            format_question(ASK_INPUT, Some("test.jpg")),
            "? What file do you want to mark? (test.jpg) "
        );
    }

    #[test]
    fn question_without_default() {
        assert_eq!(
            format_question(ASK_TEXT, None),
            "? Type your watermark text: "
        );
        assert_eq!(format_question(ASK_TEXT, Some("")), "? Type your watermark text: ");
    }

    #[test]
    fn confirm_hint_follows_default() {
        assert!(format_confirm("Ready?", true).ends_with("(Y/n) "));
        assert!(format_confirm("Ready?", false).ends_with("(y/N) "));
    }

    #[test]
    fn choices_are_one_based() {
        assert_eq!(
            format_choices(&["Text watermark", "Image watermark"]),
            vec!["  1) Text watermark", "  2) Image watermark"]
        );
    }

    #[test]
    fn welcome_names_configured_dir() {
        let line = welcome(Path::new("photos"));
        assert!(line.contains("`photos` folder"));
        assert!(!line.contains("`img`"));
    }
}
