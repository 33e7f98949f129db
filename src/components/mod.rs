//! Reusable UI components.
//!
//! Small building blocks shared by the views: inputs, buttons, cards and
//! overlays. Each renders with the active [`Palette`](crate::ui::Palette).

mod button;
mod card;
mod loader;
mod logo;
mod modal;
mod text_input;

pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use loader::Loader;
pub use logo::Logo;
pub use modal::Modal;
pub use text_input::{SearchInput, TextInput};

/// Keep the first `max_chars` characters of `text`, appending "..." when
/// anything was cut.
pub fn truncate_str(text: &str, max_chars: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("", 5), "");
        assert_eq!(truncate_str("Apple", 10), "Apple");
        assert_eq!(truncate_str("Apple Inc. Common", 6), "Apple...");
        assert_eq!(truncate_str("شركة أبل", 4), "شركة...");
        assert_eq!(truncate_str("abcdefgh", 3).chars().count(), 6);
    }
}
