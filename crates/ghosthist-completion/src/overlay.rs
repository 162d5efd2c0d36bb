//! Ghost text overlay

use ghosthist_config::SuggestionStyle;

use crate::suggestion::Suggestion;

/// De-emphasized appearance of ghost text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    /// ANSI 256-colour index
    pub fg: u8,
    pub italic: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fg: 8,
            italic: false,
        }
    }
}

impl From<&SuggestionStyle> for OverlayStyle {
    fn from(style: &SuggestionStyle) -> Self {
        Self {
            fg: style.fg,
            italic: style.italic,
        }
    }
}

/// Trailing, non-editable text after the buffer
///
/// `start..end` is in characters and begins exactly at the end of the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub style: OverlayStyle,
}

/// Overlay for `suggestion` against the current `buffer`
///
/// `None` when the suggestion does not extend the buffer or when nothing
/// would remain to show.
pub fn render_overlay(suggestion: &Suggestion, buffer: &str, style: OverlayStyle) -> Option<Overlay> {
    let suffix = suggestion.text.strip_prefix(buffer)?;
    if suffix.is_empty() {
        return None;
    }

    let start = buffer.chars().count();
    Some(Overlay {
        text: suffix.to_string(),
        start,
        end: start + suffix.chars().count(),
        style,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_suffix_span() {
        let suggestion = Suggestion::new("gi", "git status").unwrap();
        let overlay = render_overlay(&suggestion, "gi", OverlayStyle::default()).unwrap();
        assert_eq!(overlay.text, "t status");
        assert_eq!((overlay.start, overlay.end), (2, 10));
    }

    #[test]
    fn test_render_counts_chars_not_bytes() {
        let suggestion = Suggestion::new("echo é", "echo éà").unwrap();
        let overlay = render_overlay(&suggestion, "echo é", OverlayStyle::default()).unwrap();
        assert_eq!(overlay.text, "à");
        assert_eq!((overlay.start, overlay.end), (6, 7));
    }

    #[test]
    fn test_vacuous_suffix_renders_nothing() {
        let suggestion = Suggestion::new("gi", "git").unwrap();
        assert!(render_overlay(&suggestion, "git", OverlayStyle::default()).is_none());
    }

    #[test]
    fn test_non_extending_buffer_renders_nothing() {
        let suggestion = Suggestion::new("gi", "git status").unwrap();
        assert!(render_overlay(&suggestion, "go", OverlayStyle::default()).is_none());
    }

    #[test]
    fn test_style_from_config() {
        let style = OverlayStyle::from(&SuggestionStyle { fg: 244, italic: true });
        assert_eq!(style, OverlayStyle { fg: 244, italic: true });
    }
}
