//! Line rendering: prompt, buffer, ghost text

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Color, Print, Stylize},
    terminal::{Clear, ClearType},
};
use ghosthist_client::ContextInfo;
use ghosthist_completion::Overlay;
use unicode_width::UnicodeWidthStr;

/// One rendered line and where the cursor goes on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub line: String,
    /// Display column, counted in terminal cells
    pub cursor_col: usize,
}

/// Compose the prompt line
///
/// `cursor` and `highlight` are character offsets into `buffer`. The overlay
/// is drawn after the buffer and never moves the cursor.
pub fn compose(
    prompt: &str,
    buffer: &str,
    cursor: usize,
    overlay: Option<&Overlay>,
    highlight: Option<(usize, usize)>,
) -> Frame {
    let mut line = String::from(prompt);

    match highlight {
        Some((start, end)) if start < end => {
            let (before, rest) = split_chars(buffer, start);
            let (matched, after) = split_chars(rest, end - start);
            line.push_str(before);
            line.push_str(&matched.reverse().to_string());
            line.push_str(after);
        }
        _ => line.push_str(buffer),
    }

    if let Some(overlay) = overlay {
        let mut ghost = overlay.text.as_str().with(Color::AnsiValue(overlay.style.fg));
        if overlay.style.italic {
            ghost = ghost.italic();
        }
        line.push_str(&ghost.to_string());
    }

    let (typed, _) = split_chars(buffer, cursor);
    Frame {
        line,
        cursor_col: prompt.width() + typed.width(),
    }
}

// TODO: wrap lines wider than the terminal instead of letting them scroll
pub fn draw<W: Write>(out: &mut W, frame: &Frame) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(&frame.line),
        MoveToColumn(u16::try_from(frame.cursor_col).unwrap_or(u16::MAX)),
    )?;
    out.flush()
}

/// `~/src/api (main) $ `
pub fn format_prompt(cwd: &Path, home: Option<&Path>, context: &ContextInfo) -> String {
    let dir = match home.and_then(|home| cwd.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => cwd.display().to_string(),
    };
    match &context.branch {
        Some(branch) => format!("{dir} ({branch}) $ "),
        None => format!("{dir} $ "),
    }
}

fn split_chars(text: &str, chars: usize) -> (&str, &str) {
    let at = text
        .char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text.split_at(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghosthist_completion::OverlayStyle;
    use std::path::PathBuf;

    fn overlay(text: &str, start: usize) -> Overlay {
        Overlay {
            text: text.to_string(),
            start,
            end: start + text.chars().count(),
            style: OverlayStyle::default(),
        }
    }

    #[test]
    fn test_cursor_ignores_overlay() {
        let frame = compose("$ ", "gi", 2, Some(&overlay("t status", 2)), None);
        assert!(frame.line.starts_with("$ gi"));
        assert!(frame.line.contains("t status"));
        assert_eq!(frame.cursor_col, 4);
    }

    #[test]
    fn test_cursor_uses_display_width() {
        let frame = compose("$ ", "echo 日本", 7, None, None);
        assert_eq!(frame.line, "$ echo 日本");
        assert_eq!(frame.cursor_col, 2 + 5 + 4);
    }

    #[test]
    fn test_highlight_keeps_text() {
        let frame = compose("", "git status", 10, None, Some((4, 7)));
        assert!(frame.line.starts_with("git "));
        assert!(frame.line.contains("sta"));
        assert!(frame.line.ends_with("tus"));
    }

    #[test]
    fn test_draw_writes_line() {
        let mut out = Vec::new();
        draw(&mut out, &compose("$ ", "ls", 2, None, None)).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("$ ls"));
    }

    #[test]
    fn test_prompt() {
        let home = PathBuf::from("/home/ana");
        let on_main = ContextInfo {
            branch: Some("main".to_string()),
            ..ContextInfo::default()
        };

        assert_eq!(
            format_prompt(Path::new("/home/ana/src/api"), Some(&home), &on_main),
            "~/src/api (main) $ "
        );
        assert_eq!(
            format_prompt(Path::new("/home/ana"), Some(&home), &ContextInfo::default()),
            "~ $ "
        );
        assert_eq!(
            format_prompt(Path::new("/etc"), Some(&home), &ContextInfo::default()),
            "/etc $ "
        );
    }
}
