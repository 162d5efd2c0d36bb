//! Path completion for `expand-or-complete`

use std::path::{Path, PathBuf};

use ghosthist_completion::memory_editor::Completer;

/// Completer over the process's current directory
pub fn path_completer() -> Completer {
    Box::new(|line: &str| {
        let cwd = std::env::current_dir().ok()?;
        complete_path(line, &cwd, dirs::home_dir().as_deref())
    })
}

/// Complete the last word of `line` as a path relative to `cwd`
///
/// Extends the word to the longest prefix shared by all matching entries. A
/// unique match is finished with `/` for directories and a space otherwise.
/// `None` when nothing matches or the word cannot be extended.
pub fn complete_path(line: &str, cwd: &Path, home: Option<&Path>) -> Option<String> {
    let word_start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);
    let word = &line[word_start..];
    let (dir_part, file_prefix) = match word.rfind('/') {
        Some(i) => word.split_at(i + 1),
        None => ("", word),
    };

    let dir = resolve(dir_part, cwd, home)?;
    let mut matches: Vec<(String, bool)> = std::fs::read_dir(&dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let hidden = name.starts_with('.') && !file_prefix.starts_with('.');
            if hidden || !name.starts_with(file_prefix) {
                return None;
            }
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            Some((name, is_dir))
        })
        .collect();
    matches.sort();

    let completed = match matches.as_slice() {
        [] => return None,
        [(name, true)] => format!("{name}/"),
        [(name, false)] => format!("{name} "),
        [(first, _), rest @ ..] => rest
            .iter()
            .fold(first.clone(), |common, (name, _)| shared_prefix(&common, name)),
    };
    if completed == file_prefix {
        return None;
    }
    Some(format!("{}{}{}", &line[..word_start], dir_part, completed))
}

fn resolve(dir_part: &str, cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    if dir_part.is_empty() {
        return Some(cwd.to_path_buf());
    }
    if let Some(rest) = dir_part.strip_prefix("~/") {
        return home.map(|home| home.join(rest));
    }
    Some(cwd.join(dir_part))
}

fn shared_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c)
        .collect()
}
