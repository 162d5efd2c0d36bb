//! Directory context reported by the collaborator

use std::collections::BTreeMap;

/// VCS/project metadata for one working directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextInfo {
    /// Version control system, e.g. `git`
    pub vcs: Option<String>,
    pub branch: Option<String>,
    pub vcs_root: Option<String>,
    /// Project type, e.g. `rust` or `node`
    pub project: Option<String>,
    /// Keys this client does not know about
    pub extra: BTreeMap<String, String>,
}

impl ContextInfo {
    /// Parse `key=value` lines
    ///
    /// Lines without `=` and empty values are skipped. Anything unparsable
    /// degrades to an empty context rather than an error.
    pub fn parse(output: &str) -> Self {
        let mut info = ContextInfo::default();
        for line in output.lines() {
            let Some((key, value)) = line.trim_end_matches('\r').split_once('=') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                continue;
            }

            let value = value.to_string();
            match key {
                "vcs" => info.vcs = Some(value),
                "branch" => info.branch = Some(value),
                "vcs_root" => info.vcs_root = Some(value),
                "project" => info.project = Some(value),
                other => {
                    info.extra.insert(other.to_string(), value);
                }
            }
        }
        info
    }

    pub fn is_empty(&self) -> bool {
        self.vcs.is_none()
            && self.branch.is_none()
            && self.vcs_root.is_none()
            && self.project.is_none()
            && self.extra.is_empty()
    }
}
