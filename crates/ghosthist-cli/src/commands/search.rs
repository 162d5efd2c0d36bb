// Pass-through queries to the history collaborator

use std::path::PathBuf;

use ghosthist_client::{CliClient, FrecentRequest, PathKind, SearchRequest};

use super::Command;
use crate::error::CliResult;

pub const DEFAULT_LIMIT: usize = 20;

/// Search the command history
pub struct SearchCommand {
    client: CliClient,
    request: SearchRequest,
}

impl SearchCommand {
    pub fn new(client: CliClient, pattern: String, limit: usize, dir: Option<PathBuf>) -> Self {
        Self {
            client,
            request: SearchRequest {
                pattern,
                limit,
                dir,
            },
        }
    }
}

#[async_trait::async_trait]
impl Command for SearchCommand {
    async fn execute(&self) -> CliResult<()> {
        print_lines(&self.client.search(&self.request).await?);
        Ok(())
    }
}

/// Rank visited directories or files by frecency
pub struct FrecentCommand {
    client: CliClient,
    request: FrecentRequest,
}

impl FrecentCommand {
    pub fn new(client: CliClient, terms: Vec<String>, kind: Option<PathKind>, limit: usize) -> Self {
        Self {
            client,
            request: FrecentRequest { terms, kind, limit },
        }
    }
}

#[async_trait::async_trait]
impl Command for FrecentCommand {
    async fn execute(&self) -> CliResult<()> {
        print_lines(&self.client.frecent(&self.request).await?);
        Ok(())
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_collaborator(dir: &TempDir, body: &str) -> CliClient {
        let path = dir.path().join("histctl");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        CliClient::new(&path)
    }

    #[tokio::test]
    async fn test_search_succeeds() {
        let dir = TempDir::new().unwrap();
        let client = fake_collaborator(&dir, "echo 'git status'");
        let cmd = SearchCommand::new(client, "git".to_string(), DEFAULT_LIMIT, None);
        assert!(cmd.execute().await.is_ok());
    }

    #[tokio::test]
    async fn test_frecent_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let client = fake_collaborator(&dir, "echo boom >&2; exit 3");
        let cmd = FrecentCommand::new(client, vec!["src".to_string()], Some(PathKind::Directories), 5);
        assert!(cmd.execute().await.is_err());
    }
}
