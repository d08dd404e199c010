//! Plaintext bearer token file.
//!
//! The first line of the file holds the token. Anything after it is ignored,
//! so a trailing newline or a comment line added by hand does no harm.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use resumer_application::ports::{CredentialError, CredentialStore};
use resumer_domain::BearerToken;
use tokio::fs;

/// Token store backed by a single file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store for `path`; the file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the token file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<BearerToken>, CredentialError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(content.lines().next().and_then(BearerToken::parse))
    }

    async fn save(&self, token: &BearerToken) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, format!("{}\n", token.expose())).await?;
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileCredentialStore {
        FileCredentialStore::new(dir.path().join("HHResumeUpdater.token"))
    }

    #[tokio::test]
    async fn test_missing_file_means_no_token() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&BearerToken::parse("ABCDEF").unwrap()).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.expose(), "ABCDEF");
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "ABCDEF\n"
        );
    }

    #[tokio::test]
    async fn test_only_first_line_is_used_and_trimmed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "  TOKEN \r\nsecond line\n").unwrap();

        assert_eq!(store.load().await.unwrap().unwrap().expose(), "TOKEN");
    }

    #[tokio::test]
    async fn test_blank_file_means_no_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "\n").unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/dir/token"));
        store.save(&BearerToken::parse("T").unwrap()).await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_token() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save(&BearerToken::parse("OLD").unwrap()).await.unwrap();
        store.save(&BearerToken::parse("NEW").unwrap()).await.unwrap();
        assert_eq!(store.load().await.unwrap().unwrap().expose(), "NEW");
    }
}
