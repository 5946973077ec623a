use std::path::PathBuf;

use super::StoreError;
use crate::types::Token;

/// Persists the OAuth token so a restart does not need a new authorisation.
pub struct TokenManager {
    path: PathBuf,
}

impl TokenManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenManager { path: path.into() }
    }

    pub async fn load(&self) -> Result<Option<Token>, StoreError> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Io(e)),
        };
        let token: Token = serde_json::from_str(&content)?;
        Ok(Some(token))
    }

    pub async fn persist(&self, token: &Token) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}
