// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{error::Result, metadata};

use super::{IsPersistent, Storage};

pub struct File {
    path: PathBuf,
}

impl File {
    /// A file in the platform data directory named after `key` and the
    /// server it belongs to.
    pub fn new(url: &url::Url, key: &str) -> Option<Self> {
        metadata::PROJECT_DIRS.as_ref().map(|dirs| Self {
            path: dirs.data_dir().join(file_name(url, key)),
        })
    }

    pub fn at<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn file_name(url: &url::Url, key: &str) -> String {
    let mut server = String::new();
    for c in url.as_str().chars() {
        if c.is_ascii_alphanumeric() {
            server.push(c.to_ascii_lowercase());
        } else if !server.is_empty() && !server.ends_with('-') {
            server.push('-');
        }
    }
    format!("{key}-{}.json", server.trim_end_matches('-'))
}

/// Opens for writing, readable by the owner only.
fn create(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    _ = options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;

        _ = options.mode(0o600);
    }

    let file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;

        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

impl IsPersistent for File {
    fn is_persistent(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: Send + Serialize + Sync + for<'de> Deserialize<'de>> Storage<T> for File {
    async fn get(&mut self) -> Result<Option<T>> {
        match fs::File::open(&self.path) {
            Ok(fp) => Ok(Some(serde_json::from_reader::<fs::File, T>(fp)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&mut self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = create(&self.path)?;
        serde_json::to_writer(file, data)?;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut storage = File::at(dir.path().join("token.json"));

        assert_eq!(Storage::<String>::get(&mut storage).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_and_clear_removes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut storage = File::at(dir.path().join("nested").join("token.json"));

        storage.update(&"first".to_owned()).await?;
        storage.update(&"second".to_owned()).await?;
        assert_eq!(
            Storage::<String>::get(&mut storage).await?.as_deref(),
            Some("second")
        );

        Storage::<String>::clear(&mut storage).await?;
        assert!(!storage.path().exists());
        Ok(())
    }

    #[test]
    fn file_name_follows_server() -> Result<()> {
        assert_eq!(
            file_name(&url::Url::parse("http://localhost:5000")?, "token"),
            "token-http-localhost-5000.json"
        );
        assert_eq!(
            file_name(&url::Url::parse("https://HireFlow.example.com/backend/")?, "token"),
            "token-https-hireflow-example-com-backend.json"
        );
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn token_file_is_private() -> Result<()> {
        use std::os::unix::fs::PermissionsExt as _;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("token.json");
        fs::write(&path, "{}")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

        let mut storage = File::at(&path);
        storage.update(&"secret".to_owned()).await?;
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o600);
        Ok(())
    }

    #[tokio::test]
    async fn clearing_twice_is_not_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut storage = File::at(dir.path().join("token.json"));

        Storage::<String>::clear(&mut storage).await?;
        Storage::<String>::clear(&mut storage).await?;
        Ok(())
    }
}
