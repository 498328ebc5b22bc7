use std::future::Future;
use std::path::{Path, PathBuf};

use base64::{prelude::BASE64_STANDARD, Engine};
use directories::ProjectDirs;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};

/// Host capability that hands the UI the local public key as display text.
pub trait KeyHost: Send + Sync + 'static {
    fn public_key(&self) -> impl Future<Output = Result<String>> + Send;
}

/// Ed25519 identity kept in a small JSON file, created on first request.
#[derive(Debug, Clone)]
pub struct IdentityKeyHost {
    path: PathBuf,
}

impl IdentityKeyHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf> {
        let proj = ProjectDirs::from("com", "carapace", "client").ok_or(Error::NoConfigDir)?;
        Ok(proj.config_dir().join("identity.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_or_create(&self) -> Result<SigningKey> {
        if key_exists(&self.path).await? {
            return read_key(&self.path).await;
        }
        let key = generate_key();
        write_key(&self.path, &key).await?;
        log::info!("generated new identity key at {}", self.path.display());
        Ok(key)
    }
}

impl KeyHost for IdentityKeyHost {
    async fn public_key(&self) -> Result<String> {
        let key = self.load_or_create().await?;
        Ok(encode_public_key(&key))
    }
}

#[derive(Serialize, Deserialize)]
struct KeyFile {
    secret: String,
}

pub fn generate_key() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

pub async fn key_exists(path: &Path) -> Result<bool> {
    Ok(tokio::fs::try_exists(path).await?)
}

pub fn encode_public_key(key: &SigningKey) -> String {
    BASE64_STANDARD.encode(key.verifying_key().to_bytes())
}

/// Write `key` through a private sibling temp file renamed over `path`, so the
/// seed is never readable by others and a crash never leaves a partial file.
pub async fn write_key(path: &Path, key: &SigningKey) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let file = KeyFile {
        secret: BASE64_STANDARD.encode(key.to_bytes()),
    };
    let json = serde_json::to_string(&file)?;

    // A leftover from an interrupted write may carry a looser mode.
    let tmp = temp_path(path);
    let _ = tokio::fs::remove_file(&tmp).await;
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);
    let written = async {
        let mut out = options.open(&tmp).await?;
        out.write_all(json.as_bytes()).await?;
        out.sync_all().await?;
        tokio::fs::rename(&tmp, path).await
    }
    .await;
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

pub async fn read_key(path: &Path) -> Result<SigningKey> {
    let json = tokio::fs::read_to_string(path).await?;
    let file: KeyFile = serde_json::from_str(&json)?;
    let bytes = BASE64_STANDARD.decode(file.secret)?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::Key(format!("expected a 32-byte seed, got {} bytes", bytes.len())))?;
    Ok(SigningKey::from_bytes(&seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedKeyHost(&'static str);

    impl KeyHost for FixedKeyHost {
        async fn public_key(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    async fn fetch<H: KeyHost>(host: &H) -> Result<String> {
        host.public_key().await
    }

    #[tokio::test]
    async fn stand_in_host_is_substitutable() {
        let key = fetch(&FixedKeyHost("AAAA")).await.unwrap();
        assert_eq!(key, "AAAA");
    }

    #[tokio::test]
    async fn first_call_creates_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("identity.json");
        let host = IdentityKeyHost::new(&path);
        assert!(!key_exists(&path).await.unwrap());

        let key = host.public_key().await.unwrap();
        assert!(key_exists(&path).await.unwrap());
        assert!(!key_exists(&temp_path(&path)).await.unwrap());
        let raw = BASE64_STANDARD.decode(&key).unwrap();
        assert_eq!(raw.len(), 32);
    }

    #[tokio::test]
    async fn public_key_is_stable_across_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");

        let first = IdentityKeyHost::new(&path).public_key().await.unwrap();
        let again = IdentityKeyHost::new(&path).public_key().await.unwrap();
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn read_back_matches_written_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        let key = generate_key();
        write_key(&path, &key).await.unwrap();

        let loaded = read_key(&path).await.unwrap();
        assert_eq!(encode_public_key(&loaded), encode_public_key(&key));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn key_file_is_private() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        write_key(&path, &generate_key()).await.unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn malformed_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(read_key(&path).await, Err(Error::Json(_))));

        std::fs::write(&path, r#"{"secret":"%%%"}"#).unwrap();
        assert!(matches!(read_key(&path).await, Err(Error::Base64(_))));

        let short = BASE64_STANDARD.encode([7u8; 16]);
        std::fs::write(&path, format!(r#"{{"secret":"{short}"}}"#)).unwrap();
        assert!(matches!(read_key(&path).await, Err(Error::Key(_))));

        assert!(IdentityKeyHost::new(&path).public_key().await.is_err());
    }

    #[tokio::test]
    async fn rewrite_replaces_key_and_stays_private() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        write_key(&path, &generate_key()).await.unwrap();
        let second = generate_key();
        write_key(&path, &second).await.unwrap();

        let loaded = read_key(&path).await.unwrap();
        assert_eq!(encode_public_key(&loaded), encode_public_key(&second));
        assert!(!key_exists(&temp_path(&path)).await.unwrap());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[tokio::test]
    async fn empty_or_truncated_key_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");

        std::fs::write(&path, "").unwrap();
        assert!(matches!(read_key(&path).await, Err(Error::Json(_))));
        assert!(IdentityKeyHost::new(&path).public_key().await.is_err());

        write_key(&path, &generate_key()).await.unwrap();
        let full = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, &full[..full.len() / 2]).unwrap();
        assert!(matches!(read_key(&path).await, Err(Error::Json(_))));
    }
}
