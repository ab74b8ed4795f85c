//! Cookie jar shared by the service clients.
//!
//! The services hand out login macaroons as cookies. A jar opened from a
//! file lets later invocations reuse them; [`CookieJar::save`] writes the
//! persistent, unexpired cookies back.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, MutexGuard, PoisonError};

use cookie_store::CookieStore;
use reqwest_cookie_store::CookieStoreMutex;
use tracing::debug;

use crate::error::ApiError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Cookie store, optionally backed by a file.
///
/// Clones share the same store.
#[derive(Debug, Clone)]
pub struct CookieJar {
    store: Arc<CookieStoreMutex>,
    path: Option<PathBuf>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl CookieJar {
    /// A jar that lives only as long as the process.
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(CookieStoreMutex::new(CookieStore::default())),
            path: None,
        }
    }

    /// Loads the jar stored at `path`. A missing file gives an empty jar.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ApiError> {
        let path = path.into();
        let store = match File::open(&path) {
            Ok(file) => CookieStore::load_json(BufReader::new(file)).map_err(|error| {
                ApiError::CookieLoad {
                    path: path.clone(),
                    error,
                }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => CookieStore::default(),
            Err(err) => {
                return Err(ApiError::CookieLoad {
                    path,
                    error: err.into(),
                });
            }
        };
        debug!(path = %path.display(), "cookie jar opened");

        Ok(Self {
            store: Arc::new(CookieStoreMutex::new(store)),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Store handed to reqwest as its cookie provider.
    pub fn provider(&self) -> Arc<CookieStoreMutex> {
        Arc::clone(&self.store)
    }

    pub fn lock(&self) -> MutexGuard<'_, CookieStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes the jar back to its file. Does nothing for in-memory jars.
    pub fn save(&self) -> Result<(), ApiError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let save_error = |error: BoxError| ApiError::CookieSave {
            path: path.clone(),
            error,
        };

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| save_error(err.into()))?;
        }
        let file = create_private(path).map_err(|err| save_error(err.into()))?;
        let mut writer = BufWriter::new(file);
        self.lock().save_json(&mut writer).map_err(save_error)?;
        writer.flush().map_err(|err| save_error(err.into()))?;

        debug!(path = %path.display(), "cookie jar saved");
        Ok(())
    }
}

/// Opens `path` for writing, readable by the owner only.
fn create_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use cookie_store::RawCookie;
    use url::Url;

    use super::*;

    const DOMAIN: &str = "api.jujucharms.com";

    fn insert(jar: &CookieJar, cookie: &str) {
        let url = Url::parse("https://api.jujucharms.com/terms/v1/agreements").unwrap();
        jar.lock()
            .insert_raw(&RawCookie::parse(cookie).unwrap(), &url)
            .unwrap();
    }

    fn value(jar: &CookieJar, name: &str) -> Option<String> {
        jar.lock()
            .get(DOMAIN, "/", name)
            .map(|cookie| cookie.value().to_string())
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".go-cookies");

        let jar = CookieJar::open(&path).unwrap();
        assert_eq!(jar.lock().iter_unexpired().count(), 0);
        assert_eq!(jar.path(), Some(path.as_path()));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cookies");

        let jar = CookieJar::open(&path).unwrap();
        insert(&jar, "macaroon-auth=abc; Path=/; Max-Age=3600");
        insert(&jar, "session=xyz; Path=/");
        jar.save().unwrap();

        let reloaded = CookieJar::open(&path).unwrap();
        assert_eq!(value(&reloaded, "macaroon-auth").as_deref(), Some("abc"));
        // session cookies are not written back
        assert_eq!(value(&reloaded, "session"), None);
    }

    #[test]
    fn test_clones_share_store() {
        let jar = CookieJar::in_memory();
        let clone = jar.clone();
        insert(&jar, "macaroon-auth=abc; Path=/; Max-Age=3600");
        assert_eq!(value(&clone, "macaroon-auth").as_deref(), Some("abc"));
        assert!(Arc::ptr_eq(&jar.provider(), &clone.provider()));
    }

    #[test]
    fn test_in_memory_save() {
        let jar = CookieJar::in_memory();
        insert(&jar, "macaroon-auth=abc; Path=/; Max-Age=3600");
        assert!(jar.path().is_none());
        jar.save().unwrap();
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies");
        fs::write(&path, "not a cookie\n").unwrap();

        let err = CookieJar::open(&path).unwrap_err();
        assert!(matches!(err, ApiError::CookieLoad { .. }));
        assert_eq!(err.to_string(), format!("cannot load cookies from {path:?}"));
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies");
        CookieJar::open(&path).unwrap().save().unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
