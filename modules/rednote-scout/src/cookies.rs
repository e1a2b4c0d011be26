use std::path::{Path, PathBuf};

use rednote_common::{CollectError, SessionCookie};
use tracing::info;

/// Read the exported session cookies: a JSON array of objects with at
/// least `name` and `value`.
pub fn load_cookies(path: &Path) -> Result<Vec<SessionCookie>, CollectError> {
    if !path.exists() {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Err(CollectError::CookiesMissing {
            file_name,
            path: absolute(path).display().to_string(),
        });
    }

    let raw =
        std::fs::read_to_string(path).map_err(|e| CollectError::CookiesInvalid(e.to_string()))?;
    let cookies: Vec<SessionCookie> = serde_json::from_str(raw.trim_start_matches('\u{feff}'))
        .map_err(|e| CollectError::CookiesInvalid(e.to_string()))?;

    info!(path = %path.display(), count = cookies.len(), "Loaded session cookies");
    Ok(cookies)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xhs_cookies.json");

        let err = load_cookies(&path).unwrap_err();
        match &err {
            CollectError::CookiesMissing { file_name, path: shown } => {
                assert_eq!(file_name, "xhs_cookies.json");
                assert!(shown.ends_with("xhs_cookies.json"));
            }
            other => panic!("expected CookiesMissing, got {other:?}"),
        }
        assert!(err.to_string().contains("See xhs_cookies.json.example for format."));
    }

    #[test]
    fn malformed_json_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xhs_cookies.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_cookies(&path).unwrap_err();
        assert!(matches!(err, CollectError::CookiesInvalid(_)));
        assert!(err.to_string().starts_with("Error loading cookies: "));
    }

    #[test]
    fn parses_exported_cookie_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "web_session", "value": "abc", "domain": ".xiaohongshu.com", "path": "/"},
                {"name": "a1", "value": "xyz", "secure": true}
            ]"#,
        )
        .unwrap();

        let cookies = load_cookies(&path).unwrap();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].domain.as_deref(), Some(".xiaohongshu.com"));
        assert_eq!(cookies[1], SessionCookie::new("a1", "xyz"));
    }
}
