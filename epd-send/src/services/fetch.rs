//! Image acquisition: local paths pass through, URLs are downloaded to a
//! temporary file first.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ImageSource;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Download of {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Turn an [`ImageSource`] into a local file path, downloading if needed.
pub async fn resolve_source(source: &ImageSource) -> Result<PathBuf, FetchError> {
    match source {
        ImageSource::Path(path) => Ok(path.clone()),
        ImageSource::Url(url) => {
            info!("Downloading image from {url}");
            let http = reqwest::Client::new();
            let path = download_image(&http, url, &std::env::temp_dir()).await?;
            info!("Image downloaded to {}", path.display());
            Ok(path)
        }
    }
}

/// Download `url` into a uniquely named file under `dir`.
///
/// The file is left in place after the run.
pub async fn download_image(
    http: &reqwest::Client,
    url: &str,
    dir: &Path,
) -> Result<PathBuf, FetchError> {
    let resp = http.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = resp.bytes().await?;

    let path = dir.join(format!(
        "epd-send-{}.{}",
        uuid::Uuid::new_v4(),
        extension_for(url)
    ));
    tokio::fs::write(&path, &bytes).await?;
    tracing::debug!(bytes = bytes.len(), path = %path.display(), "Wrote downloaded image");
    Ok(path)
}

/// File extension taken from the URL path, or `img` when there is no
/// short alphanumeric one. The decoder sniffs the real format anyway.
fn extension_for(url: &str) -> String {
    let path = reqwest::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "img".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;

    const BODY: &[u8] = b"not really a png";

    async fn spawn_image_server() -> String {
        let app = Router::new()
            .route("/cat.PNG", get(|| async { BODY }))
            .route("/gone.jpg", get(|| async { StatusCode::NOT_FOUND }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(extension_for("https://x.com/a/b.JPG"), "jpg");
        assert_eq!(extension_for("https://x.com/a/b.png?size=large"), "png");
        assert_eq!(extension_for("https://x.com/a/b"), "img");
        assert_eq!(extension_for("https://x.com/a/b.toolongext"), "img");
        assert_eq!(extension_for("not a url"), "img");
    }

    #[tokio::test]
    async fn test_resolve_local_path_passthrough() {
        let source = ImageSource::Path(PathBuf::from("local/file.png"));
        let path = resolve_source(&source).await.unwrap();
        assert_eq!(path, PathBuf::from("local/file.png"));
    }

    #[tokio::test]
    async fn test_download_writes_body_to_dir() {
        let base = spawn_image_server().await;
        let dir = std::env::temp_dir();
        let http = reqwest::Client::new();

        let path = download_image(&http, &format!("{base}/cat.PNG"), &dir)
            .await
            .unwrap();

        assert!(path.starts_with(&dir));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(std::fs::read(&path).unwrap(), BODY);
        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_download_error_status() {
        let base = spawn_image_server().await;
        let http = reqwest::Client::new();

        let err = download_image(&http, &format!("{base}/gone.jpg"), &std::env::temp_dir())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_resolve_url_downloads_to_temp_dir() {
        let base = spawn_image_server().await;
        let source = ImageSource::Url(format!("{base}/cat.PNG"));

        let path = resolve_source(&source).await.unwrap();

        assert!(path.starts_with(std::env::temp_dir()));
        assert_eq!(std::fs::read(&path).unwrap(), BODY);
        std::fs::remove_file(&path).unwrap();
    }
}
