//! Landing page and static assets.

use std::path::{Path, PathBuf};

use actix_files::{Files, NamedFile};
use actix_web::{get, web};

const INDEX_PAGE: &str = "index.html";

/// Directories holding the landing page and the public assets.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    views_dir: PathBuf,
    public_dir: PathBuf,
}

impl StaticAssets {
    /// Serve the landing page from `views_dir` and assets from `public_dir`.
    pub fn new(views_dir: impl Into<PathBuf>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            views_dir: views_dir.into(),
            public_dir: public_dir.into(),
        }
    }

    /// Path of the landing page file.
    pub fn index_page(&self) -> PathBuf {
        self.views_dir.join(INDEX_PAGE)
    }

    /// Directory of publicly served assets.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Static file service for the public directory, or `None` when the
    /// directory does not exist.
    pub fn files_service(&self) -> Option<Files> {
        self.public_dir
            .is_dir()
            .then(|| Files::new("/", &self.public_dir))
    }
}

/// Landing page with forms for the API.
#[get("/")]
pub async fn index(assets: web::Data<StaticAssets>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(assets.index_page()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::App;
    use actix_web::test as actix_test;
    use rstest::rstest;

    #[rstest]
    fn files_service_requires_an_existing_directory() {
        let assets = StaticAssets::new("views", "/definitely/not/here");
        assert!(assets.files_service().is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn index_serves_the_views_page() {
        let views = tempfile::tempdir().expect("temp dir");
        std::fs::write(views.path().join(INDEX_PAGE), "<h1>Exercise tracker</h1>")
            .expect("write index");
        let assets = StaticAssets::new(views.path(), views.path());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(assets))
                .service(index),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(body.as_ref(), b"<h1>Exercise tracker</h1>");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_index_is_not_found() {
        let views = tempfile::tempdir().expect("temp dir");
        let assets = StaticAssets::new(views.path(), views.path());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(assets))
                .service(index),
        )
        .await;

        let req = actix_test::TestRequest::get().uri("/").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
