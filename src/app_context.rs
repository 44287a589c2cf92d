use std::path::{Path, PathBuf};

use crate::model::ModelBundle;

/// Shared, read-only state handed to every request handler.
///
/// Built once before the server binds; actix clones the surrounding
/// `web::Data` handle per worker, so the bundle itself is never copied.
#[derive(Debug)]
pub struct AppContext {
    bundle: Option<ModelBundle>,
    static_dir: PathBuf,
}

impl AppContext {
    pub fn new(bundle: Option<ModelBundle>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundle,
            static_dir: static_dir.into(),
        }
    }

    pub fn bundle(&self) -> Option<&ModelBundle> {
        self.bundle.as_ref()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}
