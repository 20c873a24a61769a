use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("no module manifest at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read module manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed module manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
