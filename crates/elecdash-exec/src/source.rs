use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use elecdash_core::breadcrumb;
use elecdash_core::view_spec;

use crate::contracts::AcquireRequest;
use crate::contracts::AcquireTarget;
use crate::contracts::LoadedModule;
use crate::error::AcquireError;

/// The acquisition mechanism behind every view and form.
pub trait ModuleSource {
    fn name(&self) -> &'static str;

    fn acquire(&self, request: &AcquireRequest) -> Result<LoadedModule, AcquireError>;
}

/// Content compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledSource;

/// YAML manifests under `<root>/views/<id>.yaml` and `<root>/dialogs/<id>.yaml`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl ModuleSource for BundledSource {
    fn name(&self) -> &'static str {
        "bundled"
    }

    fn acquire(&self, request: &AcquireRequest) -> Result<LoadedModule, AcquireError> {
        Ok(match request.target {
            AcquireTarget::View(view) => {
                let spec = view_spec(view);
                let trail: Vec<&str> = breadcrumb(view).into_iter().map(|step| step.label()).collect();
                let mut body = vec![spec.summary.to_string(), trail.join(" / ")];
                if !spec.cache_keys.is_empty() {
                    body.push(format!("Data: {}", spec.cache_keys.join(", ")));
                }
                LoadedModule {
                    title: spec.title.to_string(),
                    body,
                }
            }
            AcquireTarget::Dialog(dialog) => LoadedModule {
                title: dialog.title().to_string(),
                body: vec![format!("Form `{dialog}` ready.")],
            },
        })
    }
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn manifest_path(&self, target: AcquireTarget) -> PathBuf {
        self.root
            .join(target.manifest_dir())
            .join(format!("{}.yaml", target.id()))
    }
}

impl ModuleSource for DirectorySource {
    fn name(&self) -> &'static str {
        "directory"
    }

    fn acquire(&self, request: &AcquireRequest) -> Result<LoadedModule, AcquireError> {
        let path = self.manifest_path(request.target);
        let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => AcquireError::NotFound { path: path.clone() },
            _ => AcquireError::Io {
                path: path.clone(),
                source,
            },
        })?;
        serde_yaml::from_str(&raw).map_err(|source| AcquireError::Manifest { path, source })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use elecdash_core::DialogName;
    use elecdash_core::Ticket;
    use elecdash_core::ViewId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn request(target: AcquireTarget) -> AcquireRequest {
        AcquireRequest {
            ticket: Ticket(1),
            target,
        }
    }

    fn modules_fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("views")).expect("views dir");
        fs::create_dir_all(dir.path().join("dialogs")).expect("dialogs dir");
        fs::write(
            dir.path().join("views/quotes.yaml"),
            "title: Quotes\nbody:\n  - Draft quotes\n  - Sent quotes\n",
        )
        .expect("write quotes");
        fs::write(dir.path().join("views/team.yaml"), "title: [unclosed\n").expect("write team");
        fs::write(dir.path().join("dialogs/job.yaml"), "title: New job\n").expect("write job");
        dir
    }

    #[test]
    fn bundled_source_covers_every_view() {
        for view in elecdash_core::ALL_VIEWS {
            let module = BundledSource.acquire(&request(AcquireTarget::View(view))).unwrap();
            assert_eq!(module.title, view_spec(view).title);
            assert!(!module.body.is_empty());
        }
    }

    #[test]
    fn bundled_dialog_uses_form_title() {
        let module = BundledSource
            .acquire(&request(AcquireTarget::Dialog(DialogName::Invoice)))
            .unwrap();
        assert_eq!(module.title, DialogName::Invoice.title());
    }

    #[test]
    fn directory_source_reads_yaml_manifests() {
        let fixture = modules_fixture();
        let source = DirectorySource::new(fixture.path());

        let quotes = source.acquire(&request(AcquireTarget::View(ViewId::Quotes))).unwrap();
        assert_eq!(quotes.title, "Quotes");
        assert_eq!(quotes.body, vec!["Draft quotes".to_string(), "Sent quotes".to_string()]);

        let job = source
            .acquire(&request(AcquireTarget::Dialog(DialogName::Job)))
            .unwrap();
        assert_eq!(job.title, "New job");
        assert!(job.body.is_empty());
    }

    #[test]
    fn directory_source_reports_missing_and_malformed_manifests() {
        let fixture = modules_fixture();
        let source = DirectorySource::new(fixture.path());

        let missing = source
            .acquire(&request(AcquireTarget::View(ViewId::Fleet)))
            .unwrap_err();
        assert!(matches!(missing, AcquireError::NotFound { .. }));
        assert!(missing.to_string().contains("fleet.yaml"));

        let malformed = source
            .acquire(&request(AcquireTarget::View(ViewId::Team)))
            .unwrap_err();
        assert!(matches!(malformed, AcquireError::Manifest { .. }));
    }
}
