//! The regeneration pipeline: scan → render → write → publish.
//!
//! One [`Pipeline`] value is built at startup and reused for every run. A run
//! is the unit of error recovery: whatever fails inside it is reported to the
//! caller, and the next run starts from a clean slate — no partial state
//! survives between runs.

use crate::artifact::{self, ArtifactError};
use crate::gallery::{self, GalleryError};
use crate::publish::{self, PublishError, Vcs};
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("gallery generation failed: {0}")]
    Gallery(#[from] GalleryError),
    #[error("artifact write failed: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

pub struct Pipeline<V: Vcs> {
    dir: PathBuf,
    output_name: String,
    message: String,
    vcs: V,
}

impl<V: Vcs> Pipeline<V> {
    pub fn new(dir: PathBuf, output_name: String, message: String, vcs: V) -> Self {
        Self {
            dir,
            output_name,
            message,
            vcs,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    /// Scan the directory and replace the artifact. No publishing — this is
    /// the startup one-shot and the `build` subcommand.
    pub fn regenerate(&self) -> Result<(), PipelineError> {
        let images = gallery::scan(&self.dir, &self.output_name)?;
        let document = gallery::render(&images);
        artifact::replace(&self.dir.join(&self.output_name), &document.into_string())?;
        info!(
            "generated {} with {} images",
            self.output_name,
            images.len()
        );
        Ok(())
    }

    /// Full triggered run: regenerate, then sync to the remote.
    pub fn run(&self) -> Result<(), PipelineError> {
        self.regenerate()?;
        publish::publish(&self.vcs, &self.message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::VcsOutput;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct RecordingVcs {
        calls: RefCell<Vec<String>>,
    }

    impl RecordingVcs {
        fn new() -> Self {
            Self {
                calls: RefCell::new(vec![]),
            }
        }

        fn record(&self, call: &str) -> std::io::Result<VcsOutput> {
            self.calls.borrow_mut().push(call.to_string());
            Ok(VcsOutput {
                success: true,
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    impl Vcs for RecordingVcs {
        fn stage(&self) -> std::io::Result<VcsOutput> {
            self.record("stage")
        }
        fn commit(&self, message: &str) -> std::io::Result<VcsOutput> {
            self.record(&format!("commit:{message}"))
        }
        fn push(&self) -> std::io::Result<VcsOutput> {
            self.record("push")
        }
    }

    fn pipeline(dir: &Path) -> Pipeline<RecordingVcs> {
        Pipeline::new(
            dir.to_path_buf(),
            "index.html".to_string(),
            "Photo added".to_string(),
            RecordingVcs::new(),
        )
    }

    #[test]
    fn regenerate_writes_artifact_without_publishing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.png"), "fake").unwrap();

        let p = pipeline(tmp.path());
        p.regenerate().unwrap();

        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains("photo.png"));
        assert!(p.vcs.calls.borrow().is_empty());
    }

    #[test]
    fn run_regenerates_then_publishes_once() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.png"), "fake").unwrap();

        let p = pipeline(tmp.path());
        p.run().unwrap();

        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains(r#"href="photo.png""#));
        assert_eq!(
            *p.vcs.calls.borrow(),
            vec!["stage", "commit:Photo added", "push"]
        );
    }

    #[test]
    fn run_against_missing_directory_fails_before_any_git_call() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("nope");

        let p = pipeline(&gone);
        let err = p.run().unwrap_err();
        assert!(matches!(err, PipelineError::Gallery(_)));
        assert!(p.vcs.calls.borrow().is_empty());
    }

    #[test]
    fn repeated_runs_produce_identical_artifacts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), "fake").unwrap();
        fs::write(tmp.path().join("b.png"), "fake").unwrap();

        let p = pipeline(tmp.path());
        p.regenerate().unwrap();
        let first = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        p.regenerate().unwrap();
        let second = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn scenario_two_images_and_a_readme() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.jpg"), "fake").unwrap();
        fs::write(tmp.path().join("b.png"), "fake").unwrap();
        fs::write(tmp.path().join("readme.md"), "# notes").unwrap();

        pipeline(tmp.path()).regenerate().unwrap();

        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(html.contains("a.jpg"));
        assert!(html.contains("b.png"));
        assert!(!html.contains("readme.md"));
        assert!(html.find("a.jpg").unwrap() < html.find("b.png").unwrap());
        assert!(html.contains("<p>1</p>"));
        assert!(html.contains("<p>2</p>"));
        assert!(!html.contains("<p>3</p>"));
    }

    #[test]
    fn artifact_never_lists_itself_on_rerun() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("photo.png"), "fake").unwrap();

        let p = pipeline(tmp.path());
        p.regenerate().unwrap();
        // Second run sees index.html in the directory; it must not become a tile.
        p.regenerate().unwrap();

        let html = fs::read_to_string(tmp.path().join("index.html")).unwrap();
        assert!(!html.contains(r#"href="index.html""#));
    }
}
