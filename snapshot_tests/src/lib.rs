mod compare;
mod scenes;

pub use compare::{compare_markup, generate_diff, CompareResult};
pub use scenes::{capture_scene, render_scene, CaptureConfig, SCENES};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotTestError {
    #[error("Failed to render scene: {0}")]
    Render(String),
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
    #[error("Reference snapshot not found: {0}")]
    ReferenceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Build error: {0}")]
    Build(#[from] stackdom::BuildError),
}

pub type Result<T> = std::result::Result<T, SnapshotTestError>;

/// Configuration for a snapshot test
#[derive(Clone)]
pub struct SnapshotTestConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Similarity threshold (0.0 to 1.0, default 1.0)
    pub similarity_threshold: f64,
}

impl Default for SnapshotTestConfig {
    fn default() -> Self {
        Self {
            scene_name: String::new(),
            similarity_threshold: 1.0,
        }
    }
}

/// Result of a snapshot test
pub struct SnapshotTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// Share of markup tokens matching the reference (0.0 to 1.0)
    pub similarity: f64,
    /// Path to the captured markup
    pub captured_path: PathBuf,
    /// Path to the reference markup
    pub reference_path: PathBuf,
    /// Path to diff file (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the references directory
pub fn references_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("references")
}

/// Get the path to a reference snapshot for a scene
pub fn reference_path(scene_name: &str) -> PathBuf {
    references_dir().join(format!("{}.html", scene_name))
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

/// Get the path to a captured snapshot
pub fn captured_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.html", scene_name))
}

/// Get the path to a diff file
pub fn diff_path(scene_name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.txt", scene_name))
}

/// Run a snapshot regression test
pub fn run_snapshot_test(config: &SnapshotTestConfig) -> Result<SnapshotTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let ref_path = reference_path(&config.scene_name);
    let cap_path = captured_path(&config.scene_name);

    if !ref_path.exists() {
        return Err(SnapshotTestError::ReferenceNotFound(ref_path));
    }

    capture_scene(&CaptureConfig {
        scene_name: config.scene_name.clone(),
        output_path: cap_path.clone(),
    })?;

    let compare_result = compare_markup(&ref_path, &cap_path)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    let diff = if !passed {
        let diff_file = diff_path(&config.scene_name);
        generate_diff(&ref_path, &cap_path, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(SnapshotTestResult {
        passed,
        similarity: compare_result.similarity,
        captured_path: cap_path,
        reference_path: ref_path,
        diff_path: diff,
    })
}

/// Update the reference snapshot for a scene
pub fn update_reference(scene_name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(references_dir())?;

    let ref_path = reference_path(scene_name);
    capture_scene(&CaptureConfig {
        scene_name: scene_name.to_string(),
        output_path: ref_path.clone(),
    })?;

    println!("Updated reference: {}", ref_path.display());
    Ok(ref_path)
}

/// Check if we're in update references mode
pub fn should_update_references() -> bool {
    std::env::var("UPDATE_REFERENCES").is_ok()
}
