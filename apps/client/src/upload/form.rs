//! Upload Form State — the single accepted resume file, drag state, and the
//! text fields that are composed into a `SubmissionPayload`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::ValidationError;
use crate::upload::validator::{mime_type_for_extension, validate_file};

// ────────────────────────────────────────────────────────────────────────────
// Files
// ────────────────────────────────────────────────────────────────────────────

/// Where the bytes of a selected file live. Contents are read lazily at
/// submission time, the way a browser `File` handle is.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    Path(PathBuf),
    #[cfg(test)]
    Memory(Bytes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub source: FileSource,
}

impl SelectedFile {
    /// Describes a file on disk without reading its contents. The MIME type is
    /// derived from the extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type: mime_type_for_extension(extension).to_string(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    /// Reads the file contents for upload.
    pub async fn read_contents(&self) -> std::io::Result<Bytes> {
        match &self.source {
            FileSource::Path(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
            #[cfg(test)]
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }

    /// Size in megabytes with two decimals, as shown next to the file name.
    pub fn display_size(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }

    #[cfg(test)]
    pub(crate) fn in_memory(name: &str, mime_type: &str, size_bytes: u64) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
            mime_type: mime_type.to_string(),
            source: FileSource::Memory(Bytes::from_static(b"%PDF-1.4 dummy")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Form fields
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Fresher,
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// Wire value of the `experience_level` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "fresher",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "Student / Fresher",
            ExperienceLevel::Junior => "0–2 Years",
            ExperienceLevel::Mid => "2–5 Years",
            ExperienceLevel::Senior => "5+ Years",
        }
    }
}

/// Multipart submission for `POST /api/analyze-resume`.
///
/// The only constructor is `UploadForm::submit`, which refuses to build a
/// payload without a resume file.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPayload {
    target_role: String,
    job_description: String,
    experience_level: Option<ExperienceLevel>,
    resume_file: SelectedFile,
}

impl SubmissionPayload {
    pub fn target_role(&self) -> &str {
        &self.target_role
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn experience_level(&self) -> Option<ExperienceLevel> {
        self.experience_level
    }

    pub fn resume_file(&self) -> &SelectedFile {
        &self.resume_file
    }
}

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

/// Input events from whatever front end hosts the form.
#[derive(Debug, Clone)]
pub enum FileEvent {
    Picked(SelectedFile),
    /// A drop that may or may not carry a file.
    Dropped(Option<SelectedFile>),
    DragEnter,
    DragOver,
    DragLeave,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DragOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Empty,
    Selected,
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub target_role: String,
    pub job_description: String,
    pub experience_level: Option<ExperienceLevel>,
    file: Option<SelectedFile>,
    drag: DragState,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        if self.file.is_some() {
            FormState::Selected
        } else {
            FormState::Empty
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Applies a UI event.
    ///
    /// A rejected file is returned as the error so the caller can surface the
    /// reason; the stored selection is left untouched in that case.
    pub fn handle(&mut self, event: FileEvent) -> Result<(), ValidationError> {
        match event {
            FileEvent::DragEnter | FileEvent::DragOver => {
                self.drag = DragState::DragOver;
                Ok(())
            }
            FileEvent::DragLeave => {
                self.drag = DragState::Idle;
                Ok(())
            }
            FileEvent::Dropped(file) => {
                self.drag = DragState::Idle;
                match file {
                    Some(file) => self.accept(file),
                    None => Ok(()),
                }
            }
            FileEvent::Picked(file) => self.accept(file),
            FileEvent::Removed => {
                self.clear_file();
                Ok(())
            }
        }
    }

    fn accept(&mut self, file: SelectedFile) -> Result<(), ValidationError> {
        if let Err(reason) = validate_file(&file) {
            warn!("Rejected {}: {reason}", file.name);
            return Err(reason);
        }
        debug!("Selected {} ({})", file.name, file.display_size());
        self.file = Some(file);
        Ok(())
    }

    pub fn clear_file(&mut self) {
        self.file = None;
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self, in_flight: bool) -> bool {
        self.file.is_some() && !in_flight
    }

    /// Builds the submission payload from the current fields and file.
    ///
    /// Returns `None` (a no-op) when submission is not allowed: no file, a
    /// request already in flight, or a blank target role. The file stays
    /// selected until the caller reports a successful submission.
    pub fn submit(&self, in_flight: bool) -> Option<SubmissionPayload> {
        if !self.can_submit(in_flight) {
            return None;
        }
        if self.target_role.trim().is_empty() {
            warn!("Target role is required");
            return None;
        }
        let resume_file = self.file.clone()?;

        Some(SubmissionPayload {
            target_role: self.target_role.trim().to_string(),
            job_description: self.job_description.clone(),
            experience_level: self.experience_level,
            resume_file,
        })
    }
}
