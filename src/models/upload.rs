//! File selections and validated exam submissions
//!
//! Selected files are only ever referred to by name; their content is never
//! read.

use std::path::{Path, PathBuf};

use crate::ACCEPTED_EXTENSIONS;

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// Final path component, shown in the UI and stored on the exam
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    /// Whether the extension is one the picker offers
    pub fn has_accepted_extension(&self) -> bool {
        is_accepted(&self.path)
    }
}

/// Check a path against the picker's accepted extensions (case-insensitive)
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| accepted.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Parse a picker entry into file selections.
///
/// Entries are separated by commas; blanks are skipped and entries without
/// an accepted extension are filtered out, the way a browser file dialog
/// hides files that do not match its `accept` list.
pub fn parse_selection(input: &str) -> Vec<SelectedFile> {
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(SelectedFile::from_path)
        .filter(SelectedFile::has_accepted_extension)
        .collect()
}

/// A complete exam submission, ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDraft {
    pub exam_number: String,
    pub title: String,
    pub question_paper: SelectedFile,
    pub answer_sheets: Vec<SelectedFile>,
}

impl ExamDraft {
    pub fn answer_sheet_names(&self) -> Vec<String> {
        self.answer_sheets.iter().map(|f| f.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_extraction() {
        let file = SelectedFile::from_path("/scans/week1/paper.pdf");
        assert_eq!(file.name, "paper.pdf");
        assert!(file.has_accepted_extension());
    }

    #[test]
    fn test_accepted_extensions() {
        assert!(is_accepted(Path::new("a.PDF")));
        assert!(is_accepted(Path::new("a.jpeg")));
        assert!(is_accepted(Path::new("a.Png")));
        assert!(!is_accepted(Path::new("a.docx")));
        assert!(!is_accepted(Path::new("README")));
    }

    #[test]
    fn test_parse_selection_filters_and_trims() {
        let files = parse_selection(" s1.pdf, notes.txt ,, scans/s2.JPG ");
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["s1.pdf", "s2.JPG"]);
        assert!(parse_selection("   ").is_empty());
    }
}
