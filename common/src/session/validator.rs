//! File validation.
//!
//! Validation is an ordered gate; the first failing rule wins and only the files it
//! implicates are dropped from the session:
//!
//! 1. the spreadsheet must carry a spreadsheet media type or a `.xls`/`.xlsx` name,
//! 2. the template (when the variant asks for one) must carry the DOCX media type or a
//!    `.docx` name,
//! 3. no file checked in this pass may exceed `MAX_FILE_SIZE`; every checked file is dropped.
//!
//! Rules only run for files that are present, and only when a file input changes.

use super::FormSession;
use crate::error::FormError;
use crate::model::file::SelectedFile;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const SPREADSHEET_MEDIA_TYPES: [&str; 2] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = [".xls", ".xlsx"];

pub const TEMPLATE_MEDIA_TYPES: [&str; 1] =
    ["application/vnd.openxmlformats-officedocument.wordprocessingml.document"];
pub const TEMPLATE_EXTENSIONS: [&str; 1] = [".docx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected {
        error: FormError,
        clear_primary: bool,
        clear_template: bool,
    },
}

/// Runs the validation gate over the spreadsheet and, when given, the template.
pub fn validate<H>(
    primary: Option<&SelectedFile<H>>,
    template: Option<&SelectedFile<H>>,
) -> ValidationOutcome {
    if primary.is_some_and(|file| !accepts(file, &SPREADSHEET_MEDIA_TYPES, &SPREADSHEET_EXTENSIONS)) {
        return ValidationOutcome::Rejected {
            error: FormError::InvalidSpreadsheet,
            clear_primary: true,
            clear_template: false,
        };
    }

    if template.is_some_and(|file| !accepts(file, &TEMPLATE_MEDIA_TYPES, &TEMPLATE_EXTENSIONS)) {
        return ValidationOutcome::Rejected {
            error: FormError::InvalidTemplate,
            clear_primary: false,
            clear_template: true,
        };
    }

    if primary.into_iter().chain(template).any(oversized) {
        return ValidationOutcome::Rejected {
            error: FormError::FileTooLarge,
            clear_primary: primary.is_some(),
            clear_template: template.is_some(),
        };
    }

    ValidationOutcome::Accepted
}

/// Attachments are only checked against the size ceiling.
pub fn validate_images<H>(images: &[SelectedFile<H>]) -> Result<(), FormError> {
    if images.iter().any(oversized) {
        return Err(FormError::FileTooLarge);
    }
    Ok(())
}

fn accepts<H>(file: &SelectedFile<H>, media_types: &[&str], extensions: &[&str]) -> bool {
    media_types.contains(&file.media_type.as_str())
        || extensions.iter().any(|ext| file.name.ends_with(ext))
}

fn oversized<H>(file: &SelectedFile<H>) -> bool {
    file.size > MAX_FILE_SIZE
}

impl<H> FormSession<H> {
    /// Replaces the spreadsheet selection (`None` clears it) and re-validates.
    pub fn select_primary(&mut self, file: Option<SelectedFile<H>>) -> Result<(), FormError> {
        self.primary = file;
        self.revalidate()
    }

    /// Replaces the template selection and re-validates.
    pub fn select_template(&mut self, file: Option<SelectedFile<H>>) -> Result<(), FormError> {
        self.template = file;
        self.revalidate()
    }

    /// Replaces the attachment list. An oversized image drops the whole selection.
    pub fn select_images(&mut self, images: Vec<SelectedFile<H>>) -> Result<(), FormError> {
        self.notice = None;
        if let Err(error) = validate_images(&images) {
            log::warn!("rejected {} image(s): {}", images.len(), error);
            self.images.clear();
            self.report(&error);
            return Err(error);
        }
        self.images = images;
        Ok(())
    }

    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// A file dropped on the spreadsheet zone.
    pub fn drop_primary(&mut self, file: Option<SelectedFile<H>>) -> Result<(), FormError> {
        self.dragging = false;
        self.select_primary(file)
    }

    fn revalidate(&mut self) -> Result<(), FormError> {
        self.notice = None;
        let template = self
            .template
            .as_ref()
            .filter(|_| self.variant.requires_template());

        match validate(self.primary.as_ref(), template) {
            ValidationOutcome::Accepted => Ok(()),
            ValidationOutcome::Rejected {
                error,
                clear_primary,
                clear_template,
            } => {
                log::warn!("file selection rejected: {error}");
                if clear_primary {
                    self.primary = None;
                }
                if clear_template {
                    self.template = None;
                }
                self.report(&error);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::MeasurementCatalog;
    use crate::session::FormVariant;

    const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
    const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    fn file(name: &str, media_type: &str, size: u64) -> SelectedFile<()> {
        SelectedFile::new(name, media_type, size, ())
    }

    fn session(variant: FormVariant) -> FormSession<()> {
        FormSession::new(variant, MeasurementCatalog::builtin())
    }

    #[test]
    fn extension_alone_is_enough() {
        let primary = file("data.xls", "", 10);
        let template = file("tmpl.docx", "application/octet-stream", 10);
        assert_eq!(
            validate(Some(&primary), Some(&template)),
            ValidationOutcome::Accepted
        );
    }

    #[test]
    fn media_type_alone_is_enough() {
        let primary = file("export", XLSX, 10);
        let template = file("template", DOCX, 10);
        assert_eq!(
            validate(Some(&primary), Some(&template)),
            ValidationOutcome::Accepted
        );
    }

    #[test]
    fn spreadsheet_rule_runs_before_template_rule() {
        let primary = file("notes.txt", "text/plain", 10);
        let template = file("tmpl.pdf", "application/pdf", 10);
        assert_eq!(
            validate(Some(&primary), Some(&template)),
            ValidationOutcome::Rejected {
                error: FormError::InvalidSpreadsheet,
                clear_primary: true,
                clear_template: false,
            }
        );
    }

    #[test]
    fn size_ceiling_is_inclusive() {
        let at_limit = file("data.xlsx", XLSX, MAX_FILE_SIZE);
        assert_eq!(validate(Some(&at_limit), None), ValidationOutcome::Accepted);

        let over = file("data.xlsx", XLSX, MAX_FILE_SIZE + 1);
        assert_eq!(
            validate(Some(&over), None),
            ValidationOutcome::Rejected {
                error: FormError::FileTooLarge,
                clear_primary: true,
                clear_template: false,
            }
        );
    }

    #[test]
    fn oversized_template_clears_both_files() {
        let mut session = session(FormVariant::WithTemplate);
        session.select_primary(Some(file("data.xlsx", XLSX, 100))).unwrap();

        let err = session
            .select_template(Some(file("tmpl.docx", DOCX, MAX_FILE_SIZE + 1)))
            .unwrap_err();

        assert_eq!(err, FormError::FileTooLarge);
        assert!(session.primary().is_none());
        assert!(session.template().is_none());
        assert_eq!(session.error(), Some("File size must not exceed 10MB"));
    }

    #[test]
    fn invalid_template_keeps_spreadsheet() {
        let mut session = session(FormVariant::WithTemplate);
        session.select_primary(Some(file("data.xlsx", XLSX, 100))).unwrap();

        let err = session
            .select_template(Some(file("tmpl.doc", "application/msword", 100)))
            .unwrap_err();

        assert_eq!(err, FormError::InvalidTemplate);
        assert!(session.primary().is_some());
        assert!(session.template().is_none());
    }

    #[test]
    fn spreadsheet_only_variant_ignores_template() {
        let mut session = session(FormVariant::SpreadsheetOnly);
        session.select_template(Some(file("junk.bin", "", MAX_FILE_SIZE * 2))).unwrap();
        session.select_primary(Some(file("data.xlsx", XLSX, 100))).unwrap();
        assert!(session.error().is_none());
        assert!(session.can_submit());
    }

    #[test]
    fn successful_selection_clears_previous_error() {
        let mut session = session(FormVariant::SpreadsheetOnly);
        session.select_primary(Some(file("a.csv", "text/csv", 1))).unwrap_err();
        assert!(session.error().is_some());

        session.select_primary(Some(file("a.xlsx", XLSX, 1))).unwrap();
        assert!(session.notice().is_none());
    }

    #[test]
    fn oversized_image_drops_image_selection() {
        let mut session = session(FormVariant::WithTemplate);
        session
            .select_images(vec![file("a.png", "image/png", 1), file("b.png", "image/png", 2)])
            .unwrap();
        assert_eq!(session.images().len(), 2);

        let err = session
            .select_images(vec![file("huge.png", "image/png", MAX_FILE_SIZE + 1)])
            .unwrap_err();
        assert_eq!(err, FormError::FileTooLarge);
        assert!(session.images().is_empty());
    }

    #[test]
    fn drop_ends_dragging_and_validates() {
        let mut session = session(FormVariant::SpreadsheetOnly);
        session.drag_over();
        assert!(session.is_dragging());

        session.drop_primary(Some(file("data.xlsx", "", 5))).unwrap();
        assert!(!session.is_dragging());
        assert_eq!(session.primary().map(|f| f.name.as_str()), Some("data.xlsx"));
    }
}
