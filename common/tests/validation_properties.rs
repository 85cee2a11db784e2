use common::error::FormError;
use common::model::catalog::MeasurementCatalog;
use common::model::file::SelectedFile;
use common::session::{FormSession, FormVariant, MAX_FILE_SIZE, ValidationOutcome, validate};
use proptest::prelude::*;

const SPREADSHEET_TYPES: [&str; 2] = [
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

fn stem() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ -]{1,16}"
}

fn accepted_spreadsheet() -> impl Strategy<Value = SelectedFile<()>> {
    let by_extension = (stem(), prop_oneof![Just(".xls"), Just(".xlsx")], "[a-z/]{0,12}")
        .prop_map(|(stem, ext, media)| (format!("{stem}{ext}"), media));
    let by_media_type = (stem(), prop::sample::select(SPREADSHEET_TYPES.to_vec()))
        .prop_map(|(stem, media)| (stem, media.to_string()));

    (prop_oneof![by_extension, by_media_type], 0..=MAX_FILE_SIZE)
        .prop_map(|((name, media), size)| SelectedFile::new(name, media, size, ()))
}

fn rejected_spreadsheet() -> impl Strategy<Value = SelectedFile<()>> {
    (
        stem(),
        prop_oneof![Just(""), Just(".csv"), Just(".docx"), Just(".xlsm"), Just(".XLSX")],
        prop_oneof![Just("text/csv"), Just("application/pdf"), Just("")],
        0..=MAX_FILE_SIZE,
    )
        .prop_map(|(stem, ext, media, size)| {
            SelectedFile::new(format!("{stem}{ext}"), media, size, ())
        })
}

fn session() -> FormSession<()> {
    FormSession::new(FormVariant::SpreadsheetOnly, MeasurementCatalog::builtin())
}

proptest! {
    #[test]
    fn accepted_spreadsheets_pass(file in accepted_spreadsheet()) {
        prop_assert_eq!(validate(Some(&file), None), ValidationOutcome::Accepted);

        let mut session = session();
        prop_assert!(session.select_primary(Some(file)).is_ok());
        prop_assert!(session.primary().is_some());
        prop_assert!(session.error().is_none());
    }

    #[test]
    fn other_spreadsheets_fail_and_are_cleared(file in rejected_spreadsheet()) {
        let mut session = session();
        prop_assert_eq!(
            session.select_primary(Some(file)),
            Err(FormError::InvalidSpreadsheet)
        );
        prop_assert!(session.primary().is_none());
        prop_assert_eq!(
            session.error(),
            Some("Please upload a valid Excel file (.xls or .xlsx)")
        );
    }

    #[test]
    fn oversized_files_are_always_cleared(
        excess in 1..=MAX_FILE_SIZE,
        oversized_template in any::<bool>(),
    ) {
        let mut session = FormSession::new(FormVariant::WithTemplate, MeasurementCatalog::builtin());
        let small_primary = SelectedFile::new("d.xlsx", "", 1, ());
        let small_template = SelectedFile::new("t.docx", "", 1, ());

        let failure = if oversized_template {
            session.select_primary(Some(small_primary)).unwrap();
            session.select_template(Some(SelectedFile::new("t.docx", "", MAX_FILE_SIZE + excess, ())))
        } else {
            session.select_template(Some(small_template)).unwrap();
            session.select_primary(Some(SelectedFile::new("d.xlsx", "", MAX_FILE_SIZE + excess, ())))
        };

        prop_assert_eq!(failure, Err(FormError::FileTooLarge));
        prop_assert!(session.primary().is_none());
        prop_assert!(session.template().is_none());
        prop_assert_eq!(session.error(), Some("File size must not exceed 10MB"));
        prop_assert!(!session.can_submit());
    }

    #[test]
    fn oversized_images_clear_the_selection(
        sizes in prop::collection::vec(0..=MAX_FILE_SIZE, 0..4),
        excess in 1..=MAX_FILE_SIZE,
    ) {
        let mut images: Vec<_> = sizes
            .into_iter()
            .enumerate()
            .map(|(i, size)| SelectedFile::new(format!("{i}.png"), "image/png", size, ()))
            .collect();
        images.push(SelectedFile::new("big.png", "image/png", MAX_FILE_SIZE + excess, ()));

        let mut session = session();
        prop_assert_eq!(session.select_images(images), Err(FormError::FileTooLarge));
        prop_assert!(session.images().is_empty());
    }

    #[test]
    fn autofill_is_idempotent(name in prop_oneof![
        Just("FLUKE-1777".to_string()),
        Just("选项2".to_string()),
        "[A-Z]{1,8}-[0-9]{1,4}",
    ]) {
        let mut once = session();
        once.on_row_measurement_changed(0, name.clone()).unwrap();

        let mut twice = session();
        twice.on_row_measurement_changed(0, name.clone()).unwrap();
        twice.on_row_measurement_changed(0, name).unwrap();

        prop_assert_eq!(once.measurements(), twice.measurements());
    }

    #[test]
    fn unknown_names_clear_certificates(name in "[a-z]{1,12}") {
        let mut session = session();
        session.on_row_measurement_changed(0, "FLUKE-1777").unwrap();
        session.on_row_measurement_changed(0, name).unwrap();

        let row = &session.measurements()[0];
        prop_assert!(row.certificate_no.is_empty());
        prop_assert!(row.certificate_date.is_empty());
    }
}
