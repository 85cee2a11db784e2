//! Defines the properties for the `ReportFormComponent`.

use common::session::FormVariant;
use yew::prelude::*;

/// Properties for the `ReportFormComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct ReportFormProps {
    /// Which files the form asks for.
    ///
    /// - `WithTemplate` (the default) requires a DOCX template next to the spreadsheet
    ///   and sends it as `templateFile`.
    /// - `SpreadsheetOnly` hides the template input; the service uses its own template.
    #[prop_or_default]
    pub variant: FormVariant,

    /// Optional URL of a JSON instrument catalog replacing the built-in list.
    ///
    /// Fetched once on first render. If the request fails the built-in catalog stays in
    /// place and the user is told through a toast.
    #[prop_or_default]
    pub catalog_url: Option<String>,
}
