//! View rendering for the report form component.
//!
//! Sections, top to bottom: report header fields, start/end date and time, the file
//! inputs (spreadsheet drop zone, template, images), the measurement rows, then the
//! action bar with the notice and the download button.

use yew::html::Scope;
use yew::prelude::*;

use common::model::report::ReportField;
use common::session::{FormSession, Notice};

use super::helpers::{files_of, input_files, input_value, sync_input_files};
use super::messages::Msg;
use super::state::ReportFormComponent;

const CATALOG_LIST_ID: &str = "measurement-catalog";

/// Main view function for the report form component.
pub fn view(component: &ReportFormComponent, ctx: &Context<ReportFormComponent>) -> Html {
    let link = ctx.link();
    let session = &component.session;

    html! {
        <form class="report-form" onsubmit={link.callback(|e: SubmitEvent| { e.prevent_default(); Msg::Submit })}>
            { build_header_fields(session, link) }
            { build_moment("Start", &ReportField::START, session, link) }
            { build_moment("End", &ReportField::END, session, link) }
            { build_file_inputs(component, link) }
            { build_measurements(session, link) }
            { build_actions(session, link) }
        </form>
    }
}

fn text_input(field: ReportField, session: &FormSession<web_sys::File>, link: &Scope<ReportFormComponent>) -> Html {
    html! {
        <label class="field">
            <span>{ field.label() }</span>
            <input
                type="text"
                name={field.form_name()}
                value={session.fields().get(field).to_string()}
                oninput={link.callback(move |e: InputEvent| Msg::FieldChanged(field, input_value(&e)))}
            />
        </label>
    }
}

fn build_header_fields(session: &FormSession<web_sys::File>, link: &Scope<ReportFormComponent>) -> Html {
    html! {
        <fieldset class="report-header">
            <legend>{"Report"}</legend>
            { for ReportField::HEADER.iter().map(|field| text_input(*field, session, link)) }
        </fieldset>
    }
}

fn build_moment(
    legend: &'static str,
    fields: &[ReportField; 5],
    session: &FormSession<web_sys::File>,
    link: &Scope<ReportFormComponent>,
) -> Html {
    html! {
        <fieldset class="report-moment">
            <legend>{ legend }</legend>
            {
                for fields.iter().map(|field| {
                    let field = *field;
                    html! {
                        <label class="field narrow">
                            <span>{ field.label() }</span>
                            <input
                                type="number"
                                min="0"
                                name={field.form_name()}
                                value={session.fields().get(field).to_string()}
                                oninput={link.callback(move |e: InputEvent| Msg::FieldChanged(field, input_value(&e)))}
                            />
                        </label>
                    }
                })
            }
        </fieldset>
    }
}

/// Drop zone plus hidden input for the spreadsheet, then template and image inputs.
fn build_file_inputs(component: &ReportFormComponent, link: &Scope<ReportFormComponent>) -> Html {
    let session = &component.session;
    let input_ref = component.primary_input_ref.clone();

    let ondrop = {
        let input_ref = input_ref.clone();
        link.callback(move |e: DragEvent| {
            e.prevent_default();
            let list = e.data_transfer().and_then(|dt| dt.files());
            if let Some(list) = &list {
                sync_input_files(&input_ref, list);
            }
            Msg::Dropped(files_of(list).into_iter().next())
        })
    };
    let open_picker = {
        let input_ref = input_ref.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(input) = input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
        })
    };

    let primary_label = session
        .primary()
        .map(|f| f.name.clone())
        .unwrap_or_else(|| "Drop the Excel file here or click to choose".to_string());

    html! {
        <fieldset class="report-files">
            <legend>{"Files"}</legend>
            <div
                class={classes!("drop-zone", session.is_dragging().then_some("dragging"))}
                onclick={open_picker}
                ondragover={link.callback(|e: DragEvent| { e.prevent_default(); Msg::DragOver })}
                ondragleave={link.callback(|_: DragEvent| Msg::DragLeave)}
                {ondrop}
            >
                { primary_label }
                <input
                    ref={input_ref}
                    type="file"
                    accept=".xls,.xlsx"
                    style="display:none"
                    onchange={link.callback(|e: Event| Msg::PrimarySelected(input_files(&e).into_iter().next()))}
                />
            </div>
            {
                if session.variant().requires_template() {
                    html! {
                        <label class="field">
                            <span>{"Template (.docx)"}</span>
                            <input
                                type="file"
                                accept=".docx"
                                onchange={link.callback(|e: Event| Msg::TemplateSelected(input_files(&e).into_iter().next()))}
                            />
                        </label>
                    }
                } else {
                    html! {}
                }
            }
            <label class="field">
                <span>{ format!("Images ({})", session.images().len()) }</span>
                <input
                    type="file"
                    accept="image/*"
                    multiple=true
                    onchange={link.callback(|e: Event| Msg::ImagesSelected(input_files(&e)))}
                />
            </label>
        </fieldset>
    }
}

/// Measurement rows. Names come from a `<datalist>` of catalog entries but free text
/// is accepted; leaving the name input (`change`) runs the autofill.
fn build_measurements(session: &FormSession<web_sys::File>, link: &Scope<ReportFormComponent>) -> Html {
    let single_row = session.measurements().len() == 1;

    html! {
        <fieldset class="report-measurements">
            <legend>{"Measurements"}</legend>
            <datalist id={CATALOG_LIST_ID}>
                { for session.catalog().names().map(|name| html! { <option value={name.to_string()} /> }) }
            </datalist>
            <table>
                <thead>
                    <tr>
                        <th>{"Measurement"}</th>
                        <th>{"Certificate No."}</th>
                        <th>{"Certificate date"}</th>
                        <th />
                    </tr>
                </thead>
                <tbody>
                {
                    for session.measurements().iter().enumerate().map(|(index, row)| html! {
                        <tr key={index}>
                            <td>
                                <input
                                    type="text"
                                    list={CATALOG_LIST_ID}
                                    value={row.measurement.clone()}
                                    oninput={link.callback(move |e: InputEvent| Msg::RowMeasurementInput(index, input_value(&e)))}
                                    onchange={link.callback(move |e: Event| Msg::RowMeasurementChanged(index, input_value(&e)))}
                                />
                            </td>
                            <td>
                                <input
                                    type="text"
                                    value={row.certificate_no.clone()}
                                    oninput={link.callback(move |e: InputEvent| Msg::RowCertificateNoChanged(index, input_value(&e)))}
                                />
                            </td>
                            <td>
                                <input
                                    type="text"
                                    value={row.certificate_date.clone()}
                                    oninput={link.callback(move |e: InputEvent| Msg::RowCertificateDateChanged(index, input_value(&e)))}
                                />
                            </td>
                            <td>
                                <button
                                    type="button"
                                    disabled={single_row}
                                    onclick={link.callback(move |_| Msg::RemoveRow(index))}
                                >
                                    {"Remove"}
                                </button>
                            </td>
                        </tr>
                    })
                }
                </tbody>
            </table>
            <button type="button" onclick={link.callback(|_| Msg::AddRow)}>{"Add measurement"}</button>
        </fieldset>
    }
}

fn build_actions(session: &FormSession<web_sys::File>, link: &Scope<ReportFormComponent>) -> Html {
    let loading = session.is_loading();

    html! {
        <div class="report-actions">
            <button type="submit" disabled={loading || !session.can_submit()}>
                { if loading { "Generating..." } else { "Generate report" } }
            </button>
            {
                if loading {
                    html! {
                        <button type="button" onclick={link.callback(|_| Msg::CancelSubmission)}>{"Cancel"}</button>
                    }
                } else {
                    html! {}
                }
            }
            { build_notice(session.notice()) }
            {
                if session.download_url().is_some() {
                    let downloading = session.is_downloading();
                    html! {
                        <button type="button" disabled={downloading} onclick={link.callback(|_| Msg::Download)}>
                            { if downloading { "Downloading..." } else { "Download report" } }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_notice(notice: Option<&Notice>) -> Html {
    match notice {
        Some(Notice::Error(text)) => html! { <p class="notice error" role="alert">{ text.clone() }</p> },
        Some(Notice::Success(text)) => html! { <p class="notice success">{ text.clone() }</p> },
        None => html! {},
    }
}
