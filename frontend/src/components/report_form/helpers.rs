//! Utility functions for the report form component.
//!
//! - **File conversion**: turning browser `File`/`FileList` values into the
//!   `SelectedFile` records the session validates.
//! - **DOM helpers**: reading input values from events and writing a dropped
//!   `FileList` back into the file input.
//! - **User feedback**: temporary toast notifications for messages that do not belong
//!   in the form notice (busy rejections, catalog loading).

use wasm_bindgen::JsCast;
use web_sys::{Event, File, FileList, HtmlElement, HtmlInputElement};
use yew::{NodeRef, TargetCast};

use common::model::file::SelectedFile;

/// Wraps a browser file with the metadata validation needs.
pub fn selected_file(file: File) -> SelectedFile<File> {
    SelectedFile::new(file.name(), file.type_(), file.size() as u64, file)
}

/// All files of a `FileList`, in order.
pub fn files_of(list: Option<FileList>) -> Vec<File> {
    list.map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

/// Files chosen in the `<input type="file">` that fired `event`.
pub fn input_files(event: &Event) -> Vec<File> {
    files_of(event.target_unchecked_into::<HtmlInputElement>().files())
}

/// Current value of the `<input>` that fired `event`.
pub fn input_value(event: &Event) -> String {
    event.target_unchecked_into::<HtmlInputElement>().value()
}

/// Mirrors a dropped `FileList` into the file input so the native control shows it.
pub fn sync_input_files(input_ref: &NodeRef, files: &FileList) {
    if let Some(input) = input_ref.cast::<HtmlInputElement>() {
        input.set_files(Some(files));
    }
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// # Arguments
/// * `message` - The text content to display in the toast.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
        toast.set_text_content(Some(message));
        let html_toast: HtmlElement = toast.unchecked_into();
        let style = html_toast.style();
        style.set_property("position", "fixed").ok();
        style.set_property("bottom", "20px").ok();
        style.set_property("left", "50%").ok();
        style.set_property("transform", "translateX(-50%)").ok();
        style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
        style.set_property("color", "#fff").ok();
        style.set_property("padding", "10px 20px").ok();
        style.set_property("border-radius", "4px").ok();
        style.set_property("z-index", "10000").ok();
        style.set_property("font-family", "Arial, sans-serif").ok();

        if body.append_child(&html_toast).is_ok() {
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(3000).await;
                html_toast.remove();
            });
        }
    }
}
