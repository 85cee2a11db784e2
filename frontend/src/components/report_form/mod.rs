//! Report form: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `ReportFormProps`, `ReportFormComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//! - On first render, replace the built-in instrument catalog when a `catalog_url` is given.

use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::catalog::MeasurementCatalog;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use helpers::show_toast;
pub use messages::Msg;
pub use props::ReportFormProps;
pub use state::ReportFormComponent;

impl Component for ReportFormComponent {
    type Message = Msg;
    type Properties = ReportFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        ReportFormComponent::new(ctx.props().variant)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render || self.loaded {
            return;
        }
        self.loaded = true;

        if let Some(url) = ctx.props().catalog_url.clone() {
            let link = ctx.link().clone();
            spawn_local(async move {
                let response = Request::get(&url).send().await;
                match response {
                    Ok(resp) if resp.ok() => match resp.json::<MeasurementCatalog>().await {
                        Ok(catalog) => link.send_message(Msg::CatalogLoaded(catalog)),
                        Err(err) => {
                            log::warn!("catalog at {url} is malformed: {err}");
                            show_toast("Instrument list could not be read; using the built-in list.");
                        }
                    },
                    Ok(resp) => {
                        log::warn!("catalog request failed with status {}", resp.status());
                        show_toast("Instrument list unavailable; using the built-in list.");
                    }
                    Err(err) => {
                        log::warn!("catalog request failed: {err}");
                        show_toast("Instrument list unavailable; using the built-in list.");
                    }
                }
            });
        }
    }
}
