use crate::components::report_form::ReportFormComponent;
use common::session::FormVariant;
use yew::{html, Component, Context, Html};

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div>
                <ReportFormComponent variant={FormVariant::WithTemplate} />
            </div>
        }
    }
}
