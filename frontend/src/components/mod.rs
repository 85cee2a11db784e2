pub mod report_form;
