//! Free-form report header fields.
//!
//! Every scalar field travels as its own multipart text part. `ReportField` fixes
//! both the wire name and the order in which parts are appended to the payload.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    ReportNo,
    Client,
    AddressOfClient,
    Applicant,
    AddressOfApplicant,
    TestSite,
    Voltage,
    Spot,
    StartYear,
    StartMonth,
    StartDay,
    StartHour,
    StartMinute,
    EndYear,
    EndMonth,
    EndDay,
    EndHour,
    EndMinute,
}

impl ReportField {
    /// All fields in wire order.
    pub const ALL: [ReportField; 18] = [
        ReportField::ReportNo,
        ReportField::Client,
        ReportField::AddressOfClient,
        ReportField::Applicant,
        ReportField::AddressOfApplicant,
        ReportField::TestSite,
        ReportField::Voltage,
        ReportField::Spot,
        ReportField::StartYear,
        ReportField::StartMonth,
        ReportField::StartDay,
        ReportField::StartHour,
        ReportField::StartMinute,
        ReportField::EndYear,
        ReportField::EndMonth,
        ReportField::EndDay,
        ReportField::EndHour,
        ReportField::EndMinute,
    ];

    /// Text fields shown as regular inputs; the date/time components are rendered separately.
    pub const HEADER: [ReportField; 8] = [
        ReportField::ReportNo,
        ReportField::Client,
        ReportField::AddressOfClient,
        ReportField::Applicant,
        ReportField::AddressOfApplicant,
        ReportField::TestSite,
        ReportField::Voltage,
        ReportField::Spot,
    ];

    pub const START: [ReportField; 5] = [
        ReportField::StartYear,
        ReportField::StartMonth,
        ReportField::StartDay,
        ReportField::StartHour,
        ReportField::StartMinute,
    ];

    pub const END: [ReportField; 5] = [
        ReportField::EndYear,
        ReportField::EndMonth,
        ReportField::EndDay,
        ReportField::EndHour,
        ReportField::EndMinute,
    ];

    /// Multipart field name expected by the report service.
    pub fn form_name(self) -> &'static str {
        match self {
            ReportField::ReportNo => "reportNo",
            ReportField::Client => "client",
            ReportField::AddressOfClient => "addressOfClient",
            ReportField::Applicant => "applicant",
            ReportField::AddressOfApplicant => "addressOfApplicant",
            ReportField::TestSite => "testSite",
            ReportField::Voltage => "voltage",
            ReportField::Spot => "spot",
            ReportField::StartYear => "startYear",
            ReportField::StartMonth => "startMonth",
            ReportField::StartDay => "startDay",
            ReportField::StartHour => "startHour",
            ReportField::StartMinute => "startMinute",
            ReportField::EndYear => "endYear",
            ReportField::EndMonth => "endMonth",
            ReportField::EndDay => "endDay",
            ReportField::EndHour => "endHour",
            ReportField::EndMinute => "endMinute",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportField::ReportNo => "Report No.",
            ReportField::Client => "Client",
            ReportField::AddressOfClient => "Address of client",
            ReportField::Applicant => "Applicant",
            ReportField::AddressOfApplicant => "Address of applicant",
            ReportField::TestSite => "Test site",
            ReportField::Voltage => "Voltage",
            ReportField::Spot => "Spot",
            ReportField::StartYear | ReportField::EndYear => "Year",
            ReportField::StartMonth | ReportField::EndMonth => "Month",
            ReportField::StartDay | ReportField::EndDay => "Day",
            ReportField::StartHour | ReportField::EndHour => "Hour",
            ReportField::StartMinute | ReportField::EndMinute => "Minute",
        }
    }
}

/// Date and time split into the components the form submits separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeParts {
    pub year: String,
    pub month: String,
    pub day: String,
    pub hour: String,
    pub minute: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFields {
    pub report_no: String,
    pub client: String,
    pub address_of_client: String,
    pub applicant: String,
    pub address_of_applicant: String,
    pub test_site: String,
    pub voltage: String,
    pub spot: String,
    pub start_year: String,
    pub start_month: String,
    pub start_day: String,
    pub start_hour: String,
    pub start_minute: String,
    pub end_year: String,
    pub end_month: String,
    pub end_day: String,
    pub end_hour: String,
    pub end_minute: String,
}

impl ReportFields {
    pub fn get(&self, field: ReportField) -> &str {
        match field {
            ReportField::ReportNo => &self.report_no,
            ReportField::Client => &self.client,
            ReportField::AddressOfClient => &self.address_of_client,
            ReportField::Applicant => &self.applicant,
            ReportField::AddressOfApplicant => &self.address_of_applicant,
            ReportField::TestSite => &self.test_site,
            ReportField::Voltage => &self.voltage,
            ReportField::Spot => &self.spot,
            ReportField::StartYear => &self.start_year,
            ReportField::StartMonth => &self.start_month,
            ReportField::StartDay => &self.start_day,
            ReportField::StartHour => &self.start_hour,
            ReportField::StartMinute => &self.start_minute,
            ReportField::EndYear => &self.end_year,
            ReportField::EndMonth => &self.end_month,
            ReportField::EndDay => &self.end_day,
            ReportField::EndHour => &self.end_hour,
            ReportField::EndMinute => &self.end_minute,
        }
    }

    pub fn set(&mut self, field: ReportField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Fields paired with their current value, in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (ReportField, &str)> {
        ReportField::ALL.into_iter().map(|field| (field, self.get(field)))
    }

    pub fn set_start(&mut self, parts: DateTimeParts) {
        self.set_moment(ReportField::START, parts);
    }

    pub fn set_end(&mut self, parts: DateTimeParts) {
        self.set_moment(ReportField::END, parts);
    }

    fn set_moment(&mut self, fields: [ReportField; 5], parts: DateTimeParts) {
        let DateTimeParts {
            year,
            month,
            day,
            hour,
            minute,
        } = parts;
        for (field, value) in fields.into_iter().zip([year, month, day, hour, minute]) {
            self.set(field, value);
        }
    }

    fn slot_mut(&mut self, field: ReportField) -> &mut String {
        match field {
            ReportField::ReportNo => &mut self.report_no,
            ReportField::Client => &mut self.client,
            ReportField::AddressOfClient => &mut self.address_of_client,
            ReportField::Applicant => &mut self.applicant,
            ReportField::AddressOfApplicant => &mut self.address_of_applicant,
            ReportField::TestSite => &mut self.test_site,
            ReportField::Voltage => &mut self.voltage,
            ReportField::Spot => &mut self.spot,
            ReportField::StartYear => &mut self.start_year,
            ReportField::StartMonth => &mut self.start_month,
            ReportField::StartDay => &mut self.start_day,
            ReportField::StartHour => &mut self.start_hour,
            ReportField::StartMinute => &mut self.start_minute,
            ReportField::EndYear => &mut self.end_year,
            ReportField::EndMonth => &mut self.end_month,
            ReportField::EndDay => &mut self.end_day,
            ReportField::EndHour => &mut self.end_hour,
            ReportField::EndMinute => &mut self.end_minute,
        }
    }
}
