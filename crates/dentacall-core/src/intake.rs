//! Call intake: validation and preparation of a verification request.
//!
//! Intake turns a `CallRequest` into the values that are stored on the new
//! verification and handed to the voice agent: an E.164 phone number and
//! dates of birth in the form the agent reads aloud.

use chrono::NaiveDate;

use dentacall_contracts::{
    call::{CallRequest, PatientIdentity, SubscriberIdentity},
    error::{DentacallError, DentacallResult},
};

/// A validated request, ready to be stored and dialed.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    pub patient: PatientIdentity,
    pub insurance_carrier: String,
    /// E.164, e.g. `+18005551234`.
    pub phone_number: String,
    pub subscriber: Option<SubscriberIdentity>,
}

/// Validate `request` and prepare it for the call.
///
/// Required fields are checked in a fixed order so the first missing one is
/// reported: `patientName`, `patientDOB`, `memberId`, `insuranceCarrier`,
/// `phoneNumber`.
pub fn prepare_call(request: &CallRequest) -> DentacallResult<PreparedCall> {
    let patient_name = required("patientName", &request.patient_name)?;
    let patient_dob = required("patientDOB", &request.patient_dob)?;
    let member_id = required("memberId", &request.member_id)?;
    let insurance_carrier = required("insuranceCarrier", &request.insurance_carrier)?;
    let phone_input = required("phoneNumber", &request.phone_number)?;

    let phone_number = normalize_phone_number(&phone_input)?;
    let spoken_dob = spoken_date(&patient_dob)?;

    let subscriber = match non_blank(&request.subscriber_name) {
        Some(name) => {
            let spoken_dob = match non_blank(&request.subscriber_dob) {
                Some(dob) => spoken_date(&dob)?,
                None => String::new(),
            };
            Some(SubscriberIdentity { name, spoken_dob })
        }
        None => None,
    };

    Ok(PreparedCall {
        patient: PatientIdentity { name: patient_name, spoken_dob, member_id },
        insurance_carrier,
        phone_number,
        subscriber,
    })
}

/// Normalize a US phone number to E.164.
///
/// Every non-digit is dropped. Ten digits get a `+1` prefix; eleven digits
/// starting with `1` get a `+` prefix. Anything else is rejected.
pub fn normalize_phone_number(input: &str) -> DentacallResult<String> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => Ok(format!("+1{digits}")),
        11 if digits.starts_with('1') => Ok(format!("+{digits}")),
        _ => Err(DentacallError::InvalidPhoneNumber { input: input.to_string() }),
    }
}

/// Convert an ISO `YYYY-MM-DD` date to its spoken form, e.g.
/// `"1990-01-05"` → `"January 5, 1990"`.
pub fn spoken_date(iso: &str) -> DentacallResult<String> {
    let date = NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d").map_err(|e| {
        DentacallError::InvalidDate { input: iso.to_string(), reason: e.to_string() }
    })?;
    Ok(date.format("%B %-d, %Y").to_string())
}

fn required(field: &str, value: &Option<String>) -> DentacallResult<String> {
    non_blank(value).ok_or_else(|| DentacallError::MissingField { field: field.to_string() })
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
