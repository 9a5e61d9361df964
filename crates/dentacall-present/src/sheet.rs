//! Plain-text insurance breakdown sheet.

use std::fmt::Write as _;

use dentacall_contracts::benefits::FieldValue;

use crate::view::{Captured, FieldView, VerificationView};

const NOT_CAPTURED: &str = "Not captured";
const LABEL_WIDTH: usize = 48;

/// Render the breakdown sheet front-desk staff print or paste into the
/// practice management system.
pub fn render_sheet(view: &VerificationView) -> String {
    let mut out = String::new();

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "INSURANCE BREAKDOWN");
    let _ = writeln!(out, "===================");
    header_line(&mut out, "Patient", &view.patient_name);
    header_line(&mut out, "DOB", &view.patient_dob);
    header_line(&mut out, "Member ID", &view.member_id);
    header_line(&mut out, "Carrier", &view.insurance_carrier);
    header_line(&mut out, "Status", view.status.as_str());
    header_line(&mut out, "Reference #", opt(&view.reference_number));
    header_line(&mut out, "Representative", opt(&view.rep_name));
    header_line(&mut out, "Call duration", opt(&view.call_duration));
    header_line(&mut out, "Call ID", opt(&view.call_id));
    header_line(&mut out, "Recording", opt(&view.recording_url));

    if view.benefits_unreadable {
        let _ = writeln!(out);
        let _ = writeln!(out, "Stored benefits could not be read.");
    }

    for category in &view.categories {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", category.title);
        for field in &category.fields {
            let _ = writeln!(
                out,
                "  {:<width$}{}",
                field.label,
                display_field(field),
                width = LABEL_WIDTH
            );
        }
    }

    if let Some(transcript) = view.transcript.as_deref().filter(|t| !t.trim().is_empty()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Call Transcript");
        for line in transcript.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }

    out
}

fn header_line(out: &mut String, label: &str, value: &str) {
    let shown = if value.trim().is_empty() { NOT_CAPTURED } else { value };
    let _ = writeln!(out, "{:<16}{}", format!("{}:", label), shown);
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Format one field value for the sheet.
pub fn display_field(field: &FieldView) -> String {
    let value = match &field.captured {
        Captured::Value(v) => v,
        Captured::NotCaptured => return NOT_CAPTURED.to_string(),
    };

    if field.path == "deductible.met" {
        return match value {
            FieldValue::Boolean(true) => "Met".to_string(),
            FieldValue::Boolean(false) => "Not met".to_string(),
            FieldValue::Number(n) => format!("{} met", money(n.as_f64().unwrap_or(0.0))),
            other => display_value(field.path, other),
        };
    }
    display_value(field.path, value)
}

fn display_value(path: &str, value: &FieldValue) -> String {
    match value {
        FieldValue::Boolean(true) => "Yes".to_string(),
        FieldValue::Boolean(false) => "No".to_string(),
        FieldValue::Number(n) => {
            let n = n.as_f64().unwrap_or(0.0);
            if is_percentage(path) {
                percent(n)
            } else {
                money(n)
            }
        }
        FieldValue::Text(s) if s.trim().is_empty() => "(blank)".to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::TextList(items) if items.is_empty() => "(none)".to_string(),
        FieldValue::TextList(items) => items.join(", "),
    }
}

/// Coverage fields hold percentages; every other number is a dollar amount.
fn is_percentage(path: &str) -> bool {
    path.starts_with("coverage.") || path.ends_with(".coverage")
}

fn percent(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}%", n as i64)
    } else {
        format!("{}%", n)
    }
}

/// `1500` → `$1,500`, `62.5` → `$62.50`.
pub fn money(n: f64) -> String {
    let cents = (n.abs() * 100.0).round() as u64;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if n < 0.0 && cents > 0 { "-" } else { "" };
    if frac == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, frac)
    }
}
