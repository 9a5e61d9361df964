//! The static benefit field table.
//!
//! Every benefit the call system has ever produced is listed here exactly
//! once, under its canonical dotted path. Each entry carries the names the
//! same fact has gone by in earlier payload and document generations.
//!
//! Alias lists are ordered newest generation first. Resolution walks them in
//! order, so the list order *is* the precedence order.

use dentacall_contracts::benefits::{FieldKind, SchemaGeneration};

/// A historical name for a benefit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alias {
    /// Dotted path inside the payload or stored document. Flat payload names
    /// are single-segment paths.
    pub path: &'static str,
    pub generation: SchemaGeneration,
}

/// One canonical benefit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitField {
    /// Canonical dotted path; the first segment is the category key.
    pub path: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    /// Newest generation first.
    pub aliases: &'static [Alias],
}

impl BenefitField {
    /// The category key, i.e. the first path segment.
    pub fn category(&self) -> &'static str {
        self.path.split('.').next().unwrap_or(self.path)
    }
}

/// A top-level grouping of the benefits document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub title: &'static str,
}

/// A verification-level field the call may also capture (patient identity,
/// representative attribution). These never enter the benefits document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordField {
    /// Verification property name, e.g. `"memberId"`.
    pub key: &'static str,
    pub label: &'static str,
    /// Flat structured-output names, newest generation first.
    pub aliases: &'static [Alias],
}

const fn flat_v1(path: &'static str) -> Alias {
    Alias { path, generation: SchemaGeneration::FlatV1 }
}

const fn doc_v1(path: &'static str) -> Alias {
    Alias { path, generation: SchemaGeneration::DocumentV1 }
}

const fn doc_v2(path: &'static str) -> Alias {
    Alias { path, generation: SchemaGeneration::DocumentV2 }
}

const fn flat_v2(path: &'static str) -> Alias {
    Alias { path, generation: SchemaGeneration::FlatV2 }
}

const fn field(
    path: &'static str,
    kind: FieldKind,
    label: &'static str,
    aliases: &'static [Alias],
) -> BenefitField {
    BenefitField { path, kind, label, aliases }
}

use FieldKind::{Boolean, BooleanOrNumber, Number, Text, TextList};

// ── Categories ───────────────────────────────────────────────────────────────

pub(crate) static CATEGORIES: &[Category] = &[
    Category { key: "eligibility", title: "Eligibility" },
    Category { key: "plan", title: "Plan" },
    Category { key: "subscriber", title: "Subscriber" },
    Category { key: "maximums", title: "Maximums" },
    Category { key: "deductible", title: "Deductible" },
    Category { key: "ortho", title: "Orthodontics" },
    Category { key: "waitingPeriods", title: "Waiting Periods" },
    Category { key: "clauses", title: "Clauses & Downgrades" },
    Category { key: "coverage", title: "Coverage" },
    Category { key: "diagnosticCodes", title: "Diagnostic" },
    Category { key: "preventiveCodes", title: "Preventive" },
    Category { key: "extractionCodes", title: "Extractions" },
    Category { key: "periodonticsCodes", title: "Periodontics" },
    Category { key: "majorCodes", title: "Major" },
    Category { key: "implants", title: "Implants" },
    Category { key: "occlusalGuard", title: "Occlusal Guard" },
    Category { key: "notes", title: "Notes" },
    Category { key: "portalOnlyFields", title: "Portal-Only Fields" },
];

// ── Benefit fields ───────────────────────────────────────────────────────────

pub(crate) static BENEFIT_FIELDS: &[BenefitField] = &[
    // eligibility
    field(
        "eligibility.eligible",
        Boolean,
        "Patient eligible",
        &[doc_v1("eligible"), flat_v1("patient_eligible")],
    ),
    field(
        "eligibility.effectiveDate",
        Text,
        "Effective date",
        &[doc_v1("effectiveDate"), flat_v1("effective_date")],
    ),
    field(
        "eligibility.inNetwork",
        Boolean,
        "In network",
        &[flat_v2("in_network"), doc_v2("inNetwork")],
    ),
    // plan
    field("plan.type", Text, "Plan type", &[doc_v1("planType"), flat_v1("plan_type")]),
    field(
        "plan.benefitYear",
        Text,
        "Benefit year",
        &[doc_v1("benefitYear"), flat_v1("benefit_year")],
    ),
    field(
        "plan.feeSchedule",
        Text,
        "Fee schedule",
        &[flat_v2("fee_schedule"), doc_v2("feeSchedule")],
    ),
    field(
        "plan.groupName",
        Text,
        "Plan / group name",
        &[flat_v2("plan_group_name"), doc_v2("planGroupName")],
    ),
    field(
        "plan.groupNumber",
        Text,
        "Group number",
        &[flat_v2("group_number"), doc_v2("groupNumber")],
    ),
    field("plan.payorId", Text, "Payor ID", &[flat_v2("payor_id"), doc_v2("payorId")]),
    field(
        "plan.claimsMailingAddress",
        Text,
        "Claims mailing address",
        &[flat_v2("claims_mailing_address"), doc_v2("claimsMailingAddress")],
    ),
    // subscriber
    field("subscriber.id", Text, "Subscriber ID", &[flat_v2("subscriber_id")]),
    field(
        "subscriber.name",
        Text,
        "Subscriber name",
        &[flat_v2("subscriber_name"), doc_v2("subscriberName")],
    ),
    field(
        "subscriber.dob",
        Text,
        "Subscriber DOB",
        &[flat_v2("subscriber_dob"), doc_v2("subscriberDOB")],
    ),
    field(
        "subscriber.relationship",
        Text,
        "Relationship to subscriber",
        &[flat_v2("relationship_to_subscriber"), doc_v2("relationshipToSubscriber")],
    ),
    // maximums
    field(
        "maximums.annual",
        Number,
        "Annual maximum",
        &[doc_v1("annualMaximum"), flat_v1("annual_maximum")],
    ),
    field(
        "maximums.used",
        Number,
        "Maximum used",
        &[flat_v2("maximum_used"), doc_v2("maximumUsed")],
    ),
    field(
        "maximums.remaining",
        Number,
        "Remaining maximum",
        &[
            flat_v2("maximum_remaining"),
            doc_v1("remainingMaximum"),
            flat_v1("remaining_maximum"),
        ],
    ),
    field(
        "maximums.appliesTo",
        Text,
        "Maximum applies to",
        &[flat_v2("maximum_applies_to"), doc_v2("maximumAppliesTo")],
    ),
    // deductible
    field("deductible.amount", Number, "Deductible", &[flat_v1("deductible")]),
    field(
        "deductible.met",
        BooleanOrNumber,
        "Deductible met",
        &[doc_v1("deductibleMet"), flat_v1("deductible_met")],
    ),
    field(
        "deductible.amountMet",
        Number,
        "Deductible amount met",
        &[flat_v2("deductible_amount_met"), doc_v2("deductibleAmountMet")],
    ),
    field(
        "deductible.appliesTo",
        Text,
        "Deductible applies to",
        &[flat_v2("deductible_applies_to"), doc_v2("deductibleAppliesTo")],
    ),
    // ortho
    field(
        "ortho.maximum",
        Number,
        "Ortho lifetime maximum",
        &[flat_v2("ortho_maximum"), doc_v2("orthoMaximum")],
    ),
    field(
        "ortho.maximumUsed",
        Number,
        "Ortho maximum used",
        &[flat_v2("ortho_maximum_used"), doc_v2("orthoMaximumUsed")],
    ),
    // waiting periods
    field(
        "waitingPeriods.preventive",
        Text,
        "Preventive waiting period",
        &[flat_v2("waiting_period_preventive")],
    ),
    field(
        "waitingPeriods.basic",
        Text,
        "Basic waiting period",
        &[flat_v2("waiting_period_basic")],
    ),
    field(
        "waitingPeriods.major",
        Text,
        "Major waiting period",
        &[flat_v2("waiting_period_major")],
    ),
    field(
        "waitingPeriods.summary",
        Text,
        "Waiting periods",
        &[doc_v1("waitingPeriods"), flat_v1("waiting_periods")],
    ),
    // clauses
    field(
        "clauses.missingTooth",
        Boolean,
        "Missing tooth clause",
        &[flat_v2("missing_tooth_clause"), doc_v2("missingToothClause")],
    ),
    field(
        "clauses.downgradeFillings",
        Boolean,
        "Downgrades posterior fillings",
        &[flat_v2("downgrade_fillings")],
    ),
    field(
        "clauses.downgradeCrowns",
        Boolean,
        "Downgrades crowns",
        &[flat_v2("downgrade_crowns")],
    ),
    // coverage
    field("coverage.diagnostic", Number, "Diagnostic", &[flat_v2("coverage_diagnostic")]),
    field(
        "coverage.preventive",
        Number,
        "Preventive",
        &[flat_v2("coverage_preventive"), flat_v1("preventive_coverage")],
    ),
    field(
        "coverage.basic",
        Number,
        "Basic",
        &[flat_v2("coverage_basic"), flat_v1("basic_coverage")],
    ),
    field(
        "coverage.major",
        Number,
        "Major",
        &[flat_v2("coverage_major"), flat_v1("major_coverage")],
    ),
    field("coverage.endodontics", Number, "Endodontics", &[flat_v2("coverage_endodontics")]),
    field(
        "coverage.periodontics",
        Number,
        "Periodontics",
        &[flat_v2("coverage_periodontics")],
    ),
    field("coverage.extractions", Number, "Extractions", &[flat_v2("coverage_extractions")]),
    // diagnostic codes
    field(
        "diagnosticCodes.bwx.frequency",
        Text,
        "Bitewings (BWX) frequency",
        &[flat_v2("frequency_bwx"), doc_v1("frequencies.bwx"), flat_v1("bwx_frequency")],
    ),
    field(
        "diagnosticCodes.bwx.history",
        Text,
        "Bitewings (BWX) last done",
        &[flat_v2("history_bwx"), doc_v2("history.bwx")],
    ),
    field(
        "diagnosticCodes.pano.frequency",
        Text,
        "Panoramic frequency",
        &[flat_v2("frequency_pano"), doc_v1("frequencies.pano"), flat_v1("pano_frequency")],
    ),
    field(
        "diagnosticCodes.pano.history",
        Text,
        "Panoramic last done",
        &[flat_v2("history_pano"), doc_v2("history.pano")],
    ),
    field(
        "diagnosticCodes.fmx.frequency",
        Text,
        "Full mouth X-ray (FMX) frequency",
        &[flat_v2("frequency_fmx"), doc_v2("frequencies.fmx")],
    ),
    field(
        "diagnosticCodes.fmx.history",
        Text,
        "Full mouth X-ray (FMX) last done",
        &[flat_v2("history_fmx"), doc_v2("history.fmx")],
    ),
    field(
        "diagnosticCodes.d0150.frequency",
        Text,
        "Comprehensive exam (D0150) frequency",
        &[flat_v2("frequency_d0150")],
    ),
    field(
        "diagnosticCodes.d0150.history",
        Text,
        "Comprehensive exam (D0150) last done",
        &[flat_v2("history_d0150")],
    ),
    field(
        "diagnosticCodes.d0120.frequency",
        Text,
        "Periodic exam (D0120) frequency",
        &[flat_v2("frequency_d0120")],
    ),
    field(
        "diagnosticCodes.d0120.history",
        Text,
        "Periodic exam (D0120) last done",
        &[flat_v2("history_d0120")],
    ),
    field(
        "diagnosticCodes.d0140.frequency",
        Text,
        "Limited exam (D0140) frequency",
        &[flat_v2("frequency_d0140")],
    ),
    field(
        "diagnosticCodes.d0140.history",
        Text,
        "Limited exam (D0140) last done",
        &[flat_v2("history_d0140")],
    ),
    field(
        "diagnosticCodes.exams.frequency",
        Text,
        "Exams frequency",
        &[doc_v2("frequencies.exams")],
    ),
    field("diagnosticCodes.exams.history", Text, "Exams last done", &[doc_v2("history.exams")]),
    field(
        "diagnosticCodes.examsShareFrequency",
        Boolean,
        "Comprehensive and periodic exams share frequency",
        &[flat_v2("exams_share_frequency"), doc_v2("frequencies.examsShareFrequency")],
    ),
    // preventive codes
    field(
        "preventiveCodes.d1110.frequency",
        Text,
        "Prophy (D1110) frequency",
        &[flat_v2("frequency_d1110"), doc_v1("frequencies.prophy"), flat_v1("prophy_frequency")],
    ),
    field(
        "preventiveCodes.d1110.history",
        Text,
        "Prophy (D1110) last done",
        &[flat_v2("history_d1110"), doc_v2("history.prophy")],
    ),
    field(
        "preventiveCodes.d4346.coverage",
        Number,
        "Gingival inflammation scaling (D4346) coverage",
        &[flat_v2("coverage_d4346"), doc_v2("specificCodes.d4346Coverage")],
    ),
    field(
        "preventiveCodes.d4346.frequency",
        Text,
        "Gingival inflammation scaling (D4346) frequency",
        &[flat_v2("frequency_d4346"), doc_v2("frequencies.d4346")],
    ),
    field(
        "preventiveCodes.d4346.sharesWithD1110",
        Boolean,
        "D4346 shares frequency with D1110",
        &[flat_v2("d4346_shares_with_d1110"), doc_v2("specificCodes.d4346SharesWithD1110")],
    ),
    field(
        "preventiveCodes.fluoride.covered",
        Boolean,
        "Fluoride covered",
        &[flat_v2("fluoride_covered"), doc_v2("fluoride.covered")],
    ),
    field(
        "preventiveCodes.fluoride.ageLimit",
        Text,
        "Fluoride age limit",
        &[flat_v2("fluoride_age_limit"), doc_v2("fluoride.ageLimit")],
    ),
    // extraction codes
    field(
        "extractionCodes.d7210.coverage",
        Number,
        "Surgical extraction (D7210) coverage",
        &[flat_v2("coverage_d7210"), doc_v2("specificCodes.d7210Coverage")],
    ),
    field(
        "extractionCodes.d7140.coverage",
        Number,
        "Simple extraction (D7140) coverage",
        &[flat_v2("coverage_d7140"), doc_v2("specificCodes.d7140Coverage")],
    ),
    // periodontics codes
    field(
        "periodonticsCodes.d4910.coverage",
        Number,
        "Perio maintenance (D4910) coverage",
        &[flat_v2("coverage_d4910"), doc_v2("specificCodes.d4910Coverage")],
    ),
    field(
        "periodonticsCodes.d4910.frequency",
        Text,
        "Perio maintenance (D4910) frequency",
        &[flat_v2("frequency_d4910"), doc_v2("frequencies.d4910")],
    ),
    field(
        "periodonticsCodes.d4341.frequency",
        Text,
        "SRP 4+ teeth (D4341) frequency",
        &[flat_v2("frequency_d4341"), doc_v2("frequencies.srp")],
    ),
    field(
        "periodonticsCodes.d4341.history",
        Text,
        "SRP 4+ teeth (D4341) last done",
        &[flat_v2("history_d4341")],
    ),
    field(
        "periodonticsCodes.d4342.frequency",
        Text,
        "SRP 1-3 teeth (D4342) frequency",
        &[flat_v2("frequency_d4342")],
    ),
    field(
        "periodonticsCodes.d4342.history",
        Text,
        "SRP 1-3 teeth (D4342) last done",
        &[flat_v2("history_d4342")],
    ),
    // major codes
    field(
        "majorCodes.crowns.frequency",
        Text,
        "Crowns frequency",
        &[flat_v2("frequency_crowns"), doc_v2("frequencies.crowns")],
    ),
    field("majorCodes.crowns.covered", Boolean, "Crowns covered", &[doc_v2("crowns.covered")]),
    field("majorCodes.crowns.coverage", Number, "Crowns coverage", &[doc_v2("crowns.coverage")]),
    // implants
    field("implants.covered", Boolean, "Implants covered", &[flat_v2("implants_covered")]),
    field("implants.coverage", Number, "Implants coverage", &[]),
    field(
        "implants.d6010.coverage",
        Number,
        "Implant body (D6010) coverage",
        &[flat_v2("coverage_d6010")],
    ),
    field(
        "implants.d6057.coverage",
        Number,
        "Custom abutment (D6057) coverage",
        &[flat_v2("coverage_d6057")],
    ),
    field(
        "implants.d6058.coverage",
        Number,
        "Implant crown (D6058) coverage",
        &[flat_v2("coverage_d6058")],
    ),
    // occlusal guard
    field(
        "occlusalGuard.covered",
        Boolean,
        "Occlusal guard covered",
        &[flat_v2("occlusal_guard_covered")],
    ),
    field(
        "occlusalGuard.coverage",
        Number,
        "Occlusal guard coverage",
        &[flat_v2("occlusal_guard_coverage")],
    ),
    // free text
    field("notes", Text, "Notes", &[]),
    field(
        "portalOnlyFields",
        TextList,
        "Portal-only fields",
        &[flat_v2("portal_only_fields")],
    ),
];

// ── Record fields ────────────────────────────────────────────────────────────

pub(crate) static RECORD_FIELDS: &[RecordField] = &[
    RecordField { key: "patientName", label: "Patient name", aliases: &[flat_v1("patient_name")] },
    RecordField { key: "patientDOB", label: "Patient DOB", aliases: &[flat_v1("patient_dob")] },
    RecordField { key: "memberId", label: "Member ID", aliases: &[flat_v1("member_id")] },
    RecordField {
        key: "insuranceCarrier",
        label: "Insurance carrier",
        aliases: &[flat_v2("insurance_company"), flat_v1("insurance_carrier")],
    },
    RecordField {
        key: "referenceNumber",
        label: "Call reference",
        aliases: &[flat_v2("call_reference"), flat_v1("reference_number")],
    },
    RecordField { key: "repName", label: "Representative", aliases: &[flat_v1("rep_name")] },
];
