//! Fixed vocabularies consulted by the keyword locators. Order matters:
//! earlier entries win ties.

use crate::postings::domain::{JobType, Location};

/// Region names in tie-break order.
pub const REGIONS: &[(&str, Location)] = &[
    ("Port Louis", Location::PortLouis),
    ("Plaine Wilhems", Location::PlaineWilhems),
    ("Pamplemousses", Location::Pamplemousses),
    ("Black River", Location::BlackRiver),
    ("Moka", Location::Moka),
    ("Flacq", Location::Flacq),
    ("Riviere du Rempart", Location::RiviereDuRempart),
    ("Grand Port", Location::GrandPort),
    ("Savanne", Location::Savanne),
    ("Mauritius", Location::Mauritius),
    ("Rodrigues", Location::Rodrigues),
];

/// Keyword families for employment type, highest priority first.
pub const JOB_TYPE_RULES: &[(&[&str], JobType)] = &[
    (&["PERMANENT", "CDI"], JobType::Permanent),
    (&["CONTRACT", "TEMPORARY"], JobType::ContractTemporary),
    (&["TRAINEE", "INTERNSHIP"], JobType::Trainee),
    (&["PART-TIME"], JobType::PartTime),
];

/// Lower-case skill phrases matched as plain substrings.
pub const SKILL_PHRASES: &[&str] = &[
    "excel",
    "word",
    "powerpoint",
    "microsoft office",
    "communication",
    "teamwork",
    "leadership",
    "project management",
    "customer service",
    "sales",
    "marketing",
    "accounting",
    "finance",
    "hr",
    "recruitment",
    "french",
    "english",
    "bilingual",
    "computer",
    "software",
    "it",
    "networking",
    "programming",
    "database",
    "analysis",
    "problem solving",
    "time management",
    "organization",
    "planning",
    "research",
    "writing",
];

/// Title keywords used to estimate pay for postings without a salary.
pub const SENIOR_TITLE_KEYWORDS: &[&str] = &["manager", "senior", "lead", "head", "director", "chief"];
pub const MID_TITLE_KEYWORDS: &[&str] = &["engineer", "specialist", "officer", "coordinator", "analyst"];
