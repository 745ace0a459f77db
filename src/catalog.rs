//! Static industry catalog and the messages built from it
//!
//! The catalog is a fixed table of seven growing industries. It seeds the
//! conversation with an introductory assistant message and backs the
//! industry cards and detail views in the terminal front end.

use serde::Serialize;
use std::fmt::Write as _;

/// One static catalog entry describing an industry and its growth outlook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndustryRecord {
    /// Industry name, e.g. "Technology"
    pub name: &'static str,
    /// Human-readable growth estimate, e.g. "5-10% annually"
    pub growth_estimate: &'static str,
    /// Card icon
    pub icon: &'static str,
    /// Short description shown in the detail view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    /// Skills in demand, in display order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_skills: Option<&'static [&'static str]>,
    /// Suggested subjects of study, in display order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<&'static [&'static str]>,
}

static INDUSTRIES: [IndustryRecord; 7] = [
    IndustryRecord {
        name: "Technology",
        growth_estimate: "5-10% annually",
        icon: "💻",
        description: Some(
            "Software, cloud infrastructure, AI and cybersecurity continue to drive demand across every sector.",
        ),
        key_skills: Some(&["Programming", "Cloud computing", "Data analysis", "Cybersecurity"]),
        subjects: Some(&["Computer Science", "Mathematics", "Information Systems"]),
    },
    IndustryRecord {
        name: "Healthcare",
        growth_estimate: "7-10% annually",
        icon: "🏥",
        description: Some(
            "An ageing population and new treatments keep clinical and health-tech roles in high demand.",
        ),
        key_skills: Some(&["Patient care", "Clinical research", "Health informatics"]),
        subjects: Some(&["Biology", "Chemistry", "Nursing", "Public Health"]),
    },
    IndustryRecord {
        name: "Renewable Energy",
        growth_estimate: "8-12% annually",
        icon: "🌱",
        description: Some(
            "Solar, wind and storage build-outs create engineering, installation and policy careers.",
        ),
        key_skills: Some(&["Electrical engineering", "Project management", "Energy modelling"]),
        subjects: Some(&["Physics", "Environmental Science", "Engineering"]),
    },
    IndustryRecord {
        name: "E-commerce",
        growth_estimate: "6-9% annually",
        icon: "🛒",
        description: Some(
            "Online retail keeps expanding, pulling in marketing, product and fulfilment talent.",
        ),
        key_skills: Some(&["Digital marketing", "UX design", "Data analytics"]),
        subjects: Some(&["Business Studies", "Marketing", "Computer Science"]),
    },
    IndustryRecord {
        name: "Finance & Fintech",
        growth_estimate: "6-8% annually",
        icon: "💰",
        description: Some(
            "Digital payments, lending platforms and regulation technology reshape financial services.",
        ),
        key_skills: Some(&["Financial analysis", "Risk management", "Software development"]),
        subjects: Some(&["Economics", "Accounting", "Mathematics"]),
    },
    IndustryRecord {
        name: "Education Technology (EdTech)",
        growth_estimate: "15% annually",
        icon: "🎓",
        description: Some(
            "Online learning platforms and classroom tools need educators who can build and teach with technology.",
        ),
        key_skills: Some(&["Instructional design", "Content creation", "Learning analytics"]),
        subjects: Some(&["Education", "Psychology", "Computer Science"]),
    },
    IndustryRecord {
        name: "Logistics & Supply Chain",
        growth_estimate: "4-8% annually",
        icon: "🚚",
        description: Some(
            "Global trade and same-day delivery depend on planners, analysts and operations managers.",
        ),
        key_skills: Some(&["Operations planning", "Inventory management", "Negotiation"]),
        subjects: Some(&["Business Studies", "Geography", "Statistics"]),
    },
];

/// Return the fixed industry catalog in display order
///
/// # Examples
///
/// ```
/// use careerbot::catalog::list_industries;
///
/// let industries = list_industries();
/// assert_eq!(industries.len(), 7);
/// assert_eq!(industries[0].name, "Technology");
/// ```
pub fn list_industries() -> &'static [IndustryRecord] {
    &INDUSTRIES
}

/// Fixed first line of the intro message, followed by a blank line
pub const INTRO_HEADER: &str = "Here are 7 growing industries along with their estimated growth:\n\n";

/// Build the introductory assistant message summarizing `records`
///
/// The header is [`INTRO_HEADER`] whatever the input; each record contributes
/// one numbered line in input order.
///
/// # Examples
///
/// ```
/// use careerbot::catalog::{build_intro_message, list_industries};
///
/// let intro = build_intro_message(list_industries());
/// assert!(intro.starts_with("Here are 7 growing industries"));
/// assert!(intro.contains("1. **Technology** - Estimated Growth: 5-10% annually"));
/// ```
pub fn build_intro_message(records: &[IndustryRecord]) -> String {
    let mut message = String::from(INTRO_HEADER);
    for (idx, record) in records.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(
            message,
            "{}. **{}** - Estimated Growth: {}",
            idx + 1,
            record.name,
            record.growth_estimate
        );
    }
    message
}

/// Build the detail view shown when a single industry card is opened
pub fn build_detail_message(record: &IndustryRecord) -> String {
    let mut message = format!(
        "{} **{}**\n\nEstimated Growth: {}\n",
        record.icon, record.name, record.growth_estimate
    );
    if let Some(description) = record.description {
        let _ = write!(message, "\n{}\n", description);
    }
    if let Some(skills) = record.key_skills {
        let _ = write!(message, "\nKey skills: {}\n", skills.join(", "));
    }
    if let Some(subjects) = record.subjects {
        let _ = write!(message, "\nSubjects to study: {}\n", subjects.join(", "));
    }
    message
}

/// Look up an industry by 1-based index or case-insensitive name
///
/// # Examples
///
/// ```
/// use careerbot::catalog::find_industry;
///
/// assert_eq!(find_industry("2").unwrap().name, "Healthcare");
/// assert_eq!(find_industry("renewable energy").unwrap().icon, "🌱");
/// assert!(find_industry("8").is_none());
/// ```
pub fn find_industry(query: &str) -> Option<&'static IndustryRecord> {
    let query = query.trim();
    if let Ok(index) = query.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| INDUSTRIES.get(i));
    }
    INDUSTRIES
        .iter()
        .find(|record| record.name.eq_ignore_ascii_case(query))
}
