//! Lead profile vocabulary — the catalogs behind the demo form, the seeded
//! default prospect, and renewal-month normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const COMMUNICATION_CHANNELS: [&str; 2] = ["SMS", "Email"];

pub const LIFE_EVENTS: [&str; 5] = [
    "New baby",
    "New home purchase",
    "Teen driver added",
    "Job change",
    "New car lease",
];

pub const INSURERS: [&str; 5] = [
    "State Farm",
    "Geico",
    "Progressive",
    "Allstate",
    "Liberty Mutual",
];

pub const PAIN_POINTS: [&str; 5] = [
    "Premiums spiked 18% at renewal",
    "Agent never follows up",
    "Coverage gaps for new assets",
    "Claims experience was slow",
    "Bundle discounts not applied",
];

pub const PERSONA_TONES: [&str; 4] = [
    "Warm & concise",
    "Direct & data-backed",
    "Playful & upbeat",
    "Executive brief",
];

const DEFAULT_RENEWAL_MONTH: &str = "2025-02";

/// The two channels a prospect can ask to be contacted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferredChannel {
    #[serde(rename = "SMS")]
    Sms,
    Email,
}

impl PreferredChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredChannel::Sms => "SMS",
            PreferredChannel::Email => "Email",
        }
    }

    /// Strict match against the catalog values — anything else is rejected
    /// at validation time.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SMS" => Some(PreferredChannel::Sms),
            "Email" => Some(PreferredChannel::Email),
            _ => None,
        }
    }
}

/// A prospect profile as captured by the demo form. Wire format is camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadProfile {
    pub name: String,
    pub company: String,
    pub source: String,
    pub preferred_channel: PreferredChannel,
    pub persona_tone: String,
    pub life_event: String,
    pub insurer: String,
    pub renewal_month: String,
    pub pain_point: String,
}

impl LeadProfile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// The prospect the demo seeds the form with.
pub fn default_lead() -> LeadProfile {
    LeadProfile {
        name: "Alex Johnson".to_string(),
        company: "Solisa Prospects".to_string(),
        source: "Website form".to_string(),
        preferred_channel: PreferredChannel::Sms,
        persona_tone: "Warm & concise".to_string(),
        life_event: "New baby".to_string(),
        insurer: "State Farm".to_string(),
        renewal_month: DEFAULT_RENEWAL_MONTH.to_string(),
        pain_point: "Premiums spiked 18% at renewal".to_string(),
    }
}

/// Renders a `YYYY-MM` renewal month as "February 2025". Empty or
/// unparsable input yields the generic "their next renewal window".
pub fn format_renewal(renewal_month: &str) -> String {
    const FALLBACK: &str = "their next renewal window";

    let mut parts = renewal_month.split('-');
    let year = parts.next().and_then(|p| p.parse::<u32>().ok());
    let month = parts.next().and_then(|p| p.parse::<u32>().ok());

    match (year, month) {
        (Some(year), Some(month)) if year > 0 && month > 0 => {
            match NaiveDate::from_ymd_opt(year as i32, month, 1) {
                Some(date) => date.format("%B %Y").to_string(),
                None => FALLBACK.to_string(),
            }
        }
        _ => FALLBACK.to_string(),
    }
}

/// Normalizes form input to a zero-padded `YYYY-MM`. Blank, malformed, and
/// out-of-range months fall back to the default lead's renewal month.
pub fn sanitize_renewal_month(value: &str) -> String {
    if value.is_empty() {
        return DEFAULT_RENEWAL_MONTH.to_string();
    }

    let mut parts = value.split('-');
    let year = parts.next().and_then(|p| p.parse::<u32>().ok());
    let month = parts.next().and_then(|p| p.parse::<u32>().ok());

    match (year, month) {
        (Some(year), Some(month)) if (1..=12).contains(&month) => {
            format!("{year:04}-{month:02}")
        }
        _ => DEFAULT_RENEWAL_MONTH.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_renewal_long_month() {
        assert_eq!(format_renewal("2025-02"), "February 2025");
        assert_eq!(format_renewal("2026-11"), "November 2026");
    }

    #[test]
    fn test_format_renewal_empty_falls_back() {
        assert_eq!(format_renewal(""), "their next renewal window");
    }

    #[test]
    fn test_format_renewal_missing_month_falls_back() {
        assert_eq!(format_renewal("2025"), "their next renewal window");
    }

    #[test]
    fn test_format_renewal_garbage_falls_back() {
        assert_eq!(format_renewal("soon-ish"), "their next renewal window");
    }

    #[test]
    fn test_sanitize_pads_single_digit_month() {
        assert_eq!(sanitize_renewal_month("2026-7"), "2026-07");
    }

    #[test]
    fn test_sanitize_keeps_valid_input() {
        assert_eq!(sanitize_renewal_month("2026-12"), "2026-12");
    }

    #[test]
    fn test_sanitize_rejects_month_out_of_range() {
        assert_eq!(sanitize_renewal_month("2026-13"), "2025-02");
        assert_eq!(sanitize_renewal_month("2026-0"), "2025-02");
    }

    #[test]
    fn test_sanitize_rejects_blank_and_garbage() {
        assert_eq!(sanitize_renewal_month(""), "2025-02");
        assert_eq!(sanitize_renewal_month("next spring"), "2025-02");
        assert_eq!(sanitize_renewal_month("2026"), "2025-02");
    }

    #[test]
    fn test_first_name_takes_leading_token() {
        let lead = default_lead();
        assert_eq!(lead.first_name(), "Alex");
    }

    #[test]
    fn test_first_name_of_single_token_name() {
        let mut lead = default_lead();
        lead.name = "Cher".to_string();
        assert_eq!(lead.first_name(), "Cher");
    }

    #[test]
    fn test_preferred_channel_parse_is_strict() {
        assert_eq!(PreferredChannel::parse("SMS"), Some(PreferredChannel::Sms));
        assert_eq!(
            PreferredChannel::parse("Email"),
            Some(PreferredChannel::Email)
        );
        assert_eq!(PreferredChannel::parse("sms"), None);
        assert_eq!(PreferredChannel::parse("Phone"), None);
    }

    #[test]
    fn test_lead_profile_wire_format_is_camel_case() {
        let json = serde_json::to_value(default_lead()).unwrap();
        assert!(json.get("preferredChannel").is_some());
        assert!(json.get("personaTone").is_some());
        assert!(json.get("renewalMonth").is_some());
        assert_eq!(json["preferredChannel"], "SMS");
    }
}
