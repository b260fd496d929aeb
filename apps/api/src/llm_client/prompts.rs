// Prompt constants and builders for the follow-up email generation call.

use crate::engine::profile::LeadProfile;

/// System prompt framing the model as the Solisa SDR.
pub const FOLLOW_UP_SYSTEM: &str = "You are an SDR for Solisa Insurance. \
    Write empathetic, data-backed follow-ups that cite renewal savings and next steps.";

/// User prompt carrying the full prospect profile and the objection to close.
pub fn build_follow_up_prompt(lead: &LeadProfile, objection: &str) -> String {
    let lead_json = serde_json::to_string(lead).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Prospect details: {lead_json}. They objected with: {objection}. \
        Compose an email that closes the objection and reinforces the Calendly CTA."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::profile::default_lead;

    #[test]
    fn test_prompt_embeds_profile_and_objection() {
        let prompt = build_follow_up_prompt(&default_lead(), "Too expensive");
        assert!(prompt.contains("\"name\":\"Alex Johnson\""));
        assert!(prompt.contains("They objected with: Too expensive."));
        assert!(prompt.contains("Calendly CTA"));
    }
}
