// The Agentic Engine content core.
// Implements: lead profile vocabulary, outreach composition, follow-up
// objection handling, retention plays. All upstream API calls go through
// compose_client / llm_client — no direct HTTP from here.

pub mod followup;
pub mod outreach;
pub mod profile;
pub mod retention;
