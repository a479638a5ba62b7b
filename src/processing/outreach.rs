//! Outreach message rendering

use crate::config::OutreachConfig;
use crate::processing::text_processor::SENTINEL;

pub struct MessageBuilder {
    config: OutreachConfig,
}

impl MessageBuilder {
    pub fn new(config: OutreachConfig) -> Self {
        Self { config }
    }

    /// First token of the name, or "there" when the name is unknown.
    pub fn first_name(name: &str) -> &str {
        match name.split_whitespace().next() {
            Some(first) if first != SENTINEL => first,
            _ => "there",
        }
    }

    pub fn build(&self, name: &str, role_title: Option<&str>) -> String {
        let role = role_title
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.config.default_role_title);

        format!(
            "Hi {first_name}, this is {recruiter} from {agency}.\n\n\
             I'm reaching out regarding an opportunity for {role}. \
             Your background looks relevant, and I'd like to check your interest and availability.\n\n\
             Could you please reply with:\n\
             1. Your Current CTC (fixed + variable)\n\
             2. Your Expected CTC\n\
             3. Your Notice Period\n\
             4. Any other interview processes or offers you're currently involved in\n\
             5. Your virtual interview availability over the next 2-3 days\n\n\
             Once you share these, I'll coordinate the next steps and schedule discussions accordingly.",
            first_name = Self::first_name(name),
            recruiter = self.config.recruiter_name,
            agency = self.config.agency_name,
            role = role,
        )
    }
}
