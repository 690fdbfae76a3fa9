//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

/// Breakdown system prompt (ADHD-coach micro-step instruction)
pub const BREAKDOWN: &str = include_str!("../../prompts/breakdown.pmt");

/// Re-plan system prompt
pub const REPLAN: &str = include_str!("../../prompts/replan.pmt");

/// Re-plan user-message template ({{step}}, {{barrier}}, {{goal}})
pub const REPLAN_REQUEST: &str = include_str!("../../prompts/replan-request.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "breakdown" => Some(BREAKDOWN),
        "replan" => Some(REPLAN),
        "replan-request" => Some(REPLAN_REQUEST),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_embedded_breakdown() {
        let prompt = get_embedded("breakdown").unwrap();
        assert!(prompt.contains("ADHD coach"));
        assert!(prompt.contains("5 to 7 steps"));
        assert!(prompt.contains("Physical Reset"));
        assert!(prompt.contains("submit_breakdown"));
    }

    #[test]
    fn test_get_embedded_replan() {
        assert!(get_embedded("replan").unwrap().contains("Re-plan"));
        let request = get_embedded("replan-request").unwrap();
        assert!(request.contains("{{step}}"));
        assert!(request.contains("{{barrier}}"));
        assert!(request.contains("{{goal}}"));
    }

    #[test]
    fn test_get_embedded_unknown() {
        assert!(get_embedded("unknown-template").is_none());
    }
}
