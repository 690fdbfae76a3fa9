//! Domain ID generation
//!
//! All IDs use the format: `{6-char-hex}-{type}-{slug}`
//! Example: `019430-route-写数学作业`

/// Generate a domain ID from type and title
pub fn generate_id(domain_type: &str, title: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.to_string()[..6];
    let slug = slugify(title);
    format!("{}-{}-{}", hex_prefix, domain_type, slug)
}

/// Slugify a title for use in IDs
fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let id = generate_id("route", "Write The Essay");
        assert!(id.len() > 10);
        assert!(id.contains("-route-"));
        assert!(id.contains("write-the-essay"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Go running!"), "go-running");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
    }

    #[test]
    fn test_slugify_cjk() {
        // CJK characters are alphanumeric and survive slugification
        assert_eq!(slugify("写数学作业"), "写数学作业");
    }

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id("step", "1");
        let b = generate_id("step", "1");
        assert_ne!(a, b);
    }
}
