const VISIBLE_PREFIX: usize = 4;

/// Masks a bearer token for logging, keeping a short prefix for correlation.
pub fn mask_token(token: &str) -> String {
    let trimmed = token.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let prefix: String = trimmed.chars().take(VISIBLE_PREFIX).collect();
    if trimmed.chars().count() <= VISIBLE_PREFIX * 2 {
        return String::from("[REDACTED]");
    }

    format!("{}...[REDACTED]", prefix)
}
