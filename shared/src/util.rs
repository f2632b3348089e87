/// Current UTC time as an RFC 3339 string with millisecond precision
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Part of an email address before the `@`
///
/// Returns the whole input when there is no `@`.
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
