//! Secret scrubbing for log and telemetry payloads.

use once_cell::sync::Lazy;
use regex::Regex;

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // password/pwd flags and assignments: `-P secret`, `PWD=secret`, `password: secret`
        r"(?i)((?:password|pwd)\s*[=: ]\s*)(\S+)",
        // generic credential-bearing env assignments
        r"(?i)([A-Z0-9_]*?(?:KEY|TOKEN|SECRET))=(\S+)",
        // authorization headers echoed into stderr
        r"(?i)(authorization: )([\w\-\.=:/+]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("static redaction pattern"))
    .collect()
});

/// Redacts values that look like secrets in a string.
///
/// Applied to anything user- or process-supplied (stderr capture, command
/// echoes) before it reaches a log line or a telemetry property.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}<redacted>")
            })
            .to_string();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::redact_sensitive;

    #[test]
    fn redacts_password_assignments() {
        assert_eq!(redact_sensitive("login failed: password=hunter2"), "login failed: password=<redacted>");
        assert_eq!(redact_sensitive("PWD: hunter2 rejected"), "PWD: <redacted> rejected");
    }

    #[test]
    fn redacts_credential_env_assignments() {
        let output = redact_sensitive("SQLTOOLS_API_TOKEN=abc123 exported");
        assert_eq!(output, "SQLTOOLS_API_TOKEN=<redacted> exported");
    }

    #[test]
    fn leaves_ordinary_text_untouched() {
        let text = "connection to tcp:db.example.com closed (code 1)";
        assert_eq!(redact_sensitive(text), text);
    }
}
