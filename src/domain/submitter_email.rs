#[derive(Debug, Clone)]
pub struct SubmitterEmail(String);

impl SubmitterEmail {
    /// Accepts addresses of the shape `local@domain.tld`: no whitespace, a
    /// single `@`, and at least one dot inside the domain part.
    pub fn parse(s: impl AsRef<str>) -> Result<Self, String> {
        let s = s.as_ref();
        if has_valid_shape(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("{} is not a valid email address.", s))
        }
    }
}

// Mirrors `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
fn has_valid_shape(s: &str) -> bool {
    let (local, domain) = match s.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.is_empty() || domain.contains('@') || domain.chars().any(char::is_whitespace) {
        return false;
    }
    // A dot with at least one character on each side of it.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

impl AsRef<str> for SubmitterEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubmitterEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
