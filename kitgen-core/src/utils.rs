//! Naming helpers used when turning interface identifiers into Go identifiers.

/// Uppercase the first character (e.g., "visit" -> "Visit").
pub fn to_upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first character (e.g., "Visit" -> "visit").
pub fn to_lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Lowercase the whole string (e.g., "StringService" -> "stringservice").
pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-']).map(to_upper_first).collect()
}

/// Convert a string to snake_case, keeping acronyms together
/// (e.g., "UserID" -> "user_id", "HTTPServer" -> "http_server").
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() {
            if i > 0 && !result.is_empty() && !result.ends_with('_') {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower)
                {
                    result.push('_');
                }
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Receiver name for a Go type: the last uppercase letter, lowercased, or the
/// first character when there is none (e.g., "stringServiceServer" -> "s").
pub fn last_upper_or_first(s: &str) -> String {
    s.chars()
        .rev()
        .find(|c| c.is_uppercase())
        .or_else(|| s.chars().next())
        .map(|c| c.to_lowercase().collect())
        .unwrap_or_default()
}
