//! Naming conventions and helpers for entigen entity generation.
//!
//! This crate derives identifiers used in generated entity classes and the
//! files they are written to. It has no dependencies and can be used by any
//! other entigen crate.

// ============================================================================
// Class Naming (for entity rendering)
// ============================================================================

/// Derive the class identifier of an entity from its display name.
///
/// Only the first character is uppercased; the remainder is kept verbatim.
/// Spaces, hyphens and other characters are not touched, and an empty name
/// yields an empty identifier.
///
/// # Examples
/// ```
/// use entigen_naming::to_class_name;
///
/// assert_eq!(to_class_name("user"), "User");
/// assert_eq!(to_class_name("blogPost"), "BlogPost");
/// assert_eq!(to_class_name("order-item"), "Order-item");
/// assert_eq!(to_class_name(""), "");
/// ```
pub fn to_class_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Case Conversion (for table and file names)
// ============================================================================

/// Split an identifier into words.
///
/// Word boundaries are non-alphanumeric characters, a lowercase letter or
/// digit followed by an uppercase letter, and the last capital of an acronym
/// that is followed by a lowercase letter (`HTTPServer` -> `HTTP`, `Server`).
///
/// # Examples
/// ```
/// use entigen_naming::split_words;
///
/// assert_eq!(split_words("blogPost"), vec!["blog", "Post"]);
/// assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
/// assert_eq!(split_words("order item-line_no"), vec!["order", "item", "line", "no"]);
/// ```
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        // current is non-empty only when the previous char was alphanumeric
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert any identifier to snake_case.
///
/// # Examples
/// ```
/// use entigen_naming::to_snake_case;
///
/// assert_eq!(to_snake_case("BlogPost"), "blog_post");
/// assert_eq!(to_snake_case("user"), "user");
/// ```
pub fn to_snake_case(s: &str) -> String {
    join_lower(s, "_")
}

/// Convert any identifier to kebab-case.
///
/// # Examples
/// ```
/// use entigen_naming::to_kebab_case;
///
/// assert_eq!(to_kebab_case("BlogPost"), "blog-post");
/// ```
pub fn to_kebab_case(s: &str) -> String {
    join_lower(s, "-")
}

/// Convert any identifier to PascalCase.
///
/// # Examples
/// ```
/// use entigen_naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
/// assert_eq!(to_pascal_case("blogPost"), "BlogPost");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert any identifier to camelCase.
///
/// # Examples
/// ```
/// use entigen_naming::to_camel_case;
///
/// assert_eq!(to_camel_case("blog_post"), "blogPost");
/// assert_eq!(to_camel_case("BlogPost"), "blogPost");
/// ```
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(idx, w)| {
            if idx == 0 {
                w.to_lowercase()
            } else {
                capitalize(w)
            }
        })
        .collect()
}

fn join_lower(s: &str, sep: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
