//! Slug assignment - URL-safe identifiers derived from free-form text.
//!
//! A slug is normalized with [`slugify`] and, when the datastore reports that it is
//! already taken, retried with numeric suffixes produced by [`slug_candidate`].

/// Total insert attempts for one post: the base slug plus four suffixed candidates.
pub const MAX_SLUG_ATTEMPTS: u32 = 5;

/// Base slug for titles that normalize to nothing, e.g. non-latin scripts.
pub const FALLBACK_SLUG: &str = "post";

/// Normalize arbitrary text into a slug.
///
/// Steps, in order:
/// 1. lowercase
/// 2. trim surrounding whitespace
/// 3. drop everything except `a-z`, `0-9`, whitespace and `-`
/// 4. turn each whitespace run into one `-`
/// 5. collapse `-` runs
/// 6. drop one leading and one trailing `-`, and any `_`
///
/// The result only contains `[a-z0-9-]`, never starts or ends with a hyphen, and may be
/// empty when the input has no ascii letters or digits.
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();

    let kept = lowered
        .trim()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-');

    // Steps 4 and 5 in one pass: whitespace becomes '-', then '-' runs collapse.
    let mut collapsed = String::with_capacity(lowered.len());
    for c in kept {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.strip_prefix('-').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.replace('_', "")
}

/// The candidate slug for a 1-based attempt: `base` first, then `base-2`, `base-3`, ...
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt <= 1 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}
