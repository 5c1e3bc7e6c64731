/// Compare a typed answer against a fill-in question's answer set.
///
/// Comparison trims surrounding whitespace and ignores case. An input that is
/// empty after trimming never matches, even if the answer set contains an
/// empty string.
pub fn check_answer(user_input: &str, correct: &str, accepted: &[String]) -> bool {
    let normalized = normalize(user_input);
    if normalized.is_empty() {
        return false;
    }

    std::iter::once(correct)
        .chain(accepted.iter().map(String::as_str))
        .any(|candidate| normalize(candidate) == normalized)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
