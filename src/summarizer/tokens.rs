/// Rough token count: CJK ideographs at 1.5 chars per token, everything
/// else at 4.
pub fn estimate_tokens(text: &str) -> usize {
    let (cjk, other) = text.chars().fold((0usize, 0usize), |(cjk, other), c| {
        if ('\u{4e00}'..='\u{9fa5}').contains(&c) {
            (cjk + 1, other)
        } else {
            (cjk, other + 1)
        }
    });
    (cjk as f64 / 1.5 + other as f64 / 4.0).ceil() as usize
}
