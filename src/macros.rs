// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, &str or &String
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// Lowercase once, compare many: `contains_ci!(haystack, needle_lower)`.
/// `needle_lower` must already be lowercase.
#[macro_export]
macro_rules! contains_ci {
    ($hay:expr, $needle_lower:expr) => {
        $hay.to_lowercase().contains($needle_lower)
    };
}
