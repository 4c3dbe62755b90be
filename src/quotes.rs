//! Quotes module - motivational lines shown on the lesson screen

use rand::seq::SliceRandom;

/// Shown when no quote has been picked yet
pub const DEFAULT_QUOTE: &str = "O único treino ruim é aquele que não aconteceu.";

pub const QUOTES: &[&str] = &[
    "A disciplina é a ponte entre metas e realizações.",
    DEFAULT_QUOTE,
    "Sua mente desiste antes do seu corpo. Continue.",
    "Transforme sua dor em poder.",
    "O corpo alcança o que a mente acredita.",
];

/// Pick a random quote
pub fn random_quote() -> &'static str {
    QUOTES.choose(&mut rand::thread_rng()).copied().unwrap_or(DEFAULT_QUOTE)
}

/// Quote in display form
pub fn format_quote(quote: &str) -> String {
    format!("\"{}\"", quote)
}
