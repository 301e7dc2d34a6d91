//! Fixed prompt templates for the enrichment chains.
//!
//! Rendering is pure string substitution — no conditional logic — so every
//! template can be unit tested without touching the network.

/// Sentiment: 1–5 scale plus a one-sentence tone summary as JSON.
#[must_use]
pub fn sentiment_prompt(text: &str) -> String {
    format!(
        "Rate the sentiment of this customer review on a scale 1\u{2013}5 \
         (1=very negative, 5=very positive), then give a one-sentence \
         tone summary in JSON. Review: \"{text}\". \
         Output JSON with keys: score, summary."
    )
}

/// Classification into one of the supplied buckets; output is the bare
/// bucket name.
#[must_use]
pub fn classification_prompt(text: &str, buckets: &str) -> String {
    format!(
        "Classify this review into one of these buckets: \
         {buckets}. Review: \"{text}\". Output only the bucket name."
    )
}

/// Topic extraction: top `k` themes from a blob of reviews as a JSON list.
#[must_use]
pub fn topics_prompt(context: &str, k: u32) -> String {
    format!(
        "Here are some customer reviews:\n\n{context}\n\n\
         Extract the top {k} themes or topics as a JSON list."
    )
}

/// Weekly summary report over the concatenated review texts, as Markdown.
#[must_use]
pub fn summary_prompt(context: &str) -> String {
    format!(
        "Generate a weekly summary report of the following customer reviews. \
         Format the output as clean Markdown. \
         Include: Good vs. Bad breakdown (with counts), key positive phrases, \
         key negative phrases, and 3-5 actionable insights or recommendations. \
         Reviews:\n\n{context}"
    )
}

/// Join review texts into the `- <text>` context block the batch templates
/// expect.
#[must_use]
pub fn context_block<S: AsRef<str>>(texts: &[S]) -> String {
    texts
        .iter()
        .map(|t| format!("- {}", t.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}
