use std::collections::BTreeSet;

use crate::applications::domain::Job;

/// Splits free text the way the board treats keywords: alphanumerics and
/// underscores form tokens, everything else separates. Tokens come back
/// lowercased with empties dropped.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

/// Derives the normalized keyword set for a posting.
///
/// The title and every requirement string are tokenized; tags are included
/// verbatim (lowercased, never split). The result is membership-only: no
/// ordering, no multiplicity.
pub fn job_keywords(job: &Job) -> BTreeSet<String> {
    let mut keywords: BTreeSet<String> = tokenize(&job.title).collect();

    for requirement in &job.requirements {
        keywords.extend(tokenize(requirement));
    }

    for tag in &job.tags {
        if !tag.is_empty() {
            keywords.insert(tag.to_lowercase());
        }
    }

    keywords
}
