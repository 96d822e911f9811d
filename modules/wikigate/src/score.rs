use serde::Serialize;
use wikigate_common::constants::*;
use wikigate_common::Article;

use crate::links::count_internal_links;
use crate::text::{count_words, utf16_len};

/// Content depth score. Linear up to the "good" length, then a square-root
/// tail towards the ideal length so depth keeps paying off without a cliff.
pub fn content_quality(word_count: usize) -> f64 {
    if word_count < MIN_CONTENT_WORD_COUNT {
        return 0.0;
    }
    if word_count >= IDEAL_CONTENT_WORD_COUNT {
        return 1.0;
    }

    let score = if word_count <= GOOD_CONTENT_WORD_COUNT {
        0.8 * word_count as f64 / GOOD_CONTENT_WORD_COUNT as f64
    } else {
        let above_good = (word_count - GOOD_CONTENT_WORD_COUNT) as f64;
        let band = (IDEAL_CONTENT_WORD_COUNT - GOOD_CONTENT_WORD_COUNT) as f64;
        0.8 + (above_good / band).sqrt() * 0.2
    };

    score.clamp(0.0, 1.0)
}

/// Ratio of an observed count to its ideal, clamped to [0, 1].
pub fn count_quality(ideal: usize, real: usize) -> f64 {
    (real as f64 / ideal as f64).clamp(0.0, 1.0)
}

fn citation_count(article: &Article) -> usize {
    match article.references() {
        Ok(references) => references.len(),
        Err(e) => {
            tracing::warn!(wiki = %article.id, error = %e, "Unreadable references scored as zero");
            0
        }
    }
}

fn socials_count(article: &Article) -> usize {
    article
        .metadata
        .iter()
        .filter(|m| is_common_meta_id(&m.id))
        .filter(|m| m.resolve().is_ok_and(|v| v.is_filled()))
        .count()
}

/// Each dimension of the quality score, already clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub content: f64,
    pub internal_links: f64,
    pub citations: f64,
    pub media: f64,
    pub tags: f64,
    pub summary: f64,
    pub socials: f64,
}

impl ScoreBreakdown {
    pub fn for_article(article: &Article) -> Self {
        Self {
            content: content_quality(count_words(&article.content)),
            internal_links: count_quality(
                IDEAL_INTERNAL_LINKS_COUNT,
                count_internal_links(&article.content),
            ),
            citations: count_quality(IDEAL_CITATIONS_COUNT, citation_count(article)),
            media: count_quality(IDEAL_MEDIA_COUNT, article.media_items().len()),
            tags: count_quality(IDEAL_TAGS_COUNT, article.recognized_tags().len()),
            summary: count_quality(IDEAL_SUMMARY_LENGTH, utf16_len(&article.summary)),
            socials: count_quality(IDEAL_SOCIAL_MEDIA_COUNT, socials_count(article)),
        }
    }

    fn weighted(&self) -> [(f64, f64); 7] {
        [
            (self.content, CONTENT_SCORE_WEIGHT),
            (self.internal_links, INTERNAL_LINKS_SCORE_WEIGHT),
            (self.citations, CITATIONS_SCORE_WEIGHT),
            (self.media, MEDIA_SCORE_WEIGHT),
            (self.tags, TAGS_SCORE_WEIGHT),
            (self.summary, SUMMARY_SCORE_WEIGHT),
            (self.socials, SOCIAL_SCORE_WEIGHT),
        ]
    }

    /// Weighted mean of the sub-scores as a floored percentage.
    pub fn total(&self) -> u8 {
        let weighted = self.weighted();
        let sum: f64 = weighted.iter().map(|(s, w)| s * w).sum();
        let weights: f64 = weighted.iter().map(|(_, w)| w).sum();
        (sum / weights * 100.0).floor().clamp(0.0, 100.0) as u8
    }
}

pub fn score_breakdown(article: &Article) -> ScoreBreakdown {
    ScoreBreakdown::for_article(article)
}

/// Quality score of an article, 0 to 100. Meant for articles that passed validation.
pub fn score(article: &Article) -> u8 {
    score_breakdown(article).total()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_score_shape() {
        assert_eq!(content_quality(0), 0.0);
        assert_eq!(content_quality(9), 0.0);
        assert!((content_quality(10) - 0.016).abs() < 1e-9);
        assert!((content_quality(250) - 0.4).abs() < 1e-9);
        assert!((content_quality(500) - 0.8).abs() < 1e-9);
        assert!((content_quality(750) - (0.8 + 0.2 * 0.25f64.sqrt())).abs() < 1e-9);
        assert_eq!(content_quality(1500), 1.0);
        assert_eq!(content_quality(10_000), 1.0);
    }

    #[test]
    fn content_score_is_monotonic() {
        let mut previous = 0.0;
        for words in 0..2000 {
            let score = content_quality(words);
            assert!(score >= previous, "score dropped at {words} words");
            previous = score;
        }
        assert!(content_quality(600) >= content_quality(400));
    }

    #[test]
    fn count_quality_clamps() {
        assert_eq!(count_quality(5, 0), 0.0);
        assert_eq!(count_quality(4, 2), 0.5);
        assert_eq!(count_quality(3, 30), 1.0);
    }

    #[test]
    fn perfect_article_scores_100() {
        let breakdown = ScoreBreakdown {
            content: 1.0,
            internal_links: 1.0,
            citations: 1.0,
            media: 1.0,
            tags: 1.0,
            summary: 1.0,
            socials: 1.0,
        };
        assert_eq!(breakdown.total(), 100);
    }

    #[test]
    fn total_is_floored_weighted_mean() {
        // Only content filled: 0.8 / 3.4 = 23.5%
        let breakdown = ScoreBreakdown {
            content: 1.0,
            internal_links: 0.0,
            citations: 0.0,
            media: 0.0,
            tags: 0.0,
            summary: 0.0,
            socials: 0.0,
        };
        assert_eq!(breakdown.total(), 23);
    }

    #[test]
    fn empty_article_scores_zero() {
        assert_eq!(score(&Article::builder().build()), 0);
    }
}
