use crate::assessment::scoring::CompetencyRating;

pub const SIGNIFICANT_GAP: &str = "Gap significativo.";
pub const HIGH_INTEREST: &str = "Alto interés.";
pub const HIGH_RELEVANCE: &str = "Alta relevancia.";
pub const FALLBACK: &str = "Recomendación automática.";

const SIGNIFICANT_GAP_MIN: i32 = 2;
const HIGH_RATING_MIN: i32 = 4;

/// Builds the rationale attached to every recommendation of a rating.
///
/// Phrases are appended in a fixed order: gap, interest, relevance.
pub fn build_justification(rating: &CompetencyRating, gap: i32) -> String {
    let mut text = String::new();
    if gap >= SIGNIFICANT_GAP_MIN {
        text.push_str(SIGNIFICANT_GAP);
        text.push(' ');
    }
    if rating.interest >= HIGH_RATING_MIN {
        text.push_str(HIGH_INTEREST);
        text.push(' ');
    }
    if rating.relevance >= HIGH_RATING_MIN {
        text.push_str(HIGH_RELEVANCE);
        text.push(' ');
    }

    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        FALLBACK.to_string()
    } else {
        trimmed.to_string()
    }
}
