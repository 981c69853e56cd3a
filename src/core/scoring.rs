use crate::core::skills::{SkillNormalizer, SkillSet};

/// Percentage of a project's required skills present in a user's skills (0-100)
///
/// Scoring rules:
/// - 0 when the user has no skills or the project's raw skill list is empty/missing
/// - 0 when the project's normalized skill set is empty
/// - otherwise round(|user ∩ project| / |project| * 100), ties to even
pub fn score_project(
    normalizer: &SkillNormalizer,
    user_skills: &SkillSet,
    project_skills_raw: Option<&str>,
) -> u8 {
    if user_skills.is_empty() {
        return 0;
    }
    let project_skills = match project_skills_raw {
        Some(raw) if !raw.is_empty() => normalizer.normalize(Some(raw)),
        _ => return 0,
    };

    score_skill_sets(user_skills, &project_skills)
}

/// Score two already-normalized sets
#[inline]
pub fn score_skill_sets(user_skills: &SkillSet, project_skills: &SkillSet) -> u8 {
    if user_skills.is_empty() || project_skills.is_empty() {
        return 0;
    }

    let matched = user_skills.overlap(project_skills);
    percent_half_even(matched, project_skills.len())
}

/// round(numerator * 100 / denominator) with ties going to the even neighbour
///
/// Integer arithmetic so that e.g. 1/8 (12.5%) always rounds to 12.
#[inline]
fn percent_half_even(numerator: usize, denominator: usize) -> u8 {
    debug_assert!(denominator > 0 && numerator <= denominator);

    let scaled = numerator * 100;
    let quotient = scaled / denominator;
    let twice_remainder = (scaled % denominator) * 2;

    let rounded = if twice_remainder > denominator
        || (twice_remainder == denominator && quotient % 2 == 1)
    {
        quotient + 1
    } else {
        quotient
    };

    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skills::{normalize, Canonicalize};
    use std::sync::Arc;

    fn score(user: &str, project: &str) -> u8 {
        let normalizer = SkillNormalizer::new();
        score_project(&normalizer, &normalize(Some(user)), Some(project))
    }

    #[test]
    fn test_half_matched() {
        assert_eq!(score("python, react", "Python, UI Design, React, Data Analysis"), 50);
    }

    #[test]
    fn test_full_match() {
        assert_eq!(score("a", "a"), 100);
    }

    #[test]
    fn test_short_circuit_on_empty_side() {
        let normalizer = SkillNormalizer::new();
        assert_eq!(score_project(&normalizer, &SkillSet::new(), Some("Python")), 0);
        assert_eq!(score_project(&normalizer, &normalize(Some("python")), Some("")), 0);
        assert_eq!(score_project(&normalizer, &normalize(Some("python")), None), 0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        assert_eq!(score("python", "Marketing, Leadership"), 0);
    }

    #[test]
    fn test_whitespace_only_project_list() {
        // " , " normalizes to {""}, which the user does not share
        assert_eq!(score("python", " , "), 0);
    }

    #[test]
    fn test_empty_tokens_can_match() {
        // Both sides carry a trailing comma, so "" is shared
        assert_eq!(score("python,", "rust,"), 50);
    }

    struct PlaceholderBlanker;

    impl Canonicalize for PlaceholderBlanker {
        fn canonicalize(&self, token: String) -> String {
            if token == "n/a" { String::new() } else { token }
        }
    }

    #[test]
    fn test_dropped_empty_tokens_do_not_match() {
        let normalizer = SkillNormalizer::new().drop_empty_tokens(true);
        let user = normalizer.normalize(Some("python,"));
        assert_eq!(score_project(&normalizer, &user, Some("rust,")), 0);

        // Tokens blanked by the canonicalizer are dropped too
        let normalizer = normalizer.with_canonicalizer(Arc::new(PlaceholderBlanker));
        let user = normalizer.normalize(Some("Python, N/A"));
        assert_eq!(score_project(&normalizer, &user, Some("Rust, n/a")), 0);
        assert_eq!(score_project(&normalizer, &user, Some("Python, n/a")), 100);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(percent_half_even(1, 8), 12);
        assert_eq!(percent_half_even(3, 8), 38);
        assert_eq!(percent_half_even(5, 8), 62);
        assert_eq!(percent_half_even(1, 3), 33);
        assert_eq!(percent_half_even(2, 3), 67);
        assert_eq!(percent_half_even(1, 200), 0);
        assert_eq!(percent_half_even(3, 200), 2);
        assert_eq!(percent_half_even(0, 4), 0);
        assert_eq!(percent_half_even(4, 4), 100);
    }

    #[test]
    fn test_three_of_four() {
        assert_eq!(
            score("UI Design, React Native, Python", "UI Design, React Native, Python, Data Analysis"),
            75
        );
    }
}
