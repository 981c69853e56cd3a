use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// Normalized set of lowercase, trimmed skill tokens
///
/// Backed by an ordered set so iteration and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tokens present in both sets
    pub fn overlap(&self, other: &SkillSet) -> usize {
        // iterate the smaller side
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small.0.iter().filter(|t| large.0.contains(*t)).count()
    }

    pub fn shares_any(&self, other: &SkillSet) -> bool {
        let (small, large) = if self.len() <= other.len() { (self, other) } else { (other, self) };
        small.0.iter().any(|t| large.0.contains(t))
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Hook for mapping a normalized token onto a canonical skill name
///
/// Runs after trimming and lowercasing.
pub trait Canonicalize: Send + Sync {
    fn canonicalize(&self, token: String) -> String;
}

/// Exact-match canonicalization: tokens are left unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl Canonicalize for ExactMatch {
    #[inline]
    fn canonicalize(&self, token: String) -> String {
        token
    }
}

/// Alias table mapping skill spellings onto one canonical name
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    aliases: HashMap<String, String>,
}

impl SynonymTable {
    /// Build from `alias -> canonical` pairs; both sides are normalized
    ///
    /// Pairs whose canonical name is blank are skipped.
    pub fn new<I, A, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        let aliases = pairs
            .into_iter()
            .map(|(alias, canonical)| {
                (
                    alias.as_ref().trim().to_lowercase(),
                    canonical.as_ref().trim().to_lowercase(),
                )
            })
            .filter(|(_, canonical)| !canonical.is_empty())
            .collect();
        Self { aliases }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Canonicalize for SynonymTable {
    fn canonicalize(&self, token: String) -> String {
        match self.aliases.get(&token) {
            Some(canonical) => canonical.clone(),
            None => token,
        }
    }
}

/// Turns raw comma-separated skill strings into [`SkillSet`]s
///
/// The default normalizer splits on `,` only, trims and lowercases each
/// token, and keeps tokens that end up empty (`"a,"` yields `{"", "a"}`).
#[derive(Clone)]
pub struct SkillNormalizer {
    canonicalizer: Arc<dyn Canonicalize>,
    drop_empty_tokens: bool,
}

impl SkillNormalizer {
    pub fn new() -> Self {
        Self {
            canonicalizer: Arc::new(ExactMatch),
            drop_empty_tokens: false,
        }
    }

    pub fn with_canonicalizer(mut self, canonicalizer: Arc<dyn Canonicalize>) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    pub fn drop_empty_tokens(mut self, drop: bool) -> Self {
        self.drop_empty_tokens = drop;
        self
    }

    /// Normalize a raw skill list. Empty or missing input gives an empty set.
    pub fn normalize(&self, raw: Option<&str>) -> SkillSet {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return SkillSet::new(),
        };

        raw.split(',')
            .map(|token| self.canonicalizer.canonicalize(token.trim().to_lowercase()))
            .filter(|token| !(self.drop_empty_tokens && token.is_empty()))
            .collect()
    }
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SkillNormalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillNormalizer")
            .field("drop_empty_tokens", &self.drop_empty_tokens)
            .finish_non_exhaustive()
    }
}

/// Normalize with the default exact-match policy
#[inline]
pub fn normalize(raw: Option<&str>) -> SkillSet {
    SkillNormalizer::new().normalize(raw)
}
