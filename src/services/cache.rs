use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::core::skills::{SkillNormalizer, SkillSet};
use crate::models::EntityKind;

/// Cache key for a normalized skill set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SkillCacheKey {
    pub kind: EntityKind,
    pub id: u64,
}

impl SkillCacheKey {
    pub fn new(kind: EntityKind, id: u64) -> Self {
        Self { kind, id }
    }
}

struct CachedSkills {
    /// Raw skill field the set was computed from; acts as the entity version
    raw: Option<String>,
    skills: SkillSet,
}

/// Bounded memo of normalized skill sets per entity
///
/// An entry is only reused while the entity's raw skill field is unchanged,
/// so a stale entry can never be served. Callers that update a skill field
/// should still call [`SkillSetCache::invalidate`] to release the old entry.
pub struct SkillSetCache {
    entries: Mutex<LruCache<SkillCacheKey, CachedSkills>>,
}

impl SkillSetCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Return the cached set for `key`, normalizing `raw` on a miss or version change
    pub fn get_or_normalize(
        &self,
        key: SkillCacheKey,
        raw: Option<&str>,
        normalizer: &SkillNormalizer,
    ) -> SkillSet {
        let mut entries = self.lock();

        if let Some(entry) = entries.get(&key) {
            if entry.raw.as_deref() == raw {
                tracing::trace!("Skill cache hit: {}:{}", key.kind, key.id);
                return entry.skills.clone();
            }
            tracing::trace!("Skill cache stale: {}:{}", key.kind, key.id);
        }

        let skills = normalizer.normalize(raw);
        entries.put(
            key,
            CachedSkills {
                raw: raw.map(str::to_string),
                skills: skills.clone(),
            },
        );
        skills
    }

    /// Drop the entry for one entity after its skill field changed
    pub fn invalidate(&self, key: SkillCacheKey) {
        self.lock().pop(&key);
    }

    pub fn clear(&self) {
        self.lock().clear();
        tracing::debug!("Skill cache cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<SkillCacheKey, CachedSkills>> {
        // Entries are replaced whole, so a poisoned lock still guards a consistent map
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SkillSetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillSetCache").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skills::normalize;

    #[test]
    fn test_cache_returns_normalized_set() {
        let cache = SkillSetCache::new(10);
        let normalizer = SkillNormalizer::new();

        let skills = cache.get_or_normalize(SkillCacheKey::new(EntityKind::User, 1), Some("Python, React"), &normalizer);
        assert_eq!(skills, normalize(Some("python,react")));
        assert_eq!(cache.len(), 1);

        let again = cache.get_or_normalize(SkillCacheKey::new(EntityKind::User, 1), Some("Python, React"), &normalizer);
        assert_eq!(again, skills);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_recomputes_on_raw_change() {
        let cache = SkillSetCache::new(10);
        let normalizer = SkillNormalizer::new();

        cache.get_or_normalize(SkillCacheKey::new(EntityKind::User, 1), Some("Python"), &normalizer);
        let updated = cache.get_or_normalize(SkillCacheKey::new(EntityKind::User, 1), Some("Rust"), &normalizer);
        assert_eq!(updated, normalize(Some("rust")));
    }

    #[test]
    fn test_users_and_projects_keyed_separately() {
        let cache = SkillSetCache::new(10);
        let normalizer = SkillNormalizer::new();

        cache.get_or_normalize(SkillCacheKey::new(EntityKind::User, 1), Some("Python"), &normalizer);
        let project = cache.get_or_normalize(SkillCacheKey::new(EntityKind::Project, 1), Some("Go"), &normalizer);
        assert_eq!(project, normalize(Some("go")));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_invalidate_and_capacity() {
        let cache = SkillSetCache::new(2);
        let normalizer = SkillNormalizer::new();

        for id in 0..3 {
            cache.get_or_normalize(SkillCacheKey::new(EntityKind::User, id), Some("a"), &normalizer);
        }
        assert_eq!(cache.len(), 2);

        cache.invalidate(SkillCacheKey::new(EntityKind::User, 2));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
