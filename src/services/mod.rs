// Service exports
pub mod cache;
pub mod directory;

pub use cache::{SkillSetCache, SkillCacheKey};
pub use directory::{Directory, DirectoryError, InMemoryDirectory, ProjectDirectory, ReviewDirectory, Snapshot, UserDirectory};
