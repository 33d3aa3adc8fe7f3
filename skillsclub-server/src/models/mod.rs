//! Domain models and request normalization

pub mod query;
pub mod repo;
pub mod skill;

pub use query::{ListQuery, ListResponse, Page, RawListQuery, MAX_LIMIT};
pub use repo::Repo;
pub use skill::SkillRow;
