pub mod journal;
pub mod mood;
pub mod record;
pub mod reflection;
pub mod streak;
