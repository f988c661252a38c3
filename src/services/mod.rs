pub mod keyword;
pub mod llm;
pub mod mood_analysis;
pub mod stories;
pub mod streak;
pub mod timeline;
pub mod weekly;
