pub mod booster;
pub mod health;
pub mod insights;
pub mod journals;
pub mod reflections;
pub mod session;
pub mod streak;
