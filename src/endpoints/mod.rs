pub mod chat;
pub mod fallback;
pub mod materials;
pub mod notes;
pub mod quiz;
pub mod status;
pub mod study_plan;
pub mod syllabus;
pub mod videos;
