pub mod dummy;
pub mod google_ai_studio_gemini;
