// External collaborators of the generation pipeline: flat-file profile and
// prompt stores with explicit injected caches, plus the static slug mapping.

pub mod mapping;
pub mod profiles;
pub mod prompts;
