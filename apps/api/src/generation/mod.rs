//! The resume generation pipeline, stage by stage: keyword gate, prompt
//! construction, response extraction, JSON recovery, content validation,
//! document assembly, and the orchestrator that strings them together.

pub mod assemble;
pub mod extract;
pub mod gate;
pub mod handlers;
pub mod orchestrator;
pub mod prompt;
pub mod recover;
pub mod roles;
pub mod validate;
