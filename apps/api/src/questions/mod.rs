// Interview question generation: prompt assembly, the generator call and the
// reply parser. All text-generation calls go through llm_client.

pub mod generator;
pub mod parser;
pub mod prompts;
