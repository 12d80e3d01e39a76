// src/core/mod.rs

pub mod arg_assembler;
pub mod commons;
pub mod option_processor;
pub mod rc_resolver;
pub mod startup_options;
pub mod tokenizer;
pub mod workspace;
