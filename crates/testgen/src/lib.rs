//! Random relation schemas for exercising `fdnorm_core`.

pub mod generator;

pub use generator::{
    attribute_name, generate_mult_relations, generate_single_relation, GeneratedSchema,
    SchemaParams,
};
