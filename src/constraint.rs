//! Constraint rule chain.
//!
//! Translates the trailing options of a validation expression (e.g.
//! `validate:"required,len=2,enum=red,min=1"` splits into the name `required`
//! and the options) into schema constraints. Every rule is tried against
//! every option in the fixed order length, enumeration, maximum, minimum;
//! a rule is a no-op unless its prefix matches the option.

use crate::error::{Error, Result};
use crate::schema::Schema;

const LEN_OPTION: &str = "len=";
const ENUM_OPTION: &str = "enum=";
const MAX_OPTION: &str = "max=";
const MIN_OPTION: &str = "min=";

/// A pure constraint rule over one whitespace-free option
pub type ConstraintRule = fn(Schema, &str) -> Result<Schema>;

/// The rule chain, in application order
pub const CONSTRAINT_RULES: [ConstraintRule; 4] = [length_rule, enum_rule, maximum_rule, minimum_rule];

/// Runs the full rule chain over every option, in order.
///
/// # Errors
///
/// Returns [`Error::ConstraintSyntax`] on the first non-numeric `len=`,
/// `max=` or `min=` payload, aborting synthesis of the owning schema.
pub fn validate_schema<S: AsRef<str>>(schema: Schema, options: &[S]) -> Result<Schema> {
    let mut schema = schema;
    for option in options {
        for rule in CONSTRAINT_RULES {
            schema = rule(schema, option.as_ref())?;
        }
    }
    Ok(schema)
}

fn length_rule(schema: Schema, option: &str) -> Result<Schema> {
    let Some(payload) = option.strip_prefix(LEN_OPTION) else {
        return Ok(schema);
    };
    let length: u64 = payload.parse().map_err(|_| {
        Error::ConstraintSyntax(format!(
            "{:?}: the right syntax is validate:\"len=1\"",
            option
        ))
    })?;
    Ok(schema.with_length(length))
}

fn enum_rule(schema: Schema, option: &str) -> Result<Schema> {
    let Some(payload) = option.strip_prefix(ENUM_OPTION) else {
        return Ok(schema);
    };
    let values = payload.split(',').map(str::to_string).collect();
    Ok(schema.with_enum(values))
}

fn maximum_rule(schema: Schema, option: &str) -> Result<Schema> {
    let Some(payload) = option.strip_prefix(MAX_OPTION) else {
        return Ok(schema);
    };
    let maximum: f64 = payload.parse().map_err(|_| {
        Error::ConstraintSyntax(format!(
            "{:?}: the right syntax is validate:\"max=12\"",
            option
        ))
    })?;
    Ok(schema.with_maximum(maximum))
}

fn minimum_rule(schema: Schema, option: &str) -> Result<Schema> {
    let Some(payload) = option.strip_prefix(MIN_OPTION) else {
        return Ok(schema);
    };
    let minimum: f64 = payload.parse().map_err(|_| {
        Error::ConstraintSyntax(format!(
            "{:?}: the right syntax is validate:\"min=1\"",
            option
        ))
    })?;
    Ok(schema.with_minimum(minimum))
}
