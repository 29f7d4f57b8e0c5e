//! Argument normalizer for variadic mock calls
//!
//! Callers describe a mock as `name, trait..., options?, succeed?` (list
//! requests also take a count right after the name). The trailing arguments
//! are told apart by their JSON shape, never by position:
//! 1. a trailing boolean is popped as `succeed`
//! 2. then a trailing object is popped as `options`
//! 3. whatever is left, in order, are trait names

use serde_json::{Map, Value};

use crate::domain::entities::MockRequestDescriptor;
use crate::error::HarnessError;

/// Parse `name, trait..., options?, succeed?`
pub fn normalize(args: &[Value], context: &str) -> Result<MockRequestDescriptor, HarnessError> {
    let (name, rest) = split_name(args, context)?;
    let (traits, options, succeed) = split_tail(rest, context)?;

    Ok(MockRequestDescriptor {
        fixture_name: name.to_string(),
        traits,
        options,
        succeed,
        count: None,
    })
}

/// Parse `name, count?, trait..., options?, succeed?`; count defaults to 1
pub fn normalize_list(
    args: &[Value],
    context: &str,
) -> Result<MockRequestDescriptor, HarnessError> {
    let (name, rest) = split_name(args, context)?;

    let (count, rest) = match rest.split_first() {
        Some((Value::Number(n), tail)) => {
            let count = n.as_u64().ok_or_else(|| {
                HarnessError::invalid_arguments(
                    context,
                    format!("count must be a non-negative integer, got {}", n),
                )
            })?;
            (count as usize, tail)
        }
        _ => (1, rest),
    };

    let (traits, options, succeed) = split_tail(rest, context)?;
    // Records sharing one id would collapse into a single store entry
    if count > 1 && options.contains_key("id") {
        return Err(HarnessError::invalid_arguments(
            context,
            format!("an explicit id cannot be shared by {} records", count),
        ));
    }

    Ok(MockRequestDescriptor {
        fixture_name: name.to_string(),
        traits,
        options,
        succeed,
        count: Some(count),
    })
}

fn split_name<'a>(
    args: &'a [Value],
    context: &str,
) -> Result<(&'a str, &'a [Value]), HarnessError> {
    match args.split_first() {
        Some((Value::String(name), rest)) if !name.is_empty() => Ok((name.as_str(), rest)),
        _ => Err(HarnessError::invalid_arguments(
            context,
            "needs a factory name to build",
        )),
    }
}

fn split_tail(
    args: &[Value],
    context: &str,
) -> Result<(Vec<String>, Map<String, Value>, bool), HarnessError> {
    let mut rest = args;

    let mut succeed = true;
    if let Some((Value::Bool(flag), init)) = rest.split_last() {
        succeed = *flag;
        rest = init;
    }

    let mut options = Map::new();
    if let Some((Value::Object(map), init)) = rest.split_last() {
        options = map.clone();
        rest = init;
    }

    let traits = rest
        .iter()
        .enumerate()
        .map(|(i, arg)| match arg {
            Value::String(name) => Ok(name.clone()),
            other => Err(HarnessError::invalid_arguments(
                context,
                format!("trait #{} must be a name, got {}", i + 1, other),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((traits, options, succeed))
}
