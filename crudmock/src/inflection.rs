//! String inflections for model type names and payload keys
//!
//! Client stores use camelCase attribute names, ActiveModel-style APIs use
//! snake_case, and resource paths are pluralized.

use std::sync::OnceLock;

use heck::{ToLowerCamelCase, ToSnakeCase};
use inflector::string::{pluralize::to_plural, singularize::to_singular};
use regex::Regex;

fn decamelize_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z\d])([A-Z])").expect("decamelize pattern is valid"))
}

/// `firstName` -> `first_name`, `innerHTML` -> `inner_html`
///
/// Only a lowercase letter or digit followed by an uppercase letter starts a
/// new word. Runs of capitals stay together, which is what snake_case APIs
/// expect for keys like `innerHTML`.
pub fn decamelize(s: &str) -> String {
    decamelize_re().replace_all(s, "${1}_${2}").to_lowercase()
}

/// `first_name` -> `firstName`, `css-class-name` -> `cssClassName`
pub fn camelize(s: &str) -> String {
    s.to_lower_camel_case()
}

/// `projectUser` -> `project_user`, `project-user` -> `project_user`
pub fn underscore(s: &str) -> String {
    s.to_snake_case()
}

pub fn pluralize(word: &str) -> String {
    to_plural(word)
}

pub fn singularize(word: &str) -> String {
    to_singular(word)
}
