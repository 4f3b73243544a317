//! Placeholder substitution for shader body files.
//!
//! A body file refers to schema names as `{{attributes.position}}`,
//! `{{uniforms.view}}`, `{{varyings.color}}` or `{{textures.albedo}}`.
//! Each placeholder is replaced with the prefixed identifier from the
//! stage's name tables. Only the tables visible to a stage resolve: the
//! vertex stage has no textures, the fragment stage has no attributes and
//! its `uniforms` are the fragment uniforms.

use crate::error::CliError;
use std::collections::BTreeMap;
use typed_gl_core::shader::NameTable;
use typed_gl_core::{FragmentNames, ProgramSchema, VertexNames};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Name tables a body can reference, keyed by placeholder section.
pub struct Scope<'a> {
    stage: &'static str,
    tables: BTreeMap<&'static str, &'a NameTable>,
}

impl<'a> Scope<'a> {
    pub fn vertex(names: &'a VertexNames) -> Self {
        Self {
            stage: "vertex",
            tables: BTreeMap::from([
                ("attributes", &names.attributes),
                ("uniforms", &names.uniforms),
                ("varyings", &names.varyings),
            ]),
        }
    }

    pub fn fragment(names: &'a FragmentNames) -> Self {
        Self {
            stage: "fragment",
            tables: BTreeMap::from([
                ("uniforms", &names.uniforms),
                ("varyings", &names.varyings),
                ("textures", &names.textures),
            ]),
        }
    }

    fn resolve(&self, key: &str) -> Option<&'a str> {
        let (section, name) = key.split_once('.')?;
        self.tables
            .get(section)
            .copied()
            .and_then(|table| table.get(name))
            .map(String::as_str)
    }
}

/// Replaces every placeholder in `template`.
pub fn render(template: &str, scope: &Scope<'_>) -> Result<String, CliError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let end = after.find(CLOSE).ok_or_else(|| {
            CliError::Input(format!(
                "unterminated placeholder in {} body: '{}'",
                scope.stage,
                first_line(&rest[start..])
            ))
        })?;
        let key = after[..end].trim();
        let ident = scope.resolve(key).ok_or_else(|| {
            CliError::Input(format!(
                "unknown placeholder '{{{{{key}}}}}' in {} body",
                scope.stage
            ))
        })?;
        out.push_str(ident);
        rest = &after[end + CLOSE.len()..];
    }
    out.push_str(rest);
    Ok(out)
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or(s)
}

/// Checks that every schema name forms a valid GLSL identifier once
/// prefixed.
pub fn validate_names(schema: &ProgramSchema) -> Result<(), CliError> {
    let tables: [(&str, Vec<&String>); 5] = [
        ("attribute", schema.attributes.keys().collect()),
        ("uniform", schema.uniforms.keys().collect()),
        ("fragment uniform", schema.fragment_uniforms.keys().collect()),
        ("varying", schema.varyings.keys().collect()),
        ("texture", schema.textures.keys().collect()),
    ];
    for (role, names) in tables {
        for name in names {
            if !is_identifier_tail(name) {
                return Err(CliError::Assembly(format!(
                    "{role} name '{name}' is not a valid GLSL identifier"
                )));
            }
        }
    }
    Ok(())
}

/// Whether `name` may follow a role prefix such as `a_`.
fn is_identifier_tail(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('_')
        && !name.contains("__")
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
