use std::fmt::Write;

use crate::services::SchemaRegistry;

/// Render a `.env.example` for the schema.
///
/// Keys are grouped in registration order. Secrets and required keys without
/// a default are left empty so the file never carries a credential.
pub fn render_env_template(schema: &SchemaRegistry) -> String {
    let mut out = String::new();
    let mut current_group: Option<&str> = None;

    for key in schema.keys() {
        if current_group != Some(key.group.as_str()) {
            if current_group.is_some() {
                out.push('\n');
            }
            let _ = writeln!(out, "# --- {} ---", key.group);
            current_group = Some(key.group.as_str());
        }

        let mut notes = vec![key.key_type.to_string()];
        notes.push(if key.required { "required" } else { "optional" }.to_string());
        if key.is_sensitive() {
            notes.push("secret".to_string());
        }
        if key.description.is_empty() {
            let _ = writeln!(out, "# ({})", notes.join(", "));
        } else {
            let _ = writeln!(out, "# {} ({})", key.description, notes.join(", "));
        }

        let value = match &key.default {
            // Templated secrets are safe to print; literal ones are not
            Some(default) if !key.is_sensitive() || default.contains("${") => default.as_str(),
            _ => "",
        };
        let _ = writeln!(out, "{}={}", key.name, value);
    }

    out
}
