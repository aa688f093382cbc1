//! Composable WGSL shader snippets.
//!
//! Shader sources are versioned files under `shaders/`, each a named snippet
//! with explicit dependency declarations. [`compose`] assembles a set into a
//! single compilation unit, dependencies first. Hosts can swap individual
//! snippets (the horizon test in particular) for their own implementation
//! with the same interface.

use crate::core::error::Error;
use crate::core::types::Result;

/// A named WGSL source fragment with declared dependencies.
#[derive(Clone, Copy, Debug)]
pub struct Snippet {
    pub name: &'static str,
    pub requires: &'static [&'static str],
    pub source: &'static str,
}

/// Common uniform block and bindings for the moon pass.
pub const UNIFORMS: Snippet = Snippet {
    name: "uniforms",
    requires: &[],
    source: include_str!("../../shaders/uniforms.wgsl"),
};

/// Planar below-horizon predicate.
pub const HORIZON: Snippet = Snippet {
    name: "horizon",
    requires: &[],
    source: include_str!("../../shaders/horizon.wgsl"),
};

/// Moon disc vertex and fragment entry points.
pub const MOON: Snippet = Snippet {
    name: "moon",
    requires: &["uniforms", "horizon"],
    source: include_str!("../../shaders/moon.wgsl"),
};

/// Assemble snippets into one compilation unit, dependencies first.
///
/// Fails on duplicate names, requirements that are not part of the set, and
/// cyclic dependencies.
pub fn compose(snippets: &[Snippet]) -> Result<String> {
    for (i, s) in snippets.iter().enumerate() {
        if snippets[..i].iter().any(|o| o.name == s.name) {
            return Err(Error::Shader(format!("duplicate shader snippet '{}'", s.name)));
        }
        for req in s.requires {
            if !snippets.iter().any(|o| o.name == *req) {
                return Err(Error::Shader(format!(
                    "snippet '{}' requires unknown snippet '{req}'",
                    s.name
                )));
            }
        }
    }

    let mut out = String::new();
    let mut emitted: Vec<&str> = Vec::new();
    let mut pending: Vec<&Snippet> = snippets.iter().collect();

    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|s| {
            if s.requires.iter().all(|r| emitted.contains(r)) {
                out.push_str(s.source);
                out.push('\n');
                emitted.push(s.name);
                false
            } else {
                true
            }
        });
        if pending.len() == before {
            let stuck: Vec<&str> = pending.iter().map(|s| s.name).collect();
            return Err(Error::Shader(format!(
                "cyclic shader snippet dependencies among {stuck:?}"
            )));
        }
    }

    Ok(out)
}

/// The complete moon shader, ready for compilation.
pub fn moon_shader_source() -> Result<String> {
    compose(&[MOON, UNIFORMS, HORIZON])
}
