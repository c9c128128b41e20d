//! Variable-name allocation for a single generation run.

use std::collections::{HashMap, HashSet};

/// Collision-free name allocator. One instance per `generate` call; its maps
/// are the only mutable state in the whole pipeline and are discarded with it.
#[derive(Debug, Default)]
pub struct Context {
    /// Per-sanitized-kind counters for ref-less nodes.
    type_counters: HashMap<String, u32>,
    /// First variable assigned to each ref, kept for later lookup.
    ref_to_var: HashMap<String, String>,
    /// Every name handed out this run, ref-derived or counted.
    used: HashSet<String>,
}

/// Outcome of a name request. `renamed` is set when a duplicate ref had to
/// be suffixed to stay unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarName {
    pub name: String,
    pub renamed: bool,
}

impl Context {
    pub fn new() -> Self {
        Context::default()
    }

    pub fn next_var(&mut self, kind: &str, ref_: Option<&str>) -> VarName {
        if let Some(requested) = ref_ {
            let mut name = requested.to_string();
            let mut suffix = 1u32;
            while self.used.contains(&name) {
                name = format!("{requested}_{suffix}");
                suffix += 1;
            }
            // First assignment wins the lookup entry.
            self.ref_to_var
                .entry(requested.to_string())
                .or_insert_with(|| name.clone());
            self.used.insert(name.clone());
            let renamed = name != requested;
            return VarName { name, renamed };
        }

        let base = sanitize_kind(kind);
        let mut attempt = self.type_counters.get(&base).copied().unwrap_or(0);
        let mut name = format!("{base}_{attempt}");
        // Step over anything already reserved, e.g. by an explicit ref. The
        // counter may go non-contiguous here; only uniqueness matters.
        while self.used.contains(&name) {
            attempt += 1;
            name = format!("{base}_{attempt}");
        }
        self.type_counters.insert(base, attempt + 1);
        self.used.insert(name.clone());
        VarName { name, renamed: false }
    }

    /// Variable assigned to `ref_` earlier in the run, if any.
    pub fn var_by_ref(&self, ref_: &str) -> Option<&str> {
        self.ref_to_var.get(ref_).map(String::as_str)
    }
}

/// kebab-case / snake_case tag → camelCase identifier.
fn sanitize_kind(kind: &str) -> String {
    let mut out = String::with_capacity(kind.len());
    let mut upper_next = false;
    for ch in kind.chars() {
        match ch {
            '-' | '_' => upper_next = true,
            _ if upper_next => {
                out.extend(ch.to_uppercase());
                upper_next = false;
            }
            _ => out.push(ch),
        }
    }
    out
}
