//! Public member enumeration.

use std::collections::{BTreeSet, HashSet};

use stubgen_manifest::{CallableDef, ClassSurface, MemberDef};

/// Names starting with this prefix are private and never stubbed.
pub const PRIVATE_PREFIX: &str = "_";

/// A public member selected for stubbing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Member<'a> {
    Callable { name: &'a str, def: &'a CallableDef },
    Attribute { name: &'a str },
}

impl Member<'_> {
    /// Get the member name.
    pub fn name(&self) -> &str {
        match self {
            Self::Callable { name, .. } | Self::Attribute { name } => name,
        }
    }
}

/// List the public members of a class surface in declared order.
///
/// Private names and names in `exclude` are skipped, and a name is yielded
/// at most once.
pub fn public_members<'a>(surface: &'a ClassSurface, exclude: &BTreeSet<String>) -> Vec<Member<'a>> {
    let mut seen = HashSet::new();

    surface
        .members
        .iter()
        .filter(|member| {
            let name = member.name();
            !name.starts_with(PRIVATE_PREFIX) && !exclude.contains(name)
        })
        .filter(|member| seen.insert(member.name()))
        .map(|member| match member {
            MemberDef::Callable(def) => Member::Callable {
                name: &def.name,
                def,
            },
            MemberDef::Attribute(def) => Member::Attribute { name: &def.name },
        })
        .collect()
}
