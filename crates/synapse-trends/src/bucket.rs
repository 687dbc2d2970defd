//! Synonym bucketing: collapse known alias groups into one canonical topic.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::normalize::normalize_label;

/// An alias group: every member maps to `canonical`.
pub struct AliasGroup {
    pub canonical: &'static str,
    pub members: &'static [&'static str],
}

/// Static alias table. Extend here; the lookup is built from it.
pub const ALIAS_GROUPS: &[AliasGroup] = &[
    AliasGroup {
        canonical: "ia",
        members: &["ia", "ai", "llm", "gpt", "chatgpt", "llama", "mistral", "qwen", "phi"],
    },
    AliasGroup {
        canonical: "backend",
        members: &["backend", "api", "spring", "springboot", "java", "node", "express"],
    },
    AliasGroup {
        canonical: "frontend",
        members: &["frontend", "react", "ui", "ux"],
    },
    AliasGroup {
        canonical: "devops",
        members: &["devops", "docker", "kubernetes", "k8s", "ci", "cd"],
    },
    AliasGroup {
        canonical: "seguridad",
        members: &["seguridad", "security", "ciberseguridad", "auth", "oauth", "jwt"],
    },
];

/// Member → canonical lookup.
static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for group in ALIAS_GROUPS {
        for member in group.members {
            m.insert(*member, group.canonical);
        }
    }
    m
});

/// Map a raw label or token to its topic. `None` when nothing survives
/// normalization.
pub fn bucket_topic(raw: &str) -> Option<String> {
    let normalized = normalize_label(raw);
    if normalized.is_empty() {
        return None;
    }
    match ALIASES.get(normalized.as_str()) {
        Some(canonical) => Some((*canonical).to_string()),
        None => Some(normalized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_collapse() {
        assert_eq!(bucket_topic("GPT").as_deref(), Some("ia"));
        assert_eq!(bucket_topic("llama").as_deref(), Some("ia"));
        assert_eq!(bucket_topic("Kubernetes").as_deref(), Some("devops"));
        assert_eq!(bucket_topic("OAuth").as_deref(), Some("seguridad"));
    }

    #[test]
    fn test_unmapped_passes_through_normalized() {
        assert_eq!(bucket_topic("Música").as_deref(), Some("musica"));
        assert_eq!(bucket_topic("rust").as_deref(), Some("rust"));
    }

    #[test]
    fn test_empty_after_normalization() {
        assert_eq!(bucket_topic(""), None);
        assert_eq!(bucket_topic("¡¿?!"), None);
    }

    #[test]
    fn test_members_belong_to_one_group() {
        let total: usize = ALIAS_GROUPS.iter().map(|g| g.members.len()).sum();
        assert_eq!(ALIASES.len(), total);
    }
}
