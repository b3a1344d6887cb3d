//! Provider registry. Static, ordered; the order is the tie-break order of the timeline.

use super::entities::{FieldKind, FieldSpec, ProviderDescriptor};
use super::errors::DomainError;
use std::collections::HashSet;

const USERNAME_PASSWORD: &[FieldSpec] = &[
    FieldSpec {
        name: "username",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "password",
        kind: FieldKind::Password,
    },
];

const EMAIL_PASSWORD: &[FieldSpec] = &[
    FieldSpec {
        name: "email",
        kind: FieldKind::Email,
    },
    FieldSpec {
        name: "password",
        kind: FieldKind::Password,
    },
];

const STUDENTID_PASSWORD: &[FieldSpec] = &[
    FieldSpec {
        name: "studentid",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "password",
        kind: FieldKind::Password,
    },
];

/// Built-in providers, in display and merge order.
pub const PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        name: "Hydro",
        description: "Hydro OJ's Homework, using ShanghaiTech ACM",
        endpoint: "/api/hydro",
        fields: USERNAME_PASSWORD,
    },
    ProviderDescriptor {
        name: "Gradescope",
        description: "Gradescope assignments, based on gradescope-tool",
        endpoint: "/api/gradescope",
        fields: EMAIL_PASSWORD,
    },
    ProviderDescriptor {
        name: "Blackboard",
        description: "ShanghaiTech blackboard",
        endpoint: "/api/blackboard",
        fields: STUDENTID_PASSWORD,
    },
];

/// Checks registry invariants: unique provider names, non-empty field lists,
/// unique field names within a provider.
pub fn validate(registry: &[ProviderDescriptor]) -> Result<(), DomainError> {
    let mut names = HashSet::new();
    for d in registry {
        if !names.insert(d.name) {
            return Err(DomainError::Config(format!(
                "duplicate provider name '{}'",
                d.name
            )));
        }
        if d.fields.is_empty() {
            return Err(DomainError::Config(format!(
                "provider '{}' declares no credential fields",
                d.name
            )));
        }
        let mut fields = HashSet::new();
        for f in d.fields {
            if !fields.insert(f.name) {
                return Err(DomainError::Config(format!(
                    "provider '{}' declares field '{}' twice",
                    d.name, f.name
                )));
            }
        }
    }
    Ok(())
}

/// Look up a provider by name.
pub fn find<'a>(registry: &'a [ProviderDescriptor], name: &str) -> Option<&'a ProviderDescriptor> {
    registry.iter().find(|d| d.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_is_valid() {
        assert!(validate(PROVIDERS).is_ok());
        let names: Vec<_> = PROVIDERS.iter().map(|d| d.name).collect();
        assert_eq!(names, ["Hydro", "Gradescope", "Blackboard"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        const DUP: &[FieldSpec] = &[
            FieldSpec {
                name: "password",
                kind: FieldKind::Password,
            },
            FieldSpec {
                name: "password",
                kind: FieldKind::Text,
            },
        ];
        let registry = [ProviderDescriptor {
            name: "X",
            description: "",
            endpoint: "/x",
            fields: DUP,
        }];
        assert!(matches!(validate(&registry), Err(DomainError::Config(_))));
    }

    #[test]
    fn test_empty_fields_and_duplicate_names_rejected() {
        let empty = [ProviderDescriptor {
            name: "X",
            description: "",
            endpoint: "/x",
            fields: &[],
        }];
        assert!(validate(&empty).is_err());

        let twice = [PROVIDERS[0].clone(), PROVIDERS[0].clone()];
        assert!(validate(&twice).is_err());
    }

    #[test]
    fn test_find() {
        assert_eq!(find(PROVIDERS, "Gradescope").map(|d| d.endpoint), Some("/api/gradescope"));
        assert!(find(PROVIDERS, "Canvas").is_none());
    }
}
