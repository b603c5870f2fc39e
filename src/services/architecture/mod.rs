//! Architecture Synthesizer
//!
//! Derives an `ArchitecturePlan` from a domain category and feature list.
//! Pure table lookup plus light merge logic: no I/O, no randomness, same
//! inputs always yield the same plan.

pub mod templates;

use std::collections::HashSet;

use crate::models::{
    ArchitecturePlan, ComponentSpec, DomainCategory, EntitySpec, FeatureItem, PageSpec,
    TechnologyBundle,
};

use templates::{template_for, ComponentTemplate, COMPONENT_TRIGGERS};

/// Build the plan for a category and its features.
pub fn synthesize(category: DomainCategory, features: &[FeatureItem]) -> ArchitecturePlan {
    let template = template_for(category);

    let pages = template
        .pages
        .iter()
        .map(|p| PageSpec {
            name: p.name.to_string(),
            route: p.route.to_string(),
            purpose: p.purpose.to_string(),
        })
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut components: Vec<ComponentSpec> = Vec::new();
    let mut push = |component: &ComponentTemplate| {
        if seen.insert(component.name) {
            components.push(ComponentSpec {
                name: component.name.to_string(),
                purpose: component.purpose.to_string(),
            });
        }
    };

    for component in template.components {
        push(component);
    }
    for feature in features {
        for trigger in triggered_by(&feature.name) {
            push(&trigger.component);
        }
    }

    let data_entities = template
        .entities
        .iter()
        .map(|e| EntitySpec {
            name: e.name.to_string(),
            fields: e.fields.iter().map(|f| f.to_string()).collect(),
        })
        .collect();

    let to_strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let technologies = TechnologyBundle {
        frontend: to_strings(template.frontend),
        backend: to_strings(template.backend),
        database: to_strings(template.database),
        integrations: to_strings(template.integrations),
    };

    ArchitecturePlan {
        domain_category: template.category,
        pages,
        components,
        technologies,
        data_entities,
    }
}

/// Triggers matching a feature name, in table order.
///
/// A trigger matches when some word of the name starts with it.
fn triggered_by(feature_name: &str) -> impl Iterator<Item = &'static templates::ComponentTrigger> {
    let lower = feature_name.to_lowercase();
    let words: Vec<String> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect();

    COMPONENT_TRIGGERS
        .iter()
        .filter(move |t| words.iter().any(|w| w.starts_with(t.trigger)))
}
