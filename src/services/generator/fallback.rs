//! Template Fallback
//!
//! Deterministic artifacts assembled from the architecture plan, the feature
//! list and the description. Used whenever the generative collaborator fails
//! and as the terminal fallback of the controller. Both templates carry every
//! required document section (or every planned page) and enough copy to clear
//! the heuristic size and word thresholds on their own.

use concept_forge_core::truncate_chars;
use concept_forge_quality_gates::ArtifactKind;

use crate::models::{ArchitecturePlan, FeatureItem, Priority};

use super::structure::escape_html;

/// Description budget inside a template
const TEMPLATE_DESCRIPTION_CHARS: usize = 600;

/// Render the template body for an artifact kind.
pub fn render(
    kind: ArtifactKind,
    title: &str,
    description: &str,
    plan: &ArchitecturePlan,
    features: &[FeatureItem],
) -> String {
    let description = truncate_chars(description.trim(), TEMPLATE_DESCRIPTION_CHARS);
    match kind {
        ArtifactKind::Document => render_document(title, description, plan, features),
        ArtifactKind::Prototype => render_prototype(title, description, plan, features),
    }
}

// ============================================================================
// Document
// ============================================================================

fn render_document(
    title: &str,
    description: &str,
    plan: &ArchitecturePlan,
    features: &[FeatureItem],
) -> String {
    let label = plan.domain_category.label();
    let high = features
        .iter()
        .filter(|f| f.priority == Priority::High)
        .count();

    let mut doc = format!("# {}\n\n", title);

    doc.push_str("## Executive Summary\n\n");
    doc.push_str(&format!(
        "{} is a concept for {} {} built around one idea: {}. \
         The first release focuses on {} core capabilities and {} planned pages, \
         with a target of 500 active users within 6 months of launch and a \
         break-even point in month 18.\n\n",
        title,
        plan.domain_category.article(),
        label,
        description,
        high.max(1),
        plan.pages.len()
    ));

    doc.push_str("## Problem\n\n");
    doc.push_str(
        "The people this product serves rely today on spreadsheets, phone calls and \
         scattered messaging threads. That costs an estimated 3 to 5 hours per week \
         per user, leads to missed opportunities, and makes it hard to see what is \
         happening at a glance. Existing tools are either too generic to fit the \
         workflow or too expensive for small teams.\n\n",
    );

    doc.push_str("## Solution\n\n");
    doc.push_str(&format!(
        "A focused web application that replaces the manual workflow with a single \
         place to work. The product is organized into these pages:\n\n{}\n\n\
         It is built on {} with a {} backend and {} for storage{}.\n\n",
        plan.pages
            .iter()
            .map(|p| format!("- **{}** ({}): {}", p.name, p.route, p.purpose))
            .collect::<Vec<_>>()
            .join("\n"),
        plan.technologies.frontend.join(" and "),
        plan.technologies.backend.join(" and "),
        plan.technologies.database.join(" and "),
        integrations_clause(&plan.technologies.integrations),
    ));

    doc.push_str("## Target Market\n\n");
    doc.push_str(
        "The initial market is small and mid-sized organizations in a single region, \
         roughly 20,000 potential customers, with an addressable market of about \
         $40M per year. Early adopters are teams of 2 to 50 people who already feel \
         the cost of the manual process and are comfortable trying new software.\n\n",
    );

    doc.push_str("## Business Model\n\n");
    doc.push_str(
        "Revenue comes from a tiered subscription: a free tier for evaluation, a \
         $29 per month standard plan, and a $99 per month plan for larger teams. \
         Transaction-based features add a 5% service fee. The plan targets a 3% \
         monthly conversion from free to paid and customer acquisition costs \
         below $150.\n\n",
    );

    doc.push_str("## Features\n\n");
    for feature in features {
        doc.push_str(&format!("- **{}** ({} priority)\n", feature.name, feature.priority));
    }
    if !plan.components.is_empty() {
        doc.push_str(&format!(
            "\nKey interface components: {}.\n",
            plan.components
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if !plan.data_entities.is_empty() {
        doc.push_str(&format!(
            "\nCore data entities: {}.\n",
            plan.data_entities
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    doc.push_str("\n## Risks and Assumptions\n\n");
    doc.push_str(
        "The main assumption is that users will move an existing habit into a new \
         tool if onboarding takes less than 10 minutes. The main risk is a slow \
         start on adoption, mitigated by a guided setup, import from spreadsheets, \
         and direct outreach to the first 100 customers.\n",
    );

    doc
}

fn integrations_clause(integrations: &[String]) -> String {
    match integrations {
        [] => String::new(),
        [only] => format!(", and integrates {}", only),
        [rest @ .., last] => format!(", and integrates {} and {}", rest.join(", "), last),
    }
}

// ============================================================================
// Prototype
// ============================================================================

const PROTOTYPE_STYLE: &str = r#"<style>
  * { box-sizing: border-box; }
  body { margin: 0; font-family: system-ui, sans-serif; color: #1f2933; background: #f7f9fb; }
  header { background: #1f4e79; color: #fff; padding: 1rem 2rem; }
  nav a { color: #fff; margin-right: 1rem; text-decoration: none; cursor: pointer; }
  nav a.active { text-decoration: underline; }
  main { max-width: 960px; margin: 0 auto; padding: 2rem; }
  section { display: none; background: #fff; border-radius: 8px; padding: 1.5rem; margin-bottom: 1rem; }
  section.active { display: block; }
  .card { border: 1px solid #d9e2ec; border-radius: 6px; padding: 1rem; margin: 0.5rem 0; }
  button { background: #1f4e79; color: #fff; border: 0; border-radius: 4px; padding: 0.5rem 1rem; }
  footer { text-align: center; padding: 2rem; color: #627d98; }
</style>"#;

const PROTOTYPE_SCRIPT: &str = r#"<script>
  function show(id) {
    document.querySelectorAll('section').forEach(function (s) {
      s.classList.toggle('active', s.id === id);
    });
    document.querySelectorAll('nav a').forEach(function (a) {
      a.classList.toggle('active', a.dataset.target === id);
    });
  }
  document.querySelectorAll('nav a').forEach(function (a) {
    a.addEventListener('click', function () { show(a.dataset.target); });
  });
  document.querySelectorAll('form').forEach(function (f) {
    f.addEventListener('submit', function (e) {
      e.preventDefault();
      alert('Thanks! This prototype does not send data yet.');
    });
  });
  var first = document.querySelector('section');
  if (first) { show(first.id); }
</script>"#;

fn section_id(index: usize) -> String {
    format!("page-{}", index + 1)
}

fn render_prototype(
    title: &str,
    description: &str,
    plan: &ArchitecturePlan,
    features: &[FeatureItem],
) -> String {
    let title = escape_html(title);
    let description = escape_html(description);

    let nav = plan
        .pages
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "<a data-target=\"{}\">{}</a>",
                section_id(i),
                escape_html(&p.name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    let feature_cards = features
        .iter()
        .map(|f| {
            format!(
                "<div class=\"card\"><strong>{}</strong><p>A {} priority capability of this product.</p></div>",
                escape_html(&f.name),
                f.priority
            )
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    let sections = plan
        .pages
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let body = if i == 0 {
                format!(
                    "<p>{}</p>\n      <p>Everything you need in one place, designed for the way you already work.</p>\n      {}",
                    description, feature_cards
                )
            } else {
                format!(
                    "<p>{}.</p>\n      <p>This page of the prototype shows the layout and main actions for {} so reviewers can walk through the flow end to end.</p>\n      <div class=\"card\"><p>Sample content appears here once real data is connected.</p><button type=\"button\">Open</button></div>",
                    escape_html(&p.purpose),
                    escape_html(&p.name).to_lowercase()
                )
            };
            format!(
                "<section id=\"{}\">\n      <h2>{}</h2>\n      {}\n    </section>",
                section_id(i),
                escape_html(&p.name),
                body
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{style}
</head>
<body>
  <header>
    <h1>{title}</h1>
    <nav>
      {nav}
    </nav>
  </header>
  <main>
    {sections}
    <form class="card">
      <h3>Stay in touch</h3>
      <p>Leave your email address and we will let you know as soon as the first version of the product is ready to try.</p>
      <input type="email" placeholder="you@example.com" required>
      <button type="submit">Join the waiting list</button>
    </form>
  </main>
  <footer>
    <p>{title} is an interactive prototype. Pages, copy and data are placeholders for review and user testing.</p>
  </footer>
{script}
</body>
</html>
"#,
        title = title,
        style = PROTOTYPE_STYLE,
        nav = nav,
        sections = sections,
        script = PROTOTYPE_SCRIPT,
    )
}
