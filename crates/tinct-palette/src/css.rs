// ABOUTME: Serializes the semantic palette as CSS custom properties and rule sets
// ABOUTME: Rule sets bind each context/component class to its variables and role aliases

use std::fmt;

use crate::roles::{
    ContextName, InkRole, InteractionState, StatefulComponent, StaticComponent, TokenOwner,
};
use crate::semantic::SemanticColorPalette;
use crate::token::{ColorToken, StatefulRole, SurfaceRole};

/// One declaration per token inside a single `selector { ... }` block.
pub fn to_css_text(palette: &SemanticColorPalette, selector: &str) -> String {
    let mut css = format!("{selector} {{\n");
    for token in ColorToken::all() {
        css.push_str(&format!(
            "  {}: {};\n",
            token.css_variable(),
            palette.get(token).to_css()
        ));
    }
    css.push_str("}\n");
    css
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRuleSet {
    pub owner: TokenOwner,
    /// `None` for contexts and static components.
    pub state: Option<InteractionState>,
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl CssRuleSet {
    /// Value bound to `property`, if the rule set declares it.
    pub fn declaration(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for CssRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            writeln!(f, "  {property}: {value};")?;
        }
        writeln!(f, "}}")
    }
}

fn var(token: ColorToken) -> String {
    format!("var({})", token.css_variable())
}

fn state_selector(class: &str, state: InteractionState) -> String {
    match state {
        InteractionState::Default => format!(".{class}"),
        InteractionState::Hover => format!(".{class}:hover"),
        InteractionState::Active => format!(".{class}:active"),
        InteractionState::Disabled => {
            format!(".{class}:disabled, .{class}[disabled], .{class}.is-disabled")
        }
    }
}

fn surface_rule_set(owner: TokenOwner, token: impl Fn(SurfaceRole) -> ColorToken) -> CssRuleSet {
    let mut declarations = vec![
        ("background-color".to_string(), var(token(SurfaceRole::Surface))),
        ("color".to_string(), var(token(SurfaceRole::Ink(InkRole::Body)))),
        (
            "border-color".to_string(),
            var(token(SurfaceRole::Ink(InkRole::Border))),
        ),
    ];
    declarations.extend(
        SurfaceRole::all().map(|role| (format!("--{}", role.as_str()), var(token(role)))),
    );

    CssRuleSet {
        owner,
        state: None,
        selector: format!(".{}", owner.class_name()),
        declarations,
    }
}

fn stateful_rule_set(component: StatefulComponent, state: InteractionState) -> CssRuleSet {
    let owner = TokenOwner::Stateful(component);
    let token = |role| ColorToken::Stateful {
        component,
        role,
        state,
    };

    let mut declarations = vec![
        ("background-color".to_string(), var(token(StatefulRole::Surface))),
        ("color".to_string(), var(token(StatefulRole::Title))),
        ("border-color".to_string(), var(token(StatefulRole::Border))),
    ];
    declarations.extend(
        StatefulRole::ALL
            .iter()
            .map(|role| (format!("--{}", role.as_str()), var(token(*role)))),
    );

    CssRuleSet {
        owner,
        state: Some(state),
        selector: state_selector(&owner.class_name(), state),
        declarations,
    }
}

/// Class-to-property bindings for every context and component. Independent
/// of seed colors, so callers typically emit them once.
pub fn collect_css_rule_sets() -> Vec<CssRuleSet> {
    let mut rule_sets = Vec::new();

    for &context in ContextName::ALL {
        rule_sets.push(surface_rule_set(TokenOwner::Context(context), |role| {
            ColorToken::Context { context, role }
        }));
    }
    for &component in StaticComponent::ALL {
        rule_sets.push(surface_rule_set(TokenOwner::Component(component), |role| {
            ColorToken::Component { component, role }
        }));
    }
    for &component in StatefulComponent::ALL {
        for &state in InteractionState::ALL {
            rule_sets.push(stateful_rule_set(component, state));
        }
    }

    rule_sets
}

/// All rule sets as CSS text, separated by blank lines.
pub fn to_css_rule_sets_text() -> String {
    collect_css_rule_sets()
        .iter()
        .map(|rule_set| rule_set.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_rule_set_binds_body_and_aliases() {
        let rule_sets = collect_css_rule_sets();
        let canvas = rule_sets
            .iter()
            .find(|r| r.owner == TokenOwner::Context(ContextName::Canvas))
            .unwrap();
        assert_eq!(canvas.selector, ".context-canvas");
        assert_eq!(
            canvas.declaration("background-color"),
            Some("var(--context-canvas-surface)")
        );
        assert_eq!(canvas.declaration("color"), Some("var(--context-canvas-body)"));
        assert_eq!(canvas.declaration("--link-text"), Some("var(--context-canvas-link-text)"));
        assert_eq!(canvas.declaration("--tint-surface"), Some("var(--context-canvas-tint-surface)"));
        assert_eq!(canvas.declaration("--accent"), Some("var(--context-canvas-accent)"));
        assert_eq!(canvas.declarations.len(), 3 + 10);
    }

    #[test]
    fn test_stateful_component_has_four_rule_sets() {
        let rule_sets = collect_css_rule_sets();
        let action: Vec<&CssRuleSet> = rule_sets
            .iter()
            .filter(|r| r.owner == TokenOwner::Stateful(StatefulComponent::Action))
            .collect();
        assert_eq!(action.len(), 4);

        let selectors: Vec<&str> = action.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors[0], ".component-action");
        assert_eq!(selectors[1], ".component-action:hover");
        assert_eq!(selectors[2], ".component-action:active");
        let disabled = selectors[3];
        assert!(disabled.contains(".component-action:disabled"));
        assert!(disabled.contains(".component-action[disabled]"));
        assert!(disabled.contains(".component-action.is-disabled"));
        assert_eq!(disabled.matches(", ").count(), 2);

        let hover = action[1];
        assert_eq!(hover.state, Some(InteractionState::Hover));
        assert_eq!(hover.declaration("color"), Some("var(--component-action-title-hover)"));
        assert_eq!(
            hover.declaration("--surface"),
            Some("var(--component-action-surface-hover)")
        );
        assert_eq!(hover.declaration("--meta"), None);
    }

    #[test]
    fn test_rule_set_count() {
        // 6 static owners + 2 stateful x 4 states
        assert_eq!(collect_css_rule_sets().len(), 6 + 8);
    }

    #[test]
    fn test_rule_sets_text_is_stable() {
        let text = to_css_rule_sets_text();
        assert_eq!(text, to_css_rule_sets_text());
        assert!(text.starts_with(".context-canvas {\n  background-color: var(--context-canvas-surface);\n"));
        assert!(text.contains("}\n\n.context-section-neutral {\n"));
        assert!(text.ends_with("}\n"));
    }
}
