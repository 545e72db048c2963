// ABOUTME: Typed addressing for every semantic color and its CSS custom property name
// ABOUTME: Parsing a token name fails loudly instead of yielding nothing

use std::fmt;
use std::str::FromStr;
use tinct_types::Oklch;

use crate::error::TokenParseError;
use crate::roles::{
    ContextName, InkRole, InteractionState, StatefulComponent, StaticComponent, TokenOwner,
};
use crate::semantic::{SemanticColorPalette, StatefulTokens, SurfaceTokens};

/// A role on a context or static component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SurfaceRole {
    Surface,
    TintSurface,
    Accent,
    Ink(InkRole),
}

impl SurfaceRole {
    pub fn all() -> impl Iterator<Item = SurfaceRole> {
        [
            SurfaceRole::Surface,
            SurfaceRole::TintSurface,
            SurfaceRole::Accent,
        ]
        .into_iter()
        .chain(InkRole::ALL.iter().map(|role| SurfaceRole::Ink(*role)))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceRole::Surface => "surface",
            SurfaceRole::TintSurface => "tint-surface",
            SurfaceRole::Accent => "accent",
            SurfaceRole::Ink(role) => role.as_str(),
        }
    }
}

impl FromStr for SurfaceRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surface" => Ok(SurfaceRole::Surface),
            "tint-surface" => Ok(SurfaceRole::TintSurface),
            "accent" => Ok(SurfaceRole::Accent),
            other => other
                .parse()
                .map(SurfaceRole::Ink)
                .map_err(|_| format!("'{other}' is not a surface or ink role")),
        }
    }
}

/// A role on a stateful component: its surface or one of the stateful inks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatefulRole {
    Surface,
    Title,
    Border,
    LinkText,
}

impl StatefulRole {
    pub const ALL: [StatefulRole; 4] = [
        StatefulRole::Surface,
        StatefulRole::Title,
        StatefulRole::Border,
        StatefulRole::LinkText,
    ];

    pub fn ink_role(&self) -> Option<InkRole> {
        match self {
            StatefulRole::Surface => None,
            StatefulRole::Title => Some(InkRole::Title),
            StatefulRole::Border => Some(InkRole::Border),
            StatefulRole::LinkText => Some(InkRole::LinkText),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.ink_role().map_or("surface", |role| role.as_str())
    }
}

impl FromStr for StatefulRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatefulRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("'{s}' is not a stateful role"))
    }
}

/// Address of one color in a [`SemanticColorPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorToken {
    Context {
        context: ContextName,
        role: SurfaceRole,
    },
    Component {
        component: StaticComponent,
        role: SurfaceRole,
    },
    Stateful {
        component: StatefulComponent,
        role: StatefulRole,
        state: InteractionState,
    },
}

impl ColorToken {
    /// Every token, in declaration order.
    pub fn all() -> Vec<ColorToken> {
        let mut tokens = Vec::new();
        for context in ContextName::ALL {
            tokens.extend(SurfaceRole::all().map(|role| ColorToken::Context {
                context: *context,
                role,
            }));
        }
        for component in StaticComponent::ALL {
            tokens.extend(SurfaceRole::all().map(|role| ColorToken::Component {
                component: *component,
                role,
            }));
        }
        for component in StatefulComponent::ALL {
            for role in StatefulRole::ALL {
                for state in InteractionState::ALL {
                    tokens.push(ColorToken::Stateful {
                        component: *component,
                        role,
                        state: *state,
                    });
                }
            }
        }
        tokens
    }

    pub fn owner(&self) -> TokenOwner {
        match self {
            ColorToken::Context { context, .. } => TokenOwner::Context(*context),
            ColorToken::Component { component, .. } => TokenOwner::Component(*component),
            ColorToken::Stateful { component, .. } => TokenOwner::Stateful(*component),
        }
    }

    /// Custom property name, e.g. `--component-action-surface-hover`.
    pub fn css_variable(&self) -> String {
        format!("--{self}")
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorToken::Context { role, .. } | ColorToken::Component { role, .. } => {
                write!(f, "{}-{}", self.owner(), role.as_str())
            }
            ColorToken::Stateful { role, state, .. } => {
                write!(f, "{}-{}-{}", self.owner(), role.as_str(), state)
            }
        }
    }
}

impl FromStr for ColorToken {
    type Err = TokenParseError;

    /// Parses the custom property form with or without the leading `--`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("--").unwrap_or(s);
        if !name.starts_with("context-") && !name.starts_with("component-") {
            return Err(TokenParseError::UnknownPrefix(s.to_string()));
        }

        // Longest owner first so `card-flat-…` is not read as `card` + `flat-…`
        let mut owners = TokenOwner::all();
        owners.sort_by_key(|owner| std::cmp::Reverse(owner.name().len()));
        let (owner, rest) = owners
            .into_iter()
            .find_map(|owner| {
                name.strip_prefix(owner.class_name().as_str())
                    .and_then(|rest| rest.strip_prefix('-'))
                    .map(|rest| (owner, rest))
            })
            .ok_or_else(|| TokenParseError::UnknownOwner(s.to_string()))?;

        let invalid = |reason: String| TokenParseError::InvalidRole {
            token: s.to_string(),
            reason,
        };

        match owner {
            TokenOwner::Context(context) => Ok(ColorToken::Context {
                context,
                role: rest.parse().map_err(invalid)?,
            }),
            TokenOwner::Component(component) => Ok(ColorToken::Component {
                component,
                role: rest.parse().map_err(invalid)?,
            }),
            TokenOwner::Stateful(component) => {
                let (role, state) = rest
                    .rsplit_once('-')
                    .ok_or_else(|| invalid(format!("'{rest}' has no interaction state")))?;
                let state = state
                    .parse()
                    .map_err(|e: crate::error::KeyParseError| invalid(e.to_string()))?;
                Ok(ColorToken::Stateful {
                    component,
                    role: role.parse().map_err(invalid)?,
                    state,
                })
            }
        }
    }
}

impl SurfaceTokens {
    pub fn get(&self, role: SurfaceRole) -> Oklch {
        match role {
            SurfaceRole::Surface => self.surface,
            SurfaceRole::TintSurface => self.tint_surface,
            SurfaceRole::Accent => self.accent,
            SurfaceRole::Ink(role) => *self.ink.get(role),
        }
    }
}

impl StatefulTokens {
    pub fn get(&self, role: StatefulRole, state: InteractionState) -> Oklch {
        let states = match role {
            StatefulRole::Surface => &self.surface,
            StatefulRole::Title => &self.ink.title,
            StatefulRole::Border => &self.ink.border,
            StatefulRole::LinkText => &self.ink.link_text,
        };
        *states.get(state)
    }
}

impl SemanticColorPalette {
    /// The color a token addresses. Total over [`ColorToken`].
    pub fn get(&self, token: ColorToken) -> Oklch {
        match token {
            ColorToken::Context { context, role } => self.context(context).get(role),
            ColorToken::Component { component, role } => self.component(component).get(role),
            ColorToken::Stateful {
                component,
                role,
                state,
            } => self.stateful(component).get(role, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_count() {
        // 6 surface entries x (2 surfaces + accent + 7 inks) + 2 stateful x 4 roles x 4 states
        let tokens = ColorToken::all();
        assert_eq!(tokens.len(), 6 * 10 + 2 * 4 * 4);
        let unique: HashSet<_> = tokens.iter().map(|t| t.css_variable()).collect();
        assert_eq!(unique.len(), tokens.len());
    }

    #[test]
    fn test_css_variable_names() {
        let token = ColorToken::Context {
            context: ContextName::Canvas,
            role: SurfaceRole::Surface,
        };
        assert_eq!(token.css_variable(), "--context-canvas-surface");

        let token = ColorToken::Component {
            component: StaticComponent::CardFlat,
            role: SurfaceRole::Ink(InkRole::LinkText),
        };
        assert_eq!(token.css_variable(), "--component-card-flat-link-text");

        let token = ColorToken::Context {
            context: ContextName::SectionContrast,
            role: SurfaceRole::Accent,
        };
        assert_eq!(token.css_variable(), "--context-section-contrast-accent");

        let token = ColorToken::Stateful {
            component: StatefulComponent::ActionQuiet,
            role: StatefulRole::Surface,
            state: InteractionState::Default,
        };
        assert_eq!(token.css_variable(), "--component-action-quiet-surface-default");
    }

    #[test]
    fn test_every_name_parses_back() {
        for token in ColorToken::all() {
            assert_eq!(token.to_string().parse::<ColorToken>(), Ok(token));
            assert_eq!(token.css_variable().parse::<ColorToken>(), Ok(token));
        }
    }

    #[test]
    fn test_parse_rejects_typos() {
        assert!(matches!(
            "contxt-canvas-title".parse::<ColorToken>(),
            Err(TokenParseError::UnknownPrefix(_))
        ));
        assert!(matches!(
            "context-canvass-title".parse::<ColorToken>(),
            Err(TokenParseError::UnknownOwner(_))
        ));
        assert!(matches!(
            "context-canvas-heading".parse::<ColorToken>(),
            Err(TokenParseError::InvalidRole { .. })
        ));
        assert!(matches!(
            "component-action-meta-hover".parse::<ColorToken>(),
            Err(TokenParseError::InvalidRole { .. })
        ));
        assert!(matches!(
            "component-action-surface-focus".parse::<ColorToken>(),
            Err(TokenParseError::InvalidRole { .. })
        ));
        assert!(matches!(
            "component-action-accent-hover".parse::<ColorToken>(),
            Err(TokenParseError::InvalidRole { .. })
        ));
        assert!(matches!(
            "component-action-surface".parse::<ColorToken>(),
            Err(TokenParseError::InvalidRole { .. })
        ));
    }

    #[test]
    fn test_stateful_roles_map_to_inks() {
        assert_eq!(StatefulRole::Surface.ink_role(), None);
        let inks: Vec<InkRole> = StatefulRole::ALL.iter().filter_map(|r| r.ink_role()).collect();
        assert_eq!(inks, InkRole::STATEFUL.to_vec());
    }
}
