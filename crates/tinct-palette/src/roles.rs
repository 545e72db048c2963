// ABOUTME: Closed sets of ink roles, interaction states, contexts and components
// ABOUTME: Plus small role-indexed containers so lookups never come back empty

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KeyParseError;
use crate::gamut::ContrastRatios;

/// Declares a closed, kebab-named enum with `ALL`, `as_str`, `Display`,
/// `FromStr` and string serde.
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = KeyParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(KeyParseError::new($kind, s)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = KeyParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

named_enum! {
    /// What a piece of ink is used for on a surface.
    InkRole, "ink role" {
        Title => "title",
        Body => "body",
        Meta => "meta",
        LinkText => "link-text",
        Highlight => "highlight",
        Border => "border",
        Divider => "divider",
    }
}

impl InkRole {
    /// Roles resolved per state on stateful components.
    pub const STATEFUL: [InkRole; 3] = [InkRole::Title, InkRole::Border, InkRole::LinkText];

    /// Minimum WCAG contrast ratio against the surface.
    pub fn min_contrast(&self) -> f64 {
        match self {
            InkRole::Title | InkRole::Body | InkRole::LinkText => ContrastRatios::AA_NORMAL,
            InkRole::Highlight | InkRole::Meta => ContrastRatios::AA_LARGE,
            InkRole::Border => ContrastRatios::BORDER,
            InkRole::Divider => ContrastRatios::DIVIDER,
        }
    }
}

named_enum! {
    InteractionState, "interaction state" {
        Default => "default",
        Hover => "hover",
        Active => "active",
        Disabled => "disabled",
    }
}

named_enum! {
    /// Page-level regions.
    ContextName, "context" {
        Canvas => "canvas",
        SectionNeutral => "section-neutral",
        SectionTint => "section-tint",
        SectionContrast => "section-contrast",
    }
}

named_enum! {
    /// Components with one surface and no interaction states.
    StaticComponent, "component" {
        Card => "card",
        CardFlat => "card-flat",
    }
}

named_enum! {
    /// Components that resolve surface and ink per interaction state.
    StatefulComponent, "stateful component" {
        Action => "action",
        ActionQuiet => "action-quiet",
    }
}

/// The context or component a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenOwner {
    Context(ContextName),
    Component(StaticComponent),
    Stateful(StatefulComponent),
}

impl TokenOwner {
    /// Every owner in emission order.
    pub fn all() -> Vec<TokenOwner> {
        ContextName::ALL
            .iter()
            .map(|c| TokenOwner::Context(*c))
            .chain(StaticComponent::ALL.iter().map(|c| TokenOwner::Component(*c)))
            .chain(StatefulComponent::ALL.iter().map(|c| TokenOwner::Stateful(*c)))
            .collect()
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            TokenOwner::Context(_) => "context",
            TokenOwner::Component(_) | TokenOwner::Stateful(_) => "component",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenOwner::Context(c) => c.as_str(),
            TokenOwner::Component(c) => c.as_str(),
            TokenOwner::Stateful(c) => c.as_str(),
        }
    }

    /// CSS class name, e.g. `context-canvas` or `component-action`.
    pub fn class_name(&self) -> String {
        format!("{}-{}", self.prefix(), self.name())
    }
}

impl fmt::Display for TokenOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix(), self.name())
    }
}

/// One value per ink role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InkSet<T> {
    pub title: T,
    pub body: T,
    pub meta: T,
    pub link_text: T,
    pub highlight: T,
    pub border: T,
    pub divider: T,
}

impl<T> InkSet<T> {
    pub fn try_from_fn<E>(mut f: impl FnMut(InkRole) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            title: f(InkRole::Title)?,
            body: f(InkRole::Body)?,
            meta: f(InkRole::Meta)?,
            link_text: f(InkRole::LinkText)?,
            highlight: f(InkRole::Highlight)?,
            border: f(InkRole::Border)?,
            divider: f(InkRole::Divider)?,
        })
    }

    pub fn get(&self, role: InkRole) -> &T {
        match role {
            InkRole::Title => &self.title,
            InkRole::Body => &self.body,
            InkRole::Meta => &self.meta,
            InkRole::LinkText => &self.link_text,
            InkRole::Highlight => &self.highlight,
            InkRole::Border => &self.border,
            InkRole::Divider => &self.divider,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> InkSet<U> {
        InkSet {
            title: f(&self.title),
            body: f(&self.body),
            meta: f(&self.meta),
            link_text: f(&self.link_text),
            highlight: f(&self.highlight),
            border: f(&self.border),
            divider: f(&self.divider),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InkRole, &T)> {
        InkRole::ALL.iter().map(move |role| (*role, self.get(*role)))
    }
}

/// One value per interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StateSet<T> {
    pub default: T,
    pub hover: T,
    pub active: T,
    pub disabled: T,
}

impl<T> StateSet<T> {
    pub fn try_from_fn<E>(
        mut f: impl FnMut(InteractionState) -> Result<T, E>,
    ) -> Result<Self, E> {
        Ok(Self {
            default: f(InteractionState::Default)?,
            hover: f(InteractionState::Hover)?,
            active: f(InteractionState::Active)?,
            disabled: f(InteractionState::Disabled)?,
        })
    }

    pub fn get(&self, state: InteractionState) -> &T {
        match state {
            InteractionState::Default => &self.default,
            InteractionState::Hover => &self.hover,
            InteractionState::Active => &self.active,
            InteractionState::Disabled => &self.disabled,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> StateSet<U> {
        StateSet {
            default: f(&self.default),
            hover: f(&self.hover),
            active: f(&self.active),
            disabled: f(&self.disabled),
        }
    }
}

/// The reduced ink subset resolved on stateful components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StatefulInkSet<T> {
    pub title: T,
    pub border: T,
    pub link_text: T,
}

impl<T> StatefulInkSet<T> {
    pub fn try_from_fn<E>(mut f: impl FnMut(InkRole) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            title: f(InkRole::Title)?,
            border: f(InkRole::Border)?,
            link_text: f(InkRole::LinkText)?,
        })
    }

    /// `None` for roles outside the stateful subset.
    pub fn get(&self, role: InkRole) -> Option<&T> {
        match role {
            InkRole::Title => Some(&self.title),
            InkRole::Border => Some(&self.border),
            InkRole::LinkText => Some(&self.link_text),
            _ => None,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> StatefulInkSet<U> {
        StatefulInkSet {
            title: f(&self.title),
            border: f(&self.border),
            link_text: f(&self.link_text),
        }
    }
}
