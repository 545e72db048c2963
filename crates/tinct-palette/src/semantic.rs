// ABOUTME: Assembles the semantic token tree from a primitive palette and theme table
// ABOUTME: Every ink is checked against the surface of its own entry and state

use serde::Serialize;
use tinct_logging::debug;
use tinct_types::Oklch;

use crate::error::{PaletteError, Result};
use crate::gamut::relative_luminance;
use crate::ink::{
    InkChoice, ranked_pool, select_all_inks_for_surface, select_ink_for_surface_with_bg_y,
};
use crate::primitive::{PrimitiveKey, PrimitivePalette};
use crate::reference::{PrimitiveRefMap, SurfaceRefs};
use crate::roles::{
    ContextName, InkRole, InkSet, InteractionState, StateSet, StatefulComponent,
    StatefulInkSet, StaticComponent, TokenOwner,
};

/// Surface, secondary surface, brand accent and one ink per role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SurfaceTokens {
    pub surface: Oklch,
    pub tint_surface: Oklch,
    pub accent: Oklch,
    pub ink: InkSet<Oklch>,
}

/// Per-state surface and per-state inks for the stateful subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatefulTokens {
    pub surface: StateSet<Oklch>,
    pub ink: StatefulInkSet<StateSet<Oklch>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContextTokens {
    pub canvas: SurfaceTokens,
    pub section_neutral: SurfaceTokens,
    pub section_tint: SurfaceTokens,
    pub section_contrast: SurfaceTokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComponentTokens {
    pub card: SurfaceTokens,
    pub card_flat: SurfaceTokens,
    pub action: StatefulTokens,
    pub action_quiet: StatefulTokens,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SemanticColorPalette {
    pub context: ContextTokens,
    pub component: ComponentTokens,
}

impl SemanticColorPalette {
    pub fn context(&self, name: ContextName) -> &SurfaceTokens {
        match name {
            ContextName::Canvas => &self.context.canvas,
            ContextName::SectionNeutral => &self.context.section_neutral,
            ContextName::SectionTint => &self.context.section_tint,
            ContextName::SectionContrast => &self.context.section_contrast,
        }
    }

    pub fn component(&self, component: StaticComponent) -> &SurfaceTokens {
        match component {
            StaticComponent::Card => &self.component.card,
            StaticComponent::CardFlat => &self.component.card_flat,
        }
    }

    pub fn stateful(&self, component: StatefulComponent) -> &StatefulTokens {
        match component {
            StatefulComponent::Action => &self.component.action,
            StatefulComponent::ActionQuiet => &self.component.action_quiet,
        }
    }
}

/// An ink that fell back to a ramp endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastWarning {
    #[serde(serialize_with = "serialize_owner")]
    pub owner: TokenOwner,
    pub state: Option<InteractionState>,
    pub role: InkRole,
    pub contrast: f64,
    pub required: f64,
    pub fallback: PrimitiveKey,
}

fn serialize_owner<S: serde::Serializer>(
    owner: &TokenOwner,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(owner)
}

impl std::fmt::Display for ContrastWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.owner)?;
        if let Some(state) = self.state {
            write!(f, ":{state}")?;
        }
        write!(
            f,
            " {} falls back to {} at {:.2}:1 (needs {:.1}:1)",
            self.role, self.fallback, self.contrast, self.required
        )
    }
}

/// Where an ink was resolved and how it scored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedInk {
    pub owner: TokenOwner,
    pub state: Option<InteractionState>,
    pub role: InkRole,
    pub choice: InkChoice,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAssembly {
    pub palette: SemanticColorPalette,
    pub warnings: Vec<ContrastWarning>,
    /// Every ink decision in assembly order.
    pub resolutions: Vec<ResolvedInk>,
}

#[derive(Default)]
struct Recorder {
    warnings: Vec<ContrastWarning>,
    resolutions: Vec<ResolvedInk>,
}

impl Recorder {
    fn record(
        &mut self,
        owner: TokenOwner,
        state: Option<InteractionState>,
        role: InkRole,
        choice: InkChoice,
    ) -> Oklch {
        if choice.degraded {
            self.warnings.push(ContrastWarning {
                owner,
                state,
                role,
                contrast: choice.contrast,
                required: choice.required,
                fallback: choice.key,
            });
        }
        self.resolutions.push(ResolvedInk {
            owner,
            state,
            role,
            choice,
        });
        choice.color
    }
}

/// Build the semantic palette. Fails fast when the table lacks an entry,
/// state or role pool; degraded inks are reported, never fatal.
pub fn create_semantic_from_primitive(
    palette: &PrimitivePalette,
    ref_map: &PrimitiveRefMap,
) -> Result<SemanticAssembly> {
    let mut recorder = Recorder::default();

    let mut surface_entry =
        |owner: TokenOwner, refs: Option<&SurfaceRefs>| -> Result<SurfaceTokens> {
            let refs = refs.ok_or_else(|| PaletteError::missing_entry(owner))?;
            assemble_surface(owner, refs, palette, &mut recorder)
        };

    let context = ContextTokens {
        canvas: surface_entry(
            TokenOwner::Context(ContextName::Canvas),
            ref_map.contexts.get(&ContextName::Canvas),
        )?,
        section_neutral: surface_entry(
            TokenOwner::Context(ContextName::SectionNeutral),
            ref_map.contexts.get(&ContextName::SectionNeutral),
        )?,
        section_tint: surface_entry(
            TokenOwner::Context(ContextName::SectionTint),
            ref_map.contexts.get(&ContextName::SectionTint),
        )?,
        section_contrast: surface_entry(
            TokenOwner::Context(ContextName::SectionContrast),
            ref_map.contexts.get(&ContextName::SectionContrast),
        )?,
    };

    let card = surface_entry(
        TokenOwner::Component(StaticComponent::Card),
        ref_map.components.get(&StaticComponent::Card),
    )?;
    let card_flat = surface_entry(
        TokenOwner::Component(StaticComponent::CardFlat),
        ref_map.components.get(&StaticComponent::CardFlat),
    )?;

    let action = assemble_stateful(StatefulComponent::Action, ref_map, palette, &mut recorder)?;
    let action_quiet =
        assemble_stateful(StatefulComponent::ActionQuiet, ref_map, palette, &mut recorder)?;

    debug!(
        inks = recorder.resolutions.len(),
        warnings = recorder.warnings.len(),
        "Semantic palette assembled"
    );

    Ok(SemanticAssembly {
        palette: SemanticColorPalette {
            context,
            component: ComponentTokens {
                card,
                card_flat,
                action,
                action_quiet,
            },
        },
        warnings: recorder.warnings,
        resolutions: recorder.resolutions,
    })
}

fn assemble_surface(
    owner: TokenOwner,
    refs: &SurfaceRefs,
    palette: &PrimitivePalette,
    recorder: &mut Recorder,
) -> Result<SurfaceTokens> {
    let surface = refs.surface.resolve(palette);
    let tint_surface = refs.tint_surface.resolve(palette);
    let accent = refs.accent.resolve(palette);
    let selection =
        select_all_inks_for_surface(surface, &refs.ink, palette).map_err(|e| e.at(owner))?;

    for (role, choice) in selection.iter() {
        recorder.record(owner, None, role, *choice);
    }

    Ok(SurfaceTokens {
        surface,
        tint_surface,
        accent,
        ink: selection.map(|choice| choice.color),
    })
}

fn assemble_stateful(
    component: StatefulComponent,
    ref_map: &PrimitiveRefMap,
    palette: &PrimitivePalette,
    recorder: &mut Recorder,
) -> Result<StatefulTokens> {
    let owner = TokenOwner::Stateful(component);
    let states = ref_map
        .stateful
        .get(&component)
        .ok_or_else(|| PaletteError::missing_entry(owner))?;

    // Each state is resolved against its own surface; nothing carries over.
    let resolved = StateSet::try_from_fn(|state| {
        let entry = format!("{owner}:{state}");
        let refs = states
            .get(&state)
            .ok_or_else(|| PaletteError::missing_entry(&entry))?;
        let surface = refs.surface.resolve(palette);
        let bg_y = relative_luminance(surface);

        let ink = StatefulInkSet::try_from_fn(|role| {
            let candidates = ranked_pool(&refs.ink, role, palette).map_err(|e| e.at(&entry))?;
            let choice = select_ink_for_surface_with_bg_y(bg_y, &candidates, role, palette);
            Ok::<_, PaletteError>(recorder.record(owner, Some(state), role, choice))
        })?;

        Ok::<_, PaletteError>((surface, ink))
    })?;

    Ok(StatefulTokens {
        surface: resolved.map(|(surface, _)| *surface),
        ink: StatefulInkSet {
            title: resolved.map(|(_, ink)| ink.title),
            border: resolved.map(|(_, ink)| ink.border),
            link_text: resolved.map(|(_, ink)| ink.link_text),
        },
    })
}
