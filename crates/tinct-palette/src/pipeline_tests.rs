// ABOUTME: End-to-end properties of the palette pipeline across many seeds
// ABOUTME: Gamut validity, ramp monotonicity, ink legibility, determinism and theme swaps

#[cfg(test)]
mod tests {
    use crate::{
        ChromaShaping, ColorToken, ContextName, GeneratedPalette, InteractionState, LightnessSteps,
        Oklch, PaletteSeeds, PrimitiveKey, SemanticColorPalette, StatefulComponent,
        StaticComponent, ThemeMode, ThemeSpec, TokenOwner, clamp_to_gamut, collect_css_rule_sets,
        contrast_ratio, create_primitive_ref_map, create_semantic_from_primitive,
        generate_palette, generate_primitive_palette, is_in_gamut, select_ink_for_surface,
        to_css_rule_sets_text,
    };

    fn scenario_seeds() -> PaletteSeeds {
        PaletteSeeds::new(Oklch::new(0.55, 0.15, 220.0))
            .with_foundation(Oklch::new(0.97, 0.005, 0.0))
    }

    fn generate(seeds: &PaletteSeeds, theme: &ThemeSpec) -> GeneratedPalette {
        generate_palette(seeds, theme, &ChromaShaping::default()).unwrap()
    }

    /// A spread of brand seeds covering dark, light, vivid and gray inputs.
    fn seed_grid() -> Vec<PaletteSeeds> {
        let mut seeds = Vec::new();
        for l in [0.2, 0.45, 0.55, 0.7, 0.9] {
            for c in [0.0, 0.06, 0.15, 0.3, 0.9] {
                for h in [0.0, 60.0, 140.0, 220.0, 300.0] {
                    seeds.push(PaletteSeeds::new(Oklch::new(l, c, h)));
                }
            }
        }
        seeds.push(PaletteSeeds::new(Oklch::new(0.6, 0.1, 30.0)).with_foundation(Oklch::new(
            0.9, 0.04, 90.0,
        )));
        seeds
    }

    #[test]
    fn test_scenario_light_ramp_and_canvas_variable() {
        let generated = generate(&scenario_seeds(), &ThemeSpec::light());
        let ramp = generated.primitives.neutral_ramp();
        assert!(ramp.windows(2).all(|w| w[0].l > w[1].l));
        assert!((ramp[0].l - 0.985).abs() < 1e-9);
        assert!((ramp[9].l - 0.12).abs() < 1e-9);

        let css = generated.to_css_text(":root");
        assert!(css.contains("--context-canvas-surface: oklch("), "{css}");
    }

    #[test]
    fn test_scenario_dark_ramp_flips_canvas() {
        let light = generate(&scenario_seeds(), &ThemeSpec::light());
        let dark = generate(&scenario_seeds(), &ThemeSpec::dark());
        let ramp = dark.primitives.neutral_ramp();
        assert!(ramp.windows(2).all(|w| w[0].l < w[1].l));
        assert!((ramp[0].l - 0.10).abs() < 1e-9);
        assert!((ramp[9].l - 0.94).abs() < 1e-9);
        assert!(dark.semantic.context.canvas.surface.l < light.semantic.context.canvas.surface.l);
    }

    #[test]
    fn test_scenario_gray_brand() {
        let seeds = PaletteSeeds::new(Oklch::new(0.55, 0.0, 220.0));
        for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
            let generated = generate(&seeds, &theme);
            assert!(generated.primitives.neutral_ramp().iter().all(|c| c.c == 0.0));
            for key in [PrimitiveKey::Bt, PrimitiveKey::Bs, PrimitiveKey::Bf] {
                assert_eq!(generated.primitives.get(key).c, 0.0, "{key}");
            }
        }
    }

    #[test]
    fn test_scenario_mid_gray_title_prefers_harmony() {
        let generated = generate(&PaletteSeeds::new(Oklch::new(0.5, 0.0, 0.0)), &ThemeSpec::light());
        let palette = &generated.primitives;
        let surface = Oklch::new(0.5, 0.0, 0.0);
        let choice = select_ink_for_surface(
            surface,
            &PrimitiveKey::NEUTRAL,
            crate::InkRole::Title,
            palette,
        );

        assert!(choice.contrast >= 4.5);
        let qualifying: Vec<(PrimitiveKey, f64)> = PrimitiveKey::NEUTRAL
            .iter()
            .map(|key| (*key, contrast_ratio(surface, palette.get(*key))))
            .filter(|(_, contrast)| *contrast >= 4.5)
            .collect();
        assert!(qualifying.len() > 1);
        let strongest = qualifying
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert_ne!(choice.key, strongest.0);
        assert!(qualifying.iter().all(|(_, contrast)| *contrast >= choice.contrast));
    }

    #[test]
    fn test_scenario_action_rule_sets() {
        let action: Vec<_> = collect_css_rule_sets()
            .into_iter()
            .filter(|r| r.owner == TokenOwner::Stateful(StatefulComponent::Action))
            .collect();
        assert_eq!(action.len(), 4);
        let states: Vec<_> = action.iter().map(|r| r.state).collect();
        assert_eq!(
            states,
            InteractionState::ALL.iter().copied().map(Some).collect::<Vec<_>>()
        );
        let disabled = &action[3].selector;
        for part in [":disabled", "[disabled]", ".is-disabled"] {
            assert!(disabled.contains(part), "{disabled}");
        }
    }

    #[test]
    fn test_every_primitive_is_gamut_valid() {
        for seeds in seed_grid() {
            for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
                let generated = generate(&seeds, &theme);
                for (key, color) in generated.primitives.iter() {
                    assert!(is_in_gamut(color), "{key} {color} from {:?}", seeds.brand);
                    assert_eq!(clamp_to_gamut(color), color);
                }
            }
        }
    }

    #[test]
    fn test_ramps_are_strictly_monotonic() {
        for seeds in seed_grid() {
            let light = generate(&seeds, &ThemeSpec::light()).primitives;
            let dark = generate(&seeds, &ThemeSpec::dark()).primitives;
            assert!(light.neutral_ramp().windows(2).all(|w| w[0].l > w[1].l));
            assert!(light.foundation_ramp().windows(2).all(|w| w[0].l > w[1].l));
            assert!(dark.neutral_ramp().windows(2).all(|w| w[0].l < w[1].l));
            assert!(dark.foundation_ramp().windows(2).all(|w| w[0].l < w[1].l));
        }
    }

    #[test]
    fn test_every_ink_is_legible_or_warned() {
        for seeds in seed_grid() {
            for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
                let generated = generate(&seeds, &theme);
                for resolved in &generated.resolutions {
                    let warned = generated.warnings.iter().any(|w| {
                        w.owner == resolved.owner
                            && w.state == resolved.state
                            && w.role == resolved.role
                    });
                    assert!(
                        resolved.choice.contrast >= resolved.role.min_contrast() || warned,
                        "{} {:?} {} on {:?}",
                        resolved.owner,
                        resolved.state,
                        resolved.role,
                        seeds.brand
                    );
                    assert_eq!(warned, resolved.choice.degraded);
                }
            }
        }
    }

    #[test]
    fn test_resolutions_match_the_semantic_palette() {
        let generated = generate(&scenario_seeds(), &ThemeSpec::dark());
        for resolved in &generated.resolutions {
            let (surface, ink) = match (resolved.owner, resolved.state) {
                (TokenOwner::Context(context), None) => {
                    let tokens = generated.semantic.context(context);
                    (tokens.surface, *tokens.ink.get(resolved.role))
                }
                (TokenOwner::Component(component), None) => {
                    let tokens = generated.semantic.component(component);
                    (tokens.surface, *tokens.ink.get(resolved.role))
                }
                (TokenOwner::Stateful(component), Some(state)) => {
                    let tokens = generated.semantic.stateful(component);
                    let ink = tokens.ink.get(resolved.role).unwrap();
                    (*tokens.surface.get(state), *ink.get(state))
                }
                other => panic!("unexpected resolution shape {other:?}"),
            };
            assert_eq!(ink, resolved.choice.color);
            assert!((contrast_ratio(surface, ink) - resolved.choice.contrast).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scenario_seeds_need_no_fallback() {
        for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
            let generated = generate(&scenario_seeds(), &theme);
            assert!(generated.warnings.is_empty(), "{:?}", generated.warnings);
        }
    }

    #[test]
    fn test_css_output_is_deterministic() {
        for seeds in [scenario_seeds(), PaletteSeeds::default()] {
            for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
                let first = generate(&seeds, &theme).to_css_text(":root");
                let second = generate(&seeds, &theme).to_css_text(":root");
                assert_eq!(first.as_bytes(), second.as_bytes());
            }
        }
        assert_eq!(to_css_rule_sets_text(), to_css_rule_sets_text());
    }

    #[test]
    fn test_css_declares_every_token_once() {
        let css = generate(&scenario_seeds(), &ThemeSpec::light()).to_css_text(".preview");
        let tokens = ColorToken::all();
        assert_eq!(css.lines().count(), tokens.len() + 2);
        for token in tokens {
            let needle = format!("  {}: ", token.css_variable());
            assert_eq!(css.matches(&needle).count(), 1, "{needle}");
        }
        assert!(css.contains("--component-action-surface-default: "));
        assert!(css.contains("--component-action-quiet-link-text-disabled: "));
    }

    /// Every surface of `dark` sits below its counterpart in `light`, except
    /// the contrast section, which flips the other way.
    fn assert_surfaces_flip(
        light: &SemanticColorPalette,
        dark: &SemanticColorPalette,
        what: &str,
    ) {
        for context in [
            ContextName::Canvas,
            ContextName::SectionNeutral,
            ContextName::SectionTint,
        ] {
            let (l, d) = (light.context(context).surface.l, dark.context(context).surface.l);
            assert!(d < l, "{what}: {context} {l} -> {d}");
        }
        for component in StaticComponent::ALL {
            let l = light.component(*component).surface.l;
            let d = dark.component(*component).surface.l;
            assert!(d < l, "{what}: {component} {l} -> {d}");
        }
        let light_quiet = light.stateful(StatefulComponent::ActionQuiet);
        let dark_quiet = dark.stateful(StatefulComponent::ActionQuiet);
        for state in InteractionState::ALL {
            let (l, d) = (light_quiet.surface.get(*state).l, dark_quiet.surface.get(*state).l);
            assert!(d < l, "{what}: action-quiet {state} {l} -> {d}");
        }
        assert!(
            dark.context(ContextName::SectionContrast).surface.l
                > light.context(ContextName::SectionContrast).surface.l,
            "{what}: section-contrast"
        );
    }

    #[test]
    fn test_theme_swap_flips_surface_direction() {
        for seeds in seed_grid() {
            let light = generate(&seeds, &ThemeSpec::light()).semantic;
            let dark = generate(&seeds, &ThemeSpec::dark()).semantic;
            assert_surfaces_flip(&light, &dark, &format!("{:?}", seeds.brand));
        }
    }

    #[test]
    fn test_swapping_only_the_ref_map_flips_surfaces() {
        for seeds in seed_grid() {
            // primitives are generated once and never regenerated
            let primitives = generate_primitive_palette(
                &seeds,
                &LightnessSteps::LIGHT,
                &ChromaShaping::default(),
            );
            let light_map = create_primitive_ref_map(ThemeMode::Light);
            let dark_map = create_primitive_ref_map(ThemeMode::Dark);

            let light = create_semantic_from_primitive(&primitives, &light_map).unwrap().palette;
            let dark = create_semantic_from_primitive(&primitives, &dark_map).unwrap().palette;
            assert_surfaces_flip(&light, &dark, &format!("{:?}", seeds.brand));

            let canvas = dark.context(ContextName::Canvas).surface;
            assert_eq!(canvas, primitives.get(PrimitiveKey::N9));
            if seeds.brand.c > 0.0 {
                assert_eq!(canvas.h, seeds.brand.h);
            }
        }
    }

    #[test]
    fn test_scenario_ref_map_swap_on_light_primitives() {
        let primitives = generate_primitive_palette(
            &scenario_seeds(),
            &LightnessSteps::LIGHT,
            &ChromaShaping::default(),
        );
        let light = create_semantic_from_primitive(
            &primitives,
            &create_primitive_ref_map(ThemeMode::Light),
        )
        .unwrap();
        let dark = create_semantic_from_primitive(
            &primitives,
            &create_primitive_ref_map(ThemeMode::Dark),
        )
        .unwrap();

        let canvas = (light.palette.context.canvas.surface, dark.palette.context.canvas.surface);
        assert!((canvas.0.l - 0.985).abs() < 1e-9);
        assert!((canvas.1.l - 0.12).abs() < 1e-9);
        let card = (light.palette.component.card.surface, dark.palette.component.card.surface);
        assert!(card.1.l < card.0.l);
        let quiet = (
            light.palette.component.action_quiet.surface.default,
            dark.palette.component.action_quiet.surface.default,
        );
        assert!(quiet.1.l < quiet.0.l);

        // the dark table stays legible on light-direction primitives
        assert!(dark.warnings.is_empty(), "{:?}", dark.warnings);
        assert!(dark.palette.context.canvas.ink.title.l > canvas.1.l);
    }

    #[test]
    fn test_light_map_on_dark_primitives_keeps_light_surfaces() {
        let primitives = generate_primitive_palette(
            &scenario_seeds(),
            &LightnessSteps::DARK,
            &ChromaShaping::default(),
        );
        let dark = create_semantic_from_primitive(
            &primitives,
            &create_primitive_ref_map(ThemeMode::Dark),
        )
        .unwrap()
        .palette;
        let light = create_semantic_from_primitive(
            &primitives,
            &create_primitive_ref_map(ThemeMode::Light),
        )
        .unwrap()
        .palette;
        assert_surfaces_flip(&light, &dark, "dark primitives");
        assert_eq!(light.context.canvas.surface, primitives.get(PrimitiveKey::N9));
    }

    #[test]
    fn test_high_chroma_seed_is_clamped_into_gamut() {
        let brand = Oklch::new(0.6, 0.9, 30.0);
        for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
            let generated = generate(&PaletteSeeds::new(brand), &theme);
            let stored = generated.primitives.get(PrimitiveKey::B);
            assert!(is_in_gamut(stored));
            assert!(stored.c < brand.c);
            assert_eq!(stored.l, brand.l);
            assert_eq!(stored.h, brand.h);
            for (key, color) in generated.primitives.iter() {
                assert!(is_in_gamut(color), "{key} {color}");
            }
            for token in ColorToken::all() {
                assert!(is_in_gamut(generated.get(token)), "{token}");
            }
        }
    }

    #[test]
    fn test_theme_swap_keeps_brand_hue() {
        for seeds in seed_grid().into_iter().filter(|s| s.brand.c > 0.0) {
            for theme in [ThemeSpec::light(), ThemeSpec::dark()] {
                let generated = generate(&seeds, &theme);
                let canvas = generated.semantic.context.canvas.surface;
                assert_eq!(canvas.h, seeds.brand.h);
                for color in generated.primitives.neutral_ramp() {
                    assert_eq!(color.h, seeds.brand.h);
                }
            }
        }
    }

    #[test]
    fn test_theme_loaded_from_data_matches_builtin() {
        let text = toml::to_string(&ThemeSpec::dark()).unwrap();
        let night: ThemeSpec = toml::from_str(&text).unwrap();
        let night = night.with_name("night");
        assert_eq!(night.mode(), ThemeMode::Dark);

        let builtin = generate(&scenario_seeds(), &ThemeSpec::dark());
        let custom = generate(&scenario_seeds(), &night);
        assert_eq!(custom.theme, "night");
        assert_eq!(custom.to_css_text(":root"), builtin.to_css_text(":root"));
    }
}
