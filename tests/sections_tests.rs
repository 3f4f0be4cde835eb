// Host-side tests for section classification and fade planning.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod sections {
    include!("../src/sections.rs");
}

use sections::*;

#[test]
fn classifies_sections_by_class_token() {
    assert_eq!(SectionKind::from_class_list("section left"), SectionKind::Left);
    assert_eq!(SectionKind::from_class_list("right dark"), SectionKind::Right);
    assert_eq!(SectionKind::from_class_list("final"), SectionKind::Final);
    assert_eq!(SectionKind::from_class_list(""), SectionKind::Plain);
    // Whole tokens only
    assert_eq!(SectionKind::from_class_list("leftover"), SectionKind::Plain);
    assert_eq!(SectionKind::from_class_list("title-section"), SectionKind::Plain);
}

#[test]
fn direction_targets_per_kind() {
    assert_eq!(SectionKind::Left.direction_target(), 1.0);
    assert_eq!(SectionKind::Right.direction_target(), -1.0);
    assert_eq!(SectionKind::Final.direction_target(), 0.0);
    assert_eq!(SectionKind::Plain.direction_target(), 0.0);
}

#[test]
fn reset_hides_content_blocks() {
    for kind in [SectionKind::Left, SectionKind::Right, SectionKind::Plain] {
        let plan = reset_fades(kind);
        assert_eq!(plan.len(), 2);
        let targets: Vec<_> = plan.iter().map(|f| f.target).collect();
        assert_eq!(targets, [FadeTarget::ContentImages, FadeTarget::ContentText]);
        for f in &plan {
            assert_eq!(f.to.opacity, 0.0);
            assert_eq!(f.to.translate_y_px, Some(200.0));
            assert_eq!(f.duration_sec, 0.25);
            assert_eq!(f.delay_sec, 0.0);
        }
    }
}

#[test]
fn final_reset_blurs_heading() {
    let plan = reset_fades(SectionKind::Final);
    let heading = plan
        .iter()
        .find(|f| f.target == FadeTarget::Heading)
        .expect("heading fade");
    assert_eq!(heading.to.opacity, 0.0);
    assert_eq!(heading.to.blur_px, Some(20.0));
}

#[test]
fn enter_reveals_images_then_text() {
    let plan = enter_fades(SectionKind::Left, true);
    let images = plan.iter().find(|f| f.target == FadeTarget::Images).unwrap();
    let text = plan.iter().find(|f| f.target == FadeTarget::Text).unwrap();
    assert_eq!(images.to, Keyframe::slide(1.0, 0.0));
    assert_eq!(text.to, Keyframe::slide(1.0, 0.0));
    assert!(text.delay_sec > images.delay_sec);
    assert_eq!(images.delay_sec, 0.25);
    assert_eq!(text.delay_sec, 0.5);
}

#[test]
fn enter_without_both_blocks_skips_content_reveal() {
    let plan = enter_fades(SectionKind::Left, false);
    assert!(plan
        .iter()
        .all(|f| f.target != FadeTarget::Images && f.target != FadeTarget::Text));
}

#[test]
fn tagged_sections_fade_drawing_canvas_in() {
    for kind in [SectionKind::Left, SectionKind::Right] {
        let plan = enter_fades(kind, false);
        assert_eq!(plan.len(), 1);
        let f = plan[0];
        assert_eq!(f.target, FadeTarget::DrawingCanvas);
        assert_eq!(f.to.opacity, 1.0);
        assert_eq!(f.duration_sec, 5.0);
        assert_eq!(f.delay_sec, 0.5);
    }
}

#[test]
fn untagged_section_fades_drawing_canvas_out() {
    let plan = enter_fades(SectionKind::Plain, false);
    assert_eq!(plan[0].target, FadeTarget::DrawingCanvas);
    assert_eq!(plan[0].to.opacity, 0.0);
    assert_eq!(plan[0].duration_sec, 0.25);
}

#[test]
fn final_section_unblurs_heading() {
    let plan = enter_fades(SectionKind::Final, false);
    assert_eq!(plan[0].target, FadeTarget::Heading);
    assert_eq!(plan[0].to, Keyframe::blur(0.75, 1.0));
    assert_eq!(plan[0].duration_sec, 1.0);
}

#[test]
fn leaving_restores_reset_state() {
    // The leave plan is the reset plan, so entering then leaving ends hidden.
    let kind = SectionKind::Right;
    let plan = reset_fades(kind);
    assert!(plan.iter().all(|f| f.to.opacity == 0.0));
}

#[test]
fn title_fades() {
    let on = title_enter();
    assert_eq!(on.target, FadeTarget::Observed);
    assert_eq!(on.to.opacity, 1.0);
    assert_eq!((on.duration_sec, on.delay_sec), (0.25, 0.5));
    let off = title_leave();
    assert_eq!(off.to.opacity, 0.0);
    assert_eq!(off.duration_sec, 0.5);
}

#[test]
fn keyframe_css_properties() {
    let props = Keyframe::slide(0.0, 200.0).css_properties();
    assert_eq!(props.len(), 2);
    assert_eq!(props[0], ("opacity", "0".to_string()));
    assert_eq!(props[1], ("transform", "translateY(200px)".to_string()));

    let props = Keyframe::blur(0.75, 1.0).css_properties();
    assert_eq!(props[0], ("opacity", "0.75".to_string()));
    assert_eq!(props[1], ("filter", "blur(1px)".to_string()));

    assert_eq!(Keyframe::opacity(1.0).css_properties().len(), 1);
}

#[test]
fn fade_targets_resolve_in_their_scope() {
    assert_eq!(FadeTarget::DrawingCanvas.scope(), FadeScope::Document);
    assert_eq!(FadeTarget::Observed.scope(), FadeScope::Observed);
    for t in [
        FadeTarget::ContentImages,
        FadeTarget::ContentText,
        FadeTarget::Images,
        FadeTarget::Text,
        FadeTarget::Heading,
    ] {
        assert_eq!(t.scope(), FadeScope::Section, "{t:?}");
    }
    assert_eq!(FadeTarget::DrawingCanvas.selector(), "#myCanvas");
    assert_eq!(FadeTarget::ContentImages.selector(), ".content.images");
}

#[test]
fn sections_trigger_at_mid_viewport_title_at_edge() {
    assert_eq!(Watched::Sections.selector(), "section");
    assert_eq!(Watched::Sections.root_margin(), "-50%");
    assert_eq!(
        Watched::Title.selector(),
        "section.title-section .title-wrapper"
    );
    assert_eq!(Watched::Title.root_margin(), "0px");
}

#[test]
fn fade_timing_is_in_milliseconds() {
    let t = title_enter().timing();
    assert_eq!(t.duration_ms, 250.0);
    assert_eq!(t.delay_ms, 500.0);

    let canvas = enter_fades(SectionKind::Left, false)[0].timing();
    assert_eq!((canvas.duration_ms, canvas.delay_ms), (5000.0, 500.0));
    assert_eq!(FadeTiming::FILL, "forwards");
}
