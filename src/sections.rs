// Page-section choreography.
//
// Sections are tagged with a `left`, `right` or `final` class. Entering one
// picks the effect direction and fades its content in; leaving it fades the
// content back to its reset state. Everything here is a plan; applying it
// to the DOM happens in `events::viewport`.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Left,
    Right,
    Final,
    Plain,
}

impl SectionKind {
    /// Classify from an element's `class` attribute.
    pub fn from_class_list(classes: &str) -> Self {
        let has = |name: &str| classes.split_ascii_whitespace().any(|c| c == name);
        if has("left") {
            SectionKind::Left
        } else if has("right") {
            SectionKind::Right
        } else if has("final") {
            SectionKind::Final
        } else {
            SectionKind::Plain
        }
    }

    #[inline]
    pub fn direction_target(self) -> f32 {
        match self {
            SectionKind::Left => 1.0,
            SectionKind::Right => -1.0,
            SectionKind::Final | SectionKind::Plain => 0.0,
        }
    }
}

/// What a fade animates, resolved against the section (or the document for
/// the drawing canvas).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeTarget {
    ContentImages,
    ContentText,
    Images,
    Text,
    Heading,
    DrawingCanvas,
    /// The observed element itself.
    Observed,
}

impl FadeTarget {
    pub fn selector(self) -> &'static str {
        match self {
            FadeTarget::ContentImages => ".content.images",
            FadeTarget::ContentText => ".content.text",
            FadeTarget::Images => ".images",
            FadeTarget::Text => ".text",
            FadeTarget::Heading => "h1",
            FadeTarget::DrawingCanvas => "#myCanvas",
            FadeTarget::Observed => "",
        }
    }

    pub fn scope(self) -> FadeScope {
        match self {
            FadeTarget::Observed => FadeScope::Observed,
            FadeTarget::DrawingCanvas => FadeScope::Document,
            _ => FadeScope::Section,
        }
    }
}

/// Where a fade target is looked up. Selector lookups take the first match
/// only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadeScope {
    Observed,
    Section,
    Document,
}

/// Elements watched for visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watched {
    Sections,
    Title,
}

impl Watched {
    pub fn selector(self) -> &'static str {
        match self {
            Watched::Sections => "section",
            Watched::Title => "section.title-section .title-wrapper",
        }
    }

    /// Sections count as visible once they reach the middle of the viewport,
    /// the title as soon as any of it shows.
    pub fn root_margin(self) -> &'static str {
        match self {
            Watched::Sections => "-50%",
            Watched::Title => "0px",
        }
    }
}

/// End state of a fade. `None` fields are left alone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub opacity: f32,
    pub translate_y_px: Option<f32>,
    pub blur_px: Option<f32>,
}

impl Keyframe {
    pub const fn opacity(opacity: f32) -> Self {
        Self {
            opacity,
            translate_y_px: None,
            blur_px: None,
        }
    }

    pub const fn slide(opacity: f32, translate_y_px: f32) -> Self {
        Self {
            opacity,
            translate_y_px: Some(translate_y_px),
            blur_px: None,
        }
    }

    pub const fn blur(opacity: f32, blur_px: f32) -> Self {
        Self {
            opacity,
            translate_y_px: None,
            blur_px: Some(blur_px),
        }
    }

    /// CSS property/value pairs for a Web Animations keyframe.
    pub fn css_properties(&self) -> SmallVec<[(&'static str, String); 3]> {
        let mut props = SmallVec::new();
        props.push(("opacity", format!("{}", self.opacity)));
        if let Some(y) = self.translate_y_px {
            props.push(("transform", format!("translateY({y}px)")));
        }
        if let Some(b) = self.blur_px {
            props.push(("filter", format!("blur({b}px)")));
        }
        props
    }
}

/// Web Animations timing for one fade. The end state sticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeTiming {
    pub duration_ms: f64,
    pub delay_ms: f64,
}

impl FadeTiming {
    pub const FILL: &'static str = "forwards";
    pub const EASING: &'static str = "ease";
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub target: FadeTarget,
    pub to: Keyframe,
    pub duration_sec: f32,
    pub delay_sec: f32,
}

impl Fade {
    const fn new(target: FadeTarget, to: Keyframe, duration_sec: f32, delay_sec: f32) -> Self {
        Self {
            target,
            to,
            duration_sec,
            delay_sec,
        }
    }

    pub fn timing(&self) -> FadeTiming {
        FadeTiming {
            duration_ms: self.duration_sec as f64 * 1000.0,
            delay_ms: self.delay_sec as f64 * 1000.0,
        }
    }
}

pub type FadePlan = SmallVec<[Fade; 4]>;

const RESET_SEC: f32 = 0.25;
const RESET_OFFSET_PX: f32 = 200.0;

/// Hidden state every section starts in and returns to when left.
pub fn reset_fades(kind: SectionKind) -> FadePlan {
    let mut plan = FadePlan::new();
    let hidden = Keyframe::slide(0.0, RESET_OFFSET_PX);
    plan.push(Fade::new(FadeTarget::ContentImages, hidden, RESET_SEC, 0.0));
    plan.push(Fade::new(FadeTarget::ContentText, hidden, RESET_SEC, 0.0));
    if kind == SectionKind::Final {
        plan.push(Fade::new(
            FadeTarget::Heading,
            Keyframe::blur(0.0, 20.0),
            RESET_SEC,
            0.0,
        ));
    }
    plan
}

/// Fades run when a section scrolls into the middle of the viewport.
///
/// `has_images_and_text` mirrors the page markup: only sections carrying
/// both blocks get the staggered content reveal.
pub fn enter_fades(kind: SectionKind, has_images_and_text: bool) -> FadePlan {
    let mut plan = FadePlan::new();
    if has_images_and_text {
        let shown = Keyframe::slide(1.0, 0.0);
        plan.push(Fade::new(FadeTarget::Images, shown, 0.25, 0.25));
        plan.push(Fade::new(FadeTarget::Text, shown, 0.25, 0.5));
    }
    match kind {
        SectionKind::Left | SectionKind::Right => plan.push(Fade::new(
            FadeTarget::DrawingCanvas,
            Keyframe::slide(1.0, 0.0),
            5.0,
            0.5,
        )),
        SectionKind::Final => plan.push(Fade::new(
            FadeTarget::Heading,
            Keyframe::blur(0.75, 1.0),
            1.0,
            0.0,
        )),
        SectionKind::Plain => plan.push(Fade::new(
            FadeTarget::DrawingCanvas,
            Keyframe::slide(0.0, 0.0),
            0.25,
            0.0,
        )),
    }
    plan
}

/// One-shot title reveal on the first section.
pub fn title_enter() -> Fade {
    Fade::new(FadeTarget::Observed, Keyframe::opacity(1.0), 0.25, 0.5)
}

pub fn title_leave() -> Fade {
    Fade::new(FadeTarget::Observed, Keyframe::opacity(0.0), 0.5, 0.0)
}
