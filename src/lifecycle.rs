// Page lifecycle for the render loop.
//
// `pagehide` always stops the loop. A page restored from the back/forward
// cache gets a `pageshow` with `persisted` set and must start drawing again;
// the `pageshow` of a fresh load finds the loop already running.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTransition {
    Hide,
    Show,
}

impl PageTransition {
    pub fn event_name(self) -> &'static str {
        match self {
            PageTransition::Hide => "pagehide",
            PageTransition::Show => "pageshow",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopAction {
    Start,
    Stop,
    Keep,
}

pub fn loop_action(transition: PageTransition, persisted: bool) -> LoopAction {
    match (transition, persisted) {
        (PageTransition::Hide, _) => LoopAction::Stop,
        (PageTransition::Show, true) => LoopAction::Start,
        (PageTransition::Show, false) => LoopAction::Keep,
    }
}
