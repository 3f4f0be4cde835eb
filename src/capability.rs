/// What the page does after the rendering capability check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Startup {
    /// Build the scene and start the render loop.
    Run,
    /// Skip assembly entirely and show the static error message.
    Fallback,
}

impl Startup {
    #[inline]
    pub fn from_capability(gpu_available: bool) -> Self {
        if gpu_available {
            Startup::Run
        } else {
            Startup::Fallback
        }
    }

    pub fn builds_scene(self) -> bool {
        self == Startup::Run
    }

    /// CSS `display` value for the `.error-message` element.
    pub fn error_display(self) -> &'static str {
        match self {
            Startup::Run => "none",
            Startup::Fallback => "block",
        }
    }
}
