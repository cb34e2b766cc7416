use super::host::PlatformFamily;
use super::scale::NEUTRAL_SCALE;

/// Host color-scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Name of the application theme matching this preference
    pub fn theme_name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

/// Input modality last reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerMode {
    #[default]
    Mouse,
    Touch,
}

/// Process-wide platform state.
///
/// Owned by [`Platform`](super::Platform) and only ever touched from the
/// thread driving the host event loop. Frame sync and the host bridge borrow
/// it mutably in turn, so no interior mutability or locking is involved.
#[derive(Debug, Clone)]
pub struct PlatformContext {
    /// Scale observed at the end of the previous frame, `None` until the
    /// first frame has been measured
    pub(crate) prior_scale: Option<f32>,
    pub(crate) native_scale: f32,
    pub(crate) theme: ThemePreference,
    pub(crate) pointer_mode: PointerMode,
    pub(crate) family: PlatformFamily,
}

impl PlatformContext {
    pub fn new() -> Self {
        Self {
            prior_scale: None,
            native_scale: NEUTRAL_SCALE,
            theme: ThemePreference::default(),
            pointer_mode: PointerMode::default(),
            family: PlatformFamily::Standard,
        }
    }

    pub fn prior_scale(&self) -> Option<f32> {
        self.prior_scale
    }

    /// Native scale the rest of the application renders with
    pub fn native_scale(&self) -> f32 {
        self.native_scale
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn pointer_mode(&self) -> PointerMode {
        self.pointer_mode
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }
}

impl Default for PlatformContext {
    fn default() -> Self {
        Self::new()
    }
}
