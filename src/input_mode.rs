use clap::ValueEnum;

/// How the user asked for the pointer to be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputPreference {
    #[default]
    Auto,
    Hover,
    Touch,
}

/// Whether the pointer can hover. Decided once at startup and never
/// re-queried, so a terminal that changes input devices mid-session keeps
/// its initial mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputMode {
    supports_hover: bool,
}

/// Terminals whose mouse support (if any) has no motion reporting.
const NO_MOTION_TERMS: &[&str] = &["linux", "dumb"];

impl InputMode {
    pub const fn hover() -> Self {
        Self {
            supports_hover: true,
        }
    }

    pub const fn touch_only() -> Self {
        Self {
            supports_hover: false,
        }
    }

    pub fn detect(preference: InputPreference, term: Option<&str>) -> Self {
        let mode = match preference {
            InputPreference::Hover => Self::hover(),
            InputPreference::Touch => Self::touch_only(),
            InputPreference::Auto => match term {
                Some(term) if NO_MOTION_TERMS.contains(&term) => Self::touch_only(),
                _ => Self::hover(),
            },
        };
        tracing::info!(
            ?preference,
            term = term.unwrap_or("<unset>"),
            supports_hover = mode.supports_hover,
            "input mode detected"
        );
        mode
    }

    /// Detect using the `TERM` of the current process.
    pub fn detect_from_env(preference: InputPreference) -> Self {
        let term = std::env::var("TERM").ok();
        Self::detect(preference, term.as_deref())
    }

    pub const fn supports_hover(&self) -> bool {
        self.supports_hover
    }

    pub const fn is_touch_only(&self) -> bool {
        !self.supports_hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_preference_wins() {
        assert!(InputMode::detect(InputPreference::Hover, Some("linux")).supports_hover());
        assert!(InputMode::detect(InputPreference::Touch, Some("xterm-256color")).is_touch_only());
    }

    #[test]
    fn auto_uses_term() {
        assert!(InputMode::detect(InputPreference::Auto, Some("xterm-256color")).supports_hover());
        assert!(InputMode::detect(InputPreference::Auto, Some("linux")).is_touch_only());
        assert!(InputMode::detect(InputPreference::Auto, Some("dumb")).is_touch_only());
        assert!(InputMode::detect(InputPreference::Auto, None).supports_hover());
    }
}
