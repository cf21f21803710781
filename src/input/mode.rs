//! Input mode selection and ownership of the active gesture source.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::device::DeviceSnapshot;
use super::gesture::{DisabledGestures, GestureSource};
use super::mouse::{MouseBindings, MouseGestures};
use super::touch::TouchGestures;

/// Which gesture source to run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Pick by platform.
    #[default]
    Automatic,
    /// Mouse and scroll wheel.
    Mouse,
    /// Touch screen.
    Touch,
    /// Ignore all input.
    Disabled,
}

impl InputMode {
    /// Resolve [`InputMode::Automatic`] against a platform. Explicit modes
    /// are returned unchanged.
    #[must_use]
    pub fn resolve(self, platform: Platform) -> InputMode {
        match self {
            Self::Automatic => match platform {
                Platform::Editor | Platform::Desktop | Platform::Web => Self::Mouse,
                Platform::Mobile => Self::Touch,
                Platform::Unknown => Self::Disabled,
            },
            explicit => explicit,
        }
    }
}

/// Host environment class used for automatic mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Running inside an authoring tool.
    Editor,
    /// Desktop operating system.
    Desktop,
    /// Browser.
    Web,
    /// Phone or tablet.
    Mobile,
    /// No pointing device capability is known.
    Unknown,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Self::Mobile
        } else if cfg!(target_arch = "wasm32") {
            Self::Web
        } else if cfg!(any(
            target_os = "windows",
            target_os = "macos",
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
        )) {
            Self::Desktop
        } else {
            Self::Unknown
        }
    }
}

/// Owns the active [`GestureSource`] and rebuilds it when the configured
/// mode resolves to something different.
///
/// A rebuild throws away all in-flight device state (held buttons, tracked
/// fingers), so nothing leaks across a mode switch.
pub struct InputModeResolver {
    configured: InputMode,
    platform: Platform,
    sensitivity: f32,
    bindings: MouseBindings,
    active: Box<dyn GestureSource>,
}

impl InputModeResolver {
    /// Resolve `configured` on `platform` and build the matching source.
    #[must_use]
    pub fn new(
        configured: InputMode,
        platform: Platform,
        sensitivity: f32,
        bindings: MouseBindings,
    ) -> Self {
        let resolved = configured.resolve(platform);
        warn_if_degraded(configured, platform, resolved);
        Self {
            configured,
            platform,
            sensitivity,
            bindings,
            active: build_source(resolved, sensitivity, bindings),
        }
    }

    /// The configured (possibly automatic) mode.
    #[must_use]
    pub fn configured_mode(&self) -> InputMode {
        self.configured
    }

    /// The mode of the source currently running.
    #[must_use]
    pub fn active_mode(&self) -> InputMode {
        self.active.mode()
    }

    /// Platform used for automatic resolution.
    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The running source.
    #[must_use]
    pub fn source(&self) -> &dyn GestureSource {
        self.active.as_ref()
    }

    /// Change the configured mode, rebuilding the source if needed.
    /// Returns `true` if a rebuild happened.
    pub fn reconfigure(&mut self, mode: InputMode) -> bool {
        self.configured = mode;
        self.refresh()
    }

    /// Change the platform used for automatic resolution.
    /// Returns `true` if a rebuild happened.
    pub fn set_platform(&mut self, platform: Platform) -> bool {
        self.platform = platform;
        self.refresh()
    }

    /// Change the mouse bindings. A running mouse source is rebuilt.
    pub fn set_mouse_bindings(&mut self, bindings: MouseBindings) {
        if bindings == self.bindings {
            return;
        }
        self.bindings = bindings;
        if self.active.mode() == InputMode::Mouse {
            self.rebuild(InputMode::Mouse);
        }
    }

    /// Rebuild the source if the configured mode no longer matches it.
    /// Returns `true` if a rebuild happened.
    pub fn refresh(&mut self) -> bool {
        let resolved = self.configured.resolve(self.platform);
        if resolved == self.active.mode() {
            return false;
        }
        self.rebuild(resolved);
        true
    }

    fn rebuild(&mut self, mode: InputMode) {
        log::debug!(
            "input mode {:?} -> {:?} (configured {:?}, platform {:?})",
            self.active.mode(),
            mode,
            self.configured,
            self.platform
        );
        warn_if_degraded(self.configured, self.platform, mode);
        self.active = build_source(mode, self.sensitivity, self.bindings);
    }

    /// Poll the active source for one frame.
    pub fn poll(&mut self, snapshot: &DeviceSnapshot, dt: f32) {
        let _ = self.refresh();
        self.active.poll(snapshot, dt);
    }

    /// Overall sensitivity handed to every source.
    #[must_use]
    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    /// Update the sensitivity of the running source and of future ones.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
        self.active.set_sensitivity(sensitivity);
    }
}

fn warn_if_degraded(configured: InputMode, platform: Platform, resolved: InputMode) {
    if configured == InputMode::Automatic && resolved == InputMode::Disabled {
        log::warn!("no pointing device known for platform {platform:?}, input disabled");
    }
}

fn build_source(
    mode: InputMode,
    sensitivity: f32,
    bindings: MouseBindings,
) -> Box<dyn GestureSource> {
    match mode {
        InputMode::Mouse => Box::new(MouseGestures::new(bindings, sensitivity)),
        InputMode::Touch => Box::new(TouchGestures::new(sensitivity)),
        InputMode::Disabled => Box::new(DisabledGestures::new(sensitivity)),
        InputMode::Automatic => {
            log::warn!("unresolved automatic input mode, input disabled");
            Box::new(DisabledGestures::new(sensitivity))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::device::DeviceTracker;
    use crate::input::event::{InputEvent, MouseButton};

    fn resolver(mode: InputMode, platform: Platform) -> InputModeResolver {
        InputModeResolver::new(mode, platform, 1.0, MouseBindings::default())
    }

    #[test]
    fn automatic_resolution_by_platform() {
        assert_eq!(InputMode::Automatic.resolve(Platform::Editor), InputMode::Mouse);
        assert_eq!(InputMode::Automatic.resolve(Platform::Desktop), InputMode::Mouse);
        assert_eq!(InputMode::Automatic.resolve(Platform::Mobile), InputMode::Touch);
        assert_eq!(InputMode::Automatic.resolve(Platform::Unknown), InputMode::Disabled);
        assert_eq!(InputMode::Touch.resolve(Platform::Desktop), InputMode::Touch);
    }

    #[test]
    fn builds_resolved_source() {
        let cases = [
            (InputMode::Automatic, Platform::Mobile, InputMode::Touch),
            (InputMode::Mouse, Platform::Mobile, InputMode::Mouse),
            (InputMode::Automatic, Platform::Unknown, InputMode::Disabled),
        ];
        for (configured, platform, expected) in cases {
            assert_eq!(resolver(configured, platform).active_mode(), expected);
        }
    }

    #[test]
    fn reconfigure_rebuilds_only_on_change() {
        let mut resolver = resolver(InputMode::Automatic, Platform::Desktop);
        assert!(!resolver.reconfigure(InputMode::Mouse));
        assert!(resolver.reconfigure(InputMode::Touch));
        assert_eq!(resolver.active_mode(), InputMode::Touch);
        assert!(!resolver.refresh());
        assert!(!resolver.set_platform(Platform::Mobile));
        assert!(!resolver.reconfigure(InputMode::Automatic));
        assert_eq!(resolver.active_mode(), InputMode::Touch);
    }

    #[test]
    fn sensitivity_propagates_to_rebuilt_sources() {
        let mut resolver = resolver(InputMode::Mouse, Platform::Desktop);
        resolver.set_sensitivity(2.5);
        assert_eq!(resolver.source().sensitivity(), 2.5);
        let _ = resolver.reconfigure(InputMode::Touch);
        assert_eq!(resolver.source().sensitivity(), 2.5);
    }

    #[test]
    fn switching_to_mouse_mid_press_does_not_rotate() {
        let mut tracker = DeviceTracker::new(100);
        let mut resolver = resolver(InputMode::Disabled, Platform::Desktop);

        let _ = tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        resolver.poll(&tracker.next_frame(), 0.016);

        let _ = resolver.reconfigure(InputMode::Mouse);
        for _ in 0..3 {
            let _ = tracker.handle_event(InputEvent::CursorMoved { x: 30.0, y: 30.0 });
            resolver.poll(&tracker.next_frame(), 0.016);
            assert!(!resolver.source().should_rotate());
        }
    }

    #[test]
    fn rebinding_rebuilds_mouse_source() {
        let mut resolver = resolver(InputMode::Mouse, Platform::Desktop);
        let bindings = MouseBindings {
            rotate: MouseButton::Left,
            pan: MouseButton::Right,
        };
        resolver.set_mouse_bindings(bindings);

        let mut tracker = DeviceTracker::new(100);
        let _ = tracker.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        resolver.poll(&tracker.next_frame(), 0.016);
        resolver.poll(&tracker.next_frame(), 0.016);
        assert!(resolver.source().should_rotate());
    }
}
