#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use kurbo::{Point, Size};
use schema::{PaletteItem, PatternProject, Stitch, StitchBundle};

use crate::camera::Camera;
use crate::config::CanvasConfig;
use crate::consts::{HIT_SLOP, WHEEL_NOTCH_PX};
use crate::cull::{cull, CullStats};
use crate::hit::hit_test;
use crate::input::{
    Button, GestureAction, GestureMachine, GestureState, Intent, Key, Modifiers, RemoveStitchIntent, WheelDelta,
};
use crate::render::{display_list, DisplayItem};
use crate::scene::{Scene, SceneError};

/// Callback invoked synchronously for every emitted intent.
pub type Observer = Box<dyn FnMut(&Intent) + Send>;

/// One pattern's canvas: scene, camera, gesture machine and intent observers.
///
/// Input handlers take screen-space points and return the intents they
/// emitted, after every registered observer has seen them in order.
pub struct PatternCanvas {
    config: CanvasConfig,
    scene: Scene,
    camera: Camera,
    gesture: GestureMachine,
    /// Last screen point of an in-progress drag-pan.
    pan_anchor: Option<Point>,
    observers: Vec<Observer>,
}

impl Default for PatternCanvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl std::fmt::Debug for PatternCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCanvas")
            .field("config", &self.config)
            .field("camera", &self.camera)
            .field("gesture", &self.gesture)
            .field("drawables", &self.scene.drawable_count())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl PatternCanvas {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            scene: Scene::new(config.hint_alpha),
            camera: Camera::new(&config),
            gesture: GestureMachine::new(),
            pan_anchor: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe(&mut self, observer: impl FnMut(&Intent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    // --- Document ---

    /// Redraw the whole project and center the view on the chart.
    ///
    /// # Errors
    ///
    /// Returns a [`SceneError`] if the project references a missing palette
    /// entry or model, or holds a malformed color. The scene is left empty.
    pub fn draw_pattern(&mut self, project: &PatternProject) -> Result<(), SceneError> {
        self.gesture = GestureMachine::new();
        self.pan_anchor = None;
        self.scene.draw_pattern(project)?;

        let props = project.pattern.properties;
        self.camera.set_scale(self.config.initial_scale);
        self.camera.move_center(Point::new(f64::from(props.width) / 2.0, f64::from(props.height) / 2.0));
        Ok(())
    }

    /// Empty the scene. Camera and observers are kept.
    pub fn clear(&mut self) {
        self.gesture = GestureMachine::new();
        self.scene.clear();
    }

    /// Draw a confirmed stitch.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn add_stitch(&mut self, stitch: &Stitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        self.scene.draw_stitch(stitch, palitem)
    }

    /// Draw a confirmed batch of stitches.
    ///
    /// # Errors
    ///
    /// Returns a [`SceneError`] for an out-of-range palette index or malformed color.
    pub fn add_stitches(&mut self, bundle: &StitchBundle, palette: &[PaletteItem]) -> Result<(), SceneError> {
        self.scene.draw_stitches(bundle, palette)
    }

    /// Remove a confirmed stitch. Absent stitches are ignored.
    pub fn remove_stitch(&mut self, stitch: &Stitch) -> bool {
        self.scene.remove_stitch(stitch)
    }

    pub fn remove_stitches(&mut self, bundle: &StitchBundle) {
        self.scene.remove_stitches(bundle);
    }

    /// Show a gesture preview.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_hint(&mut self, stitch: &Stitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        self.scene.draw_hint(stitch, palitem)
    }

    pub fn clear_hint(&mut self) {
        self.scene.clear_hint();
    }

    // --- Viewport ---

    pub fn resize(&mut self, size: Size) {
        self.camera.resize(size);
    }

    /// Render-loop tick. Culls against the viewport when the camera moved.
    pub fn tick(&mut self) -> Option<CullStats> {
        if !self.camera.is_dirty() {
            return None;
        }
        let stats = cull(&mut self.scene, self.camera.visible_bounds());
        self.camera.mark_clean();
        Some(stats)
    }

    /// Visible drawables bottom to top.
    #[must_use]
    pub fn display_list(&self) -> Vec<DisplayItem<'_>> {
        display_list(&self.scene)
    }

    // --- Input ---

    pub fn on_pointer_down(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Intent> {
        if button != Button::Primary {
            return Vec::new();
        }
        if modifiers.shift {
            self.pan_anchor = Some(screen);
        }
        let world = self.camera.screen_to_world(screen);
        let actions = self.gesture.on_pointer_down(world, self.scene.fabric_size(), modifiers);
        self.apply(actions)
    }

    pub fn on_pointer_move(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Intent> {
        if let Some(anchor) = self.pan_anchor {
            if modifiers.shift {
                self.camera.pan_by((screen - anchor) * self.config.drag_factor);
                self.pan_anchor = Some(screen);
                return Vec::new();
            }
            self.pan_anchor = None;
        }
        let world = self.camera.screen_to_world(screen);
        let actions = self.gesture.on_pointer_move(world, self.scene.fabric_size(), modifiers);
        self.apply(actions)
    }

    /// Pointer release. A secondary release over a stitch emits its removal.
    pub fn on_pointer_up(&mut self, screen: Point, button: Button, modifiers: Modifiers) -> Vec<Intent> {
        let world = self.camera.screen_to_world(screen);
        match button {
            Button::Primary => {
                self.pan_anchor = None;
                let actions = self.gesture.on_pointer_up(world, self.scene.fabric_size(), modifiers);
                self.apply(actions)
            }
            Button::Secondary => match hit_test(&self.scene, world, HIT_SLOP) {
                Some(hit) => {
                    tracing::trace!(layer = ?hit.layer, "alternate click on stitch");
                    let intent = Intent::RemoveStitch(RemoveStitchIntent { stitch: hit.stitch });
                    self.notify(&intent);
                    vec![intent]
                }
                None => Vec::new(),
            },
            Button::Middle => Vec::new(),
        }
    }

    /// Zoom about the cursor. Scrolling down zooms out.
    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) {
        let factor = (1.0 + self.config.wheel_step).powf(-delta.dy / WHEEL_NOTCH_PX);
        self.camera.zoom_at(screen, factor);
    }

    pub fn on_key_up(&mut self, key: &Key) -> Vec<Intent> {
        if key.is_pan_modifier() {
            self.pan_anchor = None;
        }
        let actions = self.gesture.on_key_up(key);
        self.apply(actions)
    }

    fn apply(&mut self, actions: Vec<GestureAction>) -> Vec<Intent> {
        let mut emitted = Vec::new();
        for action in actions {
            match action {
                GestureAction::Emit(add) => {
                    let intent = Intent::AddStitch(add);
                    self.notify(&intent);
                    emitted.push(intent);
                }
                GestureAction::ClearHint => self.scene.clear_hint(),
            }
        }
        emitted
    }

    fn notify(&mut self, intent: &Intent) {
        tracing::trace!(?intent, observers = self.observers.len(), "intent emitted");
        for observer in &mut self.observers {
            observer(intent);
        }
    }
}
