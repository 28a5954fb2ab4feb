//! Scene/stage manager.
//!
//! The scene is a fixed stack of layers composited bottom to top. Stitch
//! layers are containers of [`Drawable`] instances registered in the
//! [`IdentityIndex`]; background layers and the hint are plain primitive
//! lists. The scene is owned by one canvas and only mutated through the
//! methods here.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::BTreeMap;
use std::sync::Arc;

use kurbo::{Affine, Point, Rect, Size};
use schema::{
    FullStitch, Grid, LineStitch, NodeStitch, PaletteItem, PartStitch, PatternProject, PatternProperties,
    SpecialStitch, SpecialStitchModel, Stitch, StitchBundle,
};

use crate::grid::grid_primitives;
use crate::index::{IdentityIndex, StitchKey};
use crate::special::{compile, placement_transform};
use crate::template::{line_template, Color, Outline, Paint, Primitive, Template, TemplateCache};

/// Data-integrity failures while drawing a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("palette index {index} is out of range for a palette of {len}")]
    PaletteIndex { index: u8, len: usize },
    #[error("special stitch model index {index} is out of range for {len} models")]
    ModelIndex { index: u8, len: usize },
    #[error("invalid color {value:?}")]
    InvalidColor { value: String },
}

/// Layers from bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Fabric,
    FullStitches,
    PartStitches,
    Grid,
    SpecialStitches,
    Lines,
    Nodes,
    Hint,
}

impl LayerKind {
    /// Every layer in compositing order.
    pub const ALL: [Self; 8] = [
        Self::Fabric,
        Self::FullStitches,
        Self::PartStitches,
        Self::Grid,
        Self::SpecialStitches,
        Self::Lines,
        Self::Nodes,
        Self::Hint,
    ];

    /// Position in the stack, 0 being the bottom.
    #[must_use]
    pub fn depth(self) -> usize {
        self as usize
    }
}

/// Opaque handle of a drawable inside its container. Handles grow
/// monotonically, so container order is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(u64);

/// One instanced template on a container layer.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub template: Arc<Template>,
    pub tint: Color,
    /// Template-local to world transform.
    pub transform: Affine,
    pub alpha: f64,
    /// Cleared by culling when the drawable is off screen.
    pub visible: bool,
    /// The stitch this drawable shows, for alternate-click removal.
    pub payload: Option<Stitch>,
}

impl Drawable {
    fn new(template: Arc<Template>, tint: Color, transform: Affine, payload: Option<Stitch>) -> Self {
        Self { template, tint, transform, alpha: 1.0, visible: true, payload }
    }

    /// Axis-aligned world bounds.
    #[must_use]
    pub fn world_bounds(&self) -> Rect {
        self.transform.transform_rect_bbox(self.template.bounds())
    }

    /// Whether the world point lands on this drawable.
    #[must_use]
    pub fn hit(&self, world: Point, slop: f64) -> bool {
        self.world_bounds().inflate(slop, slop).contains(world)
            && self.template.hit(self.transform.inverse() * world, slop)
    }

    /// Template primitives moved to world space with the tint applied.
    #[must_use]
    pub fn world_primitives(&self) -> Vec<Primitive> {
        self.template
            .primitives
            .iter()
            .map(|p| {
                let outline = match &p.outline {
                    Outline::Polyline(path) => Outline::Polyline(self.transform * path.clone()),
                    closed => Outline::Polygon(self.transform * closed.to_path()),
                };
                let paint = match &p.paint {
                    Paint::Fill(color) => Paint::Fill(color.multiply(self.tint)),
                    Paint::Stroke { color, style } => Paint::Stroke { color: color.multiply(self.tint), style: style.clone() },
                    Paint::Hairline(color) => Paint::Hairline(color.multiply(self.tint)),
                };
                Primitive::new(outline, paint)
            })
            .collect()
    }
}

/// A layer drawn directly from world-space primitives.
#[derive(Debug, Clone)]
pub struct Graphics {
    primitives: Vec<Primitive>,
    pub alpha: f64,
}

impl Default for Graphics {
    fn default() -> Self {
        Self { primitives: Vec::new(), alpha: 1.0 }
    }
}

impl Graphics {
    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Union of the primitive outlines, or `None` when empty.
    #[must_use]
    pub fn local_bounds(&self) -> Option<Rect> {
        self.primitives.iter().map(|p| p.outline.bounding_box()).reduce(|a, b| a.union(b))
    }
}

/// A layer holding drawables in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Container {
    children: BTreeMap<DrawableId, Drawable>,
}

impl Container {
    fn add(&mut self, id: DrawableId, drawable: Drawable) {
        self.children.insert(id, drawable);
    }

    fn remove(&mut self, id: DrawableId) -> Option<Drawable> {
        self.children.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.children.get(&id)
    }

    /// Children bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (DrawableId, &Drawable)> {
        self.children.iter().map(|(id, d)| (*id, d))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Drawable> {
        self.children.values_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }
}

/// One entry of the layer stack.
#[derive(Debug, Clone)]
pub enum Layer {
    Fillable(Graphics),
    Container(Container),
}

impl Layer {
    pub fn clear(&mut self) {
        match self {
            Self::Fillable(graphics) => graphics.clear(),
            Self::Container(container) => container.clear(),
        }
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Self::Container(container) => Some(container),
            Self::Fillable(_) => None,
        }
    }

    #[must_use]
    pub fn as_graphics(&self) -> Option<&Graphics> {
        match self {
            Self::Fillable(graphics) => Some(graphics),
            Self::Container(_) => None,
        }
    }

    fn container_mut(&mut self) -> Option<&mut Container> {
        match self {
            Self::Container(container) => Some(container),
            Self::Fillable(_) => None,
        }
    }

    fn graphics_mut(&mut self) -> Option<&mut Graphics> {
        match self {
            Self::Fillable(graphics) => Some(graphics),
            Self::Container(_) => None,
        }
    }
}

/// Where an indexed drawable lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawableRef {
    pub layer: LayerKind,
    pub id: DrawableId,
}

/// The layer stack, template cache and identity index of one canvas.
#[derive(Debug)]
pub struct Scene {
    layers: [Layer; 8],
    templates: TemplateCache,
    special_models: Vec<Arc<Template>>,
    index: IdentityIndex<DrawableRef>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(crate::consts::HINT_ALPHA)
    }
}

impl Scene {
    #[must_use]
    pub fn new(hint_alpha: f64) -> Self {
        let layers = LayerKind::ALL.map(|kind| match kind {
            LayerKind::Fabric | LayerKind::Grid => Layer::Fillable(Graphics::default()),
            LayerKind::Hint => Layer::Fillable(Graphics { primitives: Vec::new(), alpha: hint_alpha }),
            _ => Layer::Container(Container::default()),
        });
        Self {
            layers,
            templates: TemplateCache::new(),
            special_models: Vec::new(),
            index: IdentityIndex::new(),
            next_id: 0,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> &Layer {
        &self.layers[kind.depth()]
    }

    /// Layers bottom to top.
    pub fn layers(&self) -> impl Iterator<Item = (LayerKind, &Layer)> {
        LayerKind::ALL.into_iter().zip(self.layers.iter())
    }

    pub(crate) fn containers_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.layers.iter_mut().filter_map(Layer::container_mut)
    }

    /// Total drawables across container layers.
    #[must_use]
    pub fn drawable_count(&self) -> usize {
        self.layers.iter().filter_map(Layer::as_container).map(Container::len).sum()
    }

    #[must_use]
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn lookup(&self, key: &StitchKey) -> Option<&Drawable> {
        let at = self.index.lookup(key)?;
        self.layer(at.layer).as_container()?.get(at.id)
    }

    /// Number of compiled special stitch models.
    #[must_use]
    pub fn special_model_count(&self) -> usize {
        self.special_models.len()
    }

    /// Size of the fabric rectangle, zero before a fabric is drawn.
    #[must_use]
    pub fn fabric_size(&self) -> Size {
        self.layer(LayerKind::Fabric)
            .as_graphics()
            .and_then(Graphics::local_bounds)
            .map_or(Size::ZERO, |r| r.size())
    }

    /// Whether a world point lies strictly inside the fabric.
    #[must_use]
    pub fn is_inside_fabric(&self, world: Point) -> bool {
        !crate::input::is_outside(world, self.fabric_size())
    }

    // --- Full draw ---

    /// Empty every layer, the index and the compiled special stitch models.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
        self.special_models.clear();
        self.index.clear();
    }

    /// Clear, then draw fabric, grid and every stitch of the project.
    ///
    /// # Errors
    ///
    /// Returns a [`SceneError`] for out-of-range palette or model indexes and
    /// malformed colors. The scene is left cleared in that case.
    pub fn draw_pattern(&mut self, project: &PatternProject) -> Result<(), SceneError> {
        let result = self.draw_pattern_inner(project);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn draw_pattern_inner(&mut self, project: &PatternProject) -> Result<(), SceneError> {
        self.clear();
        let pattern = &project.pattern;
        let palette = &pattern.palette;

        self.draw_fabric(pattern.properties, &pattern.fabric.color)?;
        self.draw_grid(pattern.properties, &project.display_settings.grid)?;

        for full in &pattern.fullstitches {
            self.draw_full_stitch(full, palette_item(palette, full.palindex)?)?;
        }
        for part in &pattern.partstitches {
            self.draw_part_stitch(part, palette_item(palette, part.palindex)?)?;
        }
        for line in &pattern.lines {
            self.draw_line(line, palette_item(palette, line.palindex)?)?;
        }
        for node in &pattern.nodes {
            self.draw_node(node, palette_item(palette, node.palindex)?)?;
        }

        for model in &pattern.special_stitch_models {
            self.prepare_special_stitch_model(model);
        }
        for special in &pattern.specialstitches {
            self.draw_special_stitch(special, palette_item(palette, special.palindex)?)?;
        }

        tracing::debug!(
            width = pattern.properties.width,
            height = pattern.properties.height,
            drawables = self.drawable_count(),
            indexed = self.index.len(),
            "pattern drawn"
        );
        Ok(())
    }

    /// Solid background sized to the chart.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed fabric color.
    pub fn draw_fabric(&mut self, properties: PatternProperties, color: &str) -> Result<(), SceneError> {
        let rect = Rect::new(0.0, 0.0, f64::from(properties.width), f64::from(properties.height));
        let fill = Primitive::new(Outline::Rect(rect), Paint::Fill(Color::from_hex(color)?));
        if let Some(fabric) = self.graphics_mut(LayerKind::Fabric) {
            fabric.extend([fill]);
        }
        Ok(())
    }

    /// Minor and major grid lines.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed line color.
    pub fn draw_grid(&mut self, properties: PatternProperties, grid: &Grid) -> Result<(), SceneError> {
        let primitives = grid_primitives(properties, grid)?;
        if let Some(grid) = self.graphics_mut(LayerKind::Grid) {
            grid.extend(primitives);
        }
        Ok(())
    }

    // --- Per-kind draw/remove ---

    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_full_stitch(&mut self, stitch: &FullStitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        self.draw_stitch(&Stitch::Full(*stitch), palitem)
    }

    pub fn remove_full_stitch(&mut self, stitch: &FullStitch) -> bool {
        self.remove_keyed(&StitchKey::from(stitch))
    }

    pub fn remove_full_stitches(&mut self, stitches: &[FullStitch]) {
        for stitch in stitches {
            self.remove_full_stitch(stitch);
        }
    }

    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_part_stitch(&mut self, stitch: &PartStitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        self.draw_stitch(&Stitch::Part(*stitch), palitem)
    }

    pub fn remove_part_stitch(&mut self, stitch: &PartStitch) -> bool {
        self.remove_keyed(&StitchKey::from(stitch))
    }

    pub fn remove_part_stitches(&mut self, stitches: &[PartStitch]) {
        for stitch in stitches {
            self.remove_part_stitch(stitch);
        }
    }

    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_line(&mut self, stitch: &LineStitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        self.draw_stitch(&Stitch::Line(*stitch), palitem)
    }

    pub fn remove_line(&mut self, stitch: &LineStitch) -> bool {
        self.remove_keyed(&StitchKey::from(stitch))
    }

    pub fn remove_lines(&mut self, stitches: &[LineStitch]) {
        for stitch in stitches {
            self.remove_line(stitch);
        }
    }

    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_node(&mut self, stitch: &NodeStitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        self.draw_stitch(&Stitch::Node(*stitch), palitem)
    }

    pub fn remove_node(&mut self, stitch: &NodeStitch) -> bool {
        self.remove_keyed(&StitchKey::from(stitch))
    }

    pub fn remove_nodes(&mut self, stitches: &[NodeStitch]) {
        for stitch in stitches {
            self.remove_node(stitch);
        }
    }

    /// Draw any stitch kind and register it under its identity key. A stitch
    /// already drawn under the same key is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_stitch(&mut self, stitch: &Stitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        let (layer, drawable) = self.build(stitch, palitem)?;
        let key = StitchKey::from(stitch);
        let id = DrawableId(self.next_id);
        self.next_id += 1;

        if let Some(previous) = self.index.insert(key, DrawableRef { layer, id }) {
            tracing::debug!(?key, "replacing drawn stitch");
            if let Some(container) = self.layers[previous.layer.depth()].container_mut() {
                container.remove(previous.id);
            }
        }
        if let Some(container) = self.layers[layer.depth()].container_mut() {
            container.add(id, drawable);
        }
        Ok(())
    }

    /// Draw every stitch of a bundle, resolving tints from `palette`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::PaletteIndex`] for a stitch whose palette index is
    /// out of range. Stitches before it stay drawn.
    pub fn draw_stitches(&mut self, bundle: &StitchBundle, palette: &[PaletteItem]) -> Result<(), SceneError> {
        for stitch in bundle.iter() {
            self.draw_stitch(&stitch, palette_item(palette, stitch.palindex())?)?;
        }
        Ok(())
    }

    /// Remove any stitch kind. Returns whether a drawable was removed.
    pub fn remove_stitch(&mut self, stitch: &Stitch) -> bool {
        self.remove_keyed(&StitchKey::from(stitch))
    }

    /// Remove every stitch of a bundle, kind by kind.
    pub fn remove_stitches(&mut self, bundle: &StitchBundle) {
        self.remove_full_stitches(&bundle.fullstitches);
        self.remove_part_stitches(&bundle.partstitches);
        self.remove_lines(&bundle.lines);
        self.remove_nodes(&bundle.nodes);
    }

    fn remove_keyed(&mut self, key: &StitchKey) -> bool {
        let Some(at) = self.index.remove(key) else {
            return false;
        };
        self.layers[at.layer.depth()].container_mut().and_then(|c| c.remove(at.id)).is_some()
    }

    // --- Special stitches ---

    /// Compile a model and append it to the model table.
    pub fn prepare_special_stitch_model(&mut self, model: &SpecialStitchModel) {
        let index = self.special_models.len();
        self.special_models.push(Arc::new(compile(index, model)));
    }

    /// Place a compiled model. Special stitches are not indexed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::ModelIndex`] if the model was never prepared, or
    /// [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_special_stitch(&mut self, stitch: &SpecialStitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        let template = self
            .special_models
            .get(usize::from(stitch.modindex))
            .cloned()
            .ok_or(SceneError::ModelIndex { index: stitch.modindex, len: self.special_models.len() })?;
        let tint = Color::from_hex(&palitem.color)?;
        let drawable = Drawable::new(template, tint, placement_transform(stitch), None);
        let id = DrawableId(self.next_id);
        self.next_id += 1;
        if let Some(container) = self.layers[LayerKind::SpecialStitches.depth()].container_mut() {
            container.add(id, drawable);
        }
        Ok(())
    }

    // --- Hint ---

    /// Replace the hint layer with a preview of `stitch`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::InvalidColor`] for a malformed palette color.
    pub fn draw_hint(&mut self, stitch: &Stitch, palitem: &PaletteItem) -> Result<(), SceneError> {
        let (_, drawable) = self.build(stitch, palitem)?;
        if let Some(hint) = self.graphics_mut(LayerKind::Hint) {
            hint.clear();
            hint.extend(drawable.world_primitives());
        }
        Ok(())
    }

    pub fn clear_hint(&mut self) {
        if let Some(hint) = self.graphics_mut(LayerKind::Hint) {
            hint.clear();
        }
    }

    // --- Internals ---

    fn graphics_mut(&mut self, kind: LayerKind) -> Option<&mut Graphics> {
        self.layers[kind.depth()].graphics_mut()
    }

    fn build(&mut self, stitch: &Stitch, palitem: &PaletteItem) -> Result<(LayerKind, Drawable), SceneError> {
        let tint = Color::from_hex(&palitem.color)?;
        let payload = Some(*stitch);
        let built = match stitch {
            Stitch::Full(s) => {
                let transform = translate(s.x, s.y);
                (LayerKind::FullStitches, Drawable::new(self.templates.full(s.kind), tint, transform, payload))
            }
            Stitch::Part(s) => {
                let template = self.templates.part(s.kind, s.direction);
                (LayerKind::PartStitches, Drawable::new(template, tint, translate(s.x, s.y), payload))
            }
            Stitch::Line(s) => {
                let (start, end) = (s.start(), s.end());
                let delta = Point::new(f64::from(end.0 - start.0), f64::from(end.1 - start.1));
                let template = Arc::new(line_template(delta));
                (LayerKind::Lines, Drawable::new(template, tint, translate(start.0, start.1), payload))
            }
            Stitch::Node(s) => {
                let template = self.templates.node(s.kind, palitem.bead);
                let angle = if s.rotated { std::f64::consts::FRAC_PI_2 } else { 0.0 };
                let transform = translate(s.x, s.y) * Affine::rotate(angle);
                (LayerKind::Nodes, Drawable::new(template, tint, transform, payload))
            }
        };
        Ok(built)
    }
}

fn translate(x: f32, y: f32) -> Affine {
    Affine::translate((f64::from(x), f64::from(y)))
}

fn palette_item(palette: &[PaletteItem], index: u8) -> Result<&PaletteItem, SceneError> {
    palette.get(usize::from(index)).ok_or(SceneError::PaletteIndex { index, len: palette.len() })
}
