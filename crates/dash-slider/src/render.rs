//! Render/sync engine
//!
//! Turns a `Layout` into a declarative `Scene` (rectangles, labels, colours as
//! opaque strings) and hands it to a swappable `RenderBackend`. `RenderSync`
//! tears the backend down before any structural rebuild and skips re-applying
//! a scene identical to the last one.
//!
//! Canvas coordinates: origin at the top-left of the widget, y down.
//!
//! ```text
//!         label            label            label
//!   ┌──────────────────────────────────────────────┐
//!   │ █████████▌  ╎   ╎  ┃▓┃  ╎   │   ╎   ╎   │    │  ← grid (track + padding)
//!   └──────────────────────────────────────────────┘
//!     window          handle
//! ```

use crate::config::ResolvedOptions;
use crate::layout::Layout;
use crate::values::{DiscreteValue, ValueSet};

/// Extra lift between a dash and its label
pub const LABEL_LIFT: f32 = 15.0;

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Filled rounded rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub rect: Rect,
    pub radius: f32,
    pub color: String,
}

/// Tick mark for one value
#[derive(Debug, Clone, PartialEq)]
pub struct DashMark {
    pub value: f64,
    pub fill: Fill,
    pub visible: bool,
}

/// Text above a dash
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMark {
    pub text: String,
    /// Horizontal centre
    pub x: f32,
    /// Baseline box bottom
    pub bottom: f32,
    pub color: String,
    pub font: String,
    pub size: f32,
    pub weight: u16,
    /// Label of the highlighted value
    pub active: bool,
    pub visible: bool,
}

/// Widget geometry derived from options and container width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Horizontal room for the handle overhanging the grid
    pub margin_x: f32,
    pub grid: Rect,
    /// Canvas x of track offset 0
    pub track_left: f32,
    pub track_width: f32,
    /// Total widget height (labels and handle overhang included)
    pub height: f32,
}

impl Metrics {
    pub fn new(options: &ResolvedOptions, container_width: f32) -> Self {
        let grid_h = options.grid_height;
        let margin_x = (options.bar_width / 2.0 - options.grid_padding).max(0.0);
        let grid_width = (container_width - 2.0 * margin_x).max(0.0);

        // Vertical extents relative to the grid top
        let dash_top = grid_h / 2.0 - options.dash_height / 2.0;
        let label_top = dash_top - options.dash_mark_padding - LABEL_LIFT - options.dash_mark_font_size;
        let bar_top = grid_h / 2.0 - options.bar_height / 2.0;
        let min_y = 0.0_f32.min(label_top).min(bar_top);
        let max_y = grid_h.max(bar_top + options.bar_height);
        let grid_top = -min_y;

        Self {
            margin_x,
            grid: Rect {
                x: margin_x,
                y: grid_top,
                width: grid_width,
                height: grid_h,
            },
            track_left: margin_x + options.grid_padding,
            track_width: (grid_width - 2.0 * options.grid_padding).max(0.0),
            height: grid_top + max_y,
        }
    }

    /// Convert a canvas x coordinate into a track offset
    pub fn to_track(&self, canvas_x: f32) -> f32 {
        canvas_x - self.track_left
    }

    /// Handle rectangle for a handle centred at `handle_offset`
    pub fn handle_rect(&self, options: &ResolvedOptions, handle_offset: f32) -> Rect {
        Rect {
            x: self.track_left + handle_offset - options.bar_width / 2.0,
            y: self.grid.y + self.grid.height / 2.0 - options.bar_height / 2.0,
            width: options.bar_width,
            height: options.bar_height,
        }
    }
}

/// Declarative description of the whole widget
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub track: Fill,
    pub window: Option<Fill>,
    pub dashes: Vec<DashMark>,
    pub labels: Vec<LabelMark>,
    pub handle: Fill,
}

impl Scene {
    /// Build the scene for `layout`
    ///
    /// `handle_offset` and `highlighted` differ from the committed layout only
    /// while a drag is in progress.
    pub fn build(
        layout: &Layout,
        values: &ValueSet,
        options: &ResolvedOptions,
        metrics: &Metrics,
        handle_offset: f32,
        highlighted: usize,
    ) -> Self {
        let grid_y = metrics.grid.y;
        let dash_top = grid_y + options.grid_height / 2.0 - options.dash_height / 2.0;
        let label_bottom = dash_top - options.dash_mark_padding - LABEL_LIFT;

        let window = layout.window.as_ref().map(|w| Fill {
            rect: Rect {
                x: metrics.track_left + w.start_offset - options.dash_width / 2.0,
                y: grid_y,
                width: w.end_offset - w.start_offset + options.dash_width / 2.0,
                height: options.grid_height,
            },
            radius: 0.0,
            color: w.color.clone().unwrap_or_else(|| options.dash_color.clone()),
        });
        // The window replaces the dash it starts on
        let window_dash = layout.window.as_ref().map(|w| w.start_index);

        let dashes = layout
            .dashes
            .iter()
            .map(|d| DashMark {
                value: d.value,
                fill: Fill {
                    rect: Rect {
                        x: metrics.track_left + d.offset - options.dash_width / 2.0,
                        y: dash_top,
                        width: options.dash_width,
                        height: options.dash_height,
                    },
                    radius: options.dash_border_radius,
                    color: options.dash_color.clone(),
                },
                visible: d.visible && window_dash != Some(d.index),
            })
            .collect();

        let labels = layout
            .dashes
            .iter()
            .zip(values.iter())
            .map(|(d, v)| {
                let active = d.index == highlighted;
                LabelMark {
                    text: v.label.to_string(),
                    x: metrics.track_left + d.offset,
                    bottom: label_bottom,
                    color: if active {
                        options.dash_mark_selected_color.clone()
                    } else {
                        options.dash_mark_color.clone()
                    },
                    font: options.dash_mark_font.clone(),
                    size: options.dash_mark_font_size,
                    weight: options.dash_mark_font_weight,
                    active,
                    visible: d.visible,
                }
            })
            .collect();

        Self {
            width: metrics.grid.width + 2.0 * metrics.margin_x,
            height: metrics.height,
            track: Fill {
                rect: metrics.grid,
                radius: options.grid_border_radius,
                color: options.grid_color.clone(),
            },
            window,
            dashes,
            labels,
            handle: Fill {
                rect: metrics.handle_rect(options, handle_offset),
                radius: options.bar_border_radius,
                color: options.bar_color.clone(),
            },
        }
    }

    /// Text of the highlighted label
    pub fn active_label(&self) -> Option<&str> {
        self.labels.iter().find(|l| l.active).map(|l| l.text.as_str())
    }
}

/// Target that displays scenes
pub trait RenderBackend {
    /// Remove everything previously drawn
    fn teardown(&mut self);
    /// Show `scene`
    fn apply(&mut self, scene: &Scene);
}

/// Inputs whose change forces a teardown and rebuild
#[derive(Debug, Clone, PartialEq)]
pub struct StructureKey {
    pub values: Vec<DiscreteValue>,
    pub options: ResolvedOptions,
    pub container_width: f32,
}

/// What `RenderSync::sync` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Structure changed: backend torn down, scene applied
    Rebuilt,
    /// Same structure, new scene applied
    Updated,
    /// Identical scene, nothing applied
    Unchanged,
}

/// Keeps a backend in step with the latest scene
#[derive(Debug, Default)]
pub struct RenderSync<B> {
    backend: B,
    structure: Option<StructureKey>,
    scene: Option<Scene>,
}

impl<B: RenderBackend> RenderSync<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            structure: None,
            scene: None,
        }
    }

    pub fn sync(&mut self, structure: StructureKey, scene: Scene) -> SyncOutcome {
        if self.structure.as_ref() != Some(&structure) {
            self.backend.teardown();
            self.backend.apply(&scene);
            self.structure = Some(structure);
            self.scene = Some(scene);
            return SyncOutcome::Rebuilt;
        }

        if self.scene.as_ref() == Some(&scene) {
            return SyncOutcome::Unchanged;
        }

        self.backend.apply(&scene);
        self.scene = Some(scene);
        SyncOutcome::Updated
    }

    /// Tear down without rebuilding
    pub fn teardown(&mut self) {
        self.backend.teardown();
        self.structure = None;
        self.scene = None;
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
