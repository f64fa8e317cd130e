//! Slider component
//!
//! Owns the value set, resolved options, committed selection and interaction
//! state, and keeps the rendered scene in sync after every event. The
//! selection is the single source of truth: handle position and highlighted
//! label are always derived from it (or from the live drag session).

use crate::binding::ValueBinding;
use crate::canvas::CanvasBackend;
use crate::config::{ResolvedOptions, SliderOptions};
use crate::error::SliderError;
use crate::interaction::{Controller, DragUpdate, PointerSource};
use crate::layout::Layout;
use crate::render::{Metrics, RenderBackend, RenderSync, Scene, StructureKey, SyncOutcome};
use crate::values::{DiscreteValue, ValueSet};

/// Input delivered to a slider
///
/// Coordinates are canvas coordinates (see `render`). Moves and releases are
/// delivered regardless of where the pointer is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SliderEvent {
    /// Pointer pressed inside the widget
    Pressed { source: PointerSource, x: f32, y: f32 },
    /// Pointer moved anywhere
    Moved { source: PointerSource, x: f32 },
    /// Pointer released anywhere
    Released { source: PointerSource },
    /// Press and release on the track without dragging the handle
    Clicked { x: f32 },
    /// Container width changed
    Resized { width: f32 },
}

/// Value-snapping slider over a discrete value set
#[derive(Debug)]
pub struct DashSlider<B: RenderBackend = CanvasBackend> {
    values: ValueSet,
    user_options: SliderOptions,
    options: ResolvedOptions,
    container_width: f32,
    metrics: Metrics,
    layout: Layout,
    binding: ValueBinding,
    controller: Controller,
    sync: RenderSync<B>,
    /// Set by `destroy`; every later call is a no-op
    destroyed: bool,
}

impl<B: RenderBackend + Default> DashSlider<B> {
    /// Create a slider; `value` of `None` selects the smallest value
    pub fn new(
        values: Vec<DiscreteValue>,
        options: &SliderOptions,
        value: Option<f64>,
    ) -> Result<Self, SliderError> {
        Self::with_backend(values, options, value, B::default())
    }
}

impl<B: RenderBackend> DashSlider<B> {
    /// Create a slider drawing into `backend`
    pub fn with_backend(
        values: Vec<DiscreteValue>,
        options: &SliderOptions,
        value: Option<f64>,
        backend: B,
    ) -> Result<Self, SliderError> {
        let values = ValueSet::new(values)?;
        let resolved = ResolvedOptions::resolve(options);
        let binding = ValueBinding::new(value);
        let (metrics, layout) = relayout(&values, &resolved, 0.0, binding.get_value())?;

        let mut slider = Self {
            values,
            user_options: options.clone(),
            options: resolved,
            container_width: 0.0,
            metrics,
            layout,
            binding,
            controller: Controller::new(),
            sync: RenderSync::new(backend),
            destroyed: false,
        };
        slider.render();
        Ok(slider)
    }

    /// Committed value (the smallest value until one is selected)
    pub fn value(&self) -> f64 {
        self.layout.value
    }

    /// Value as last written or committed, `None` if never set
    pub fn get_value(&self) -> Option<f64> {
        self.binding.get_value()
    }

    /// Write a value from the host and re-render at its position
    ///
    /// `None`/NaN is ignored. `Some(0.0)` is a regular value and is applied
    /// like any other. A value outside the set fails and leaves the slider
    /// unchanged.
    pub fn set_value(&mut self, value: Option<f64>) -> Result<(), SliderError> {
        if self.destroyed {
            return Ok(());
        }
        let Some(value) = value.filter(|v| !v.is_nan()) else {
            return Ok(());
        };

        let layout = Layout::compute(&self.values, self.metrics.track_width, &self.options, Some(value))?;
        self.binding.set_value(Some(value));
        self.layout = layout;
        self.controller.teardown();
        self.render();
        Ok(())
    }

    /// Replace the value set
    pub fn set_values(&mut self, values: Vec<DiscreteValue>) -> Result<(), SliderError> {
        if self.destroyed {
            return Ok(());
        }
        let values = ValueSet::new(values)?;
        let (metrics, layout) =
            relayout(&values, &self.options, self.container_width, self.binding.get_value())?;
        self.values = values;
        self.rebuild(metrics, layout);
        Ok(())
    }

    /// Replace the user options (overlaid on defaults)
    pub fn set_options(&mut self, options: &SliderOptions) -> Result<(), SliderError> {
        if self.destroyed {
            return Ok(());
        }
        let resolved = ResolvedOptions::resolve(options);
        let (metrics, layout) =
            relayout(&self.values, &resolved, self.container_width, self.binding.get_value())?;
        self.user_options = options.clone();
        self.options = resolved;
        self.rebuild(metrics, layout);
        Ok(())
    }

    /// Lay the slider out for a new container width
    pub fn resize(&mut self, container_width: f32) -> Result<(), SliderError> {
        if self.destroyed {
            return Ok(());
        }
        let (metrics, layout) =
            relayout(&self.values, &self.options, container_width, self.binding.get_value())?;
        self.container_width = container_width;
        self.rebuild(metrics, layout);
        Ok(())
    }

    /// Feed one input event
    ///
    /// Returns the committed value when the event ends an interaction.
    pub fn handle_event(&mut self, event: SliderEvent) -> Result<Option<f64>, SliderError> {
        if self.destroyed {
            return Ok(None);
        }
        match event {
            SliderEvent::Pressed { source, x, y } => {
                if !self.hits_handle(x, y) {
                    return Ok(None);
                }
                self.binding.touch();
                if self.controller.press(source, x, self.layout.handle_offset) {
                    log::debug!("slider: drag started by {:?}", source);
                }
                Ok(None)
            }
            SliderEvent::Moved { source, x } => {
                match self.controller.drag(source, x, &self.layout) {
                    DragUpdate::Ignored => {}
                    DragUpdate::Preview { .. } | DragUpdate::SnapBack { .. } => {
                        self.render();
                    }
                }
                Ok(None)
            }
            SliderEvent::Released { source } => match self.controller.release(source, &self.layout) {
                Some(index) => self.commit(index).map(Some),
                None => Ok(None),
            },
            SliderEvent::Clicked { x } => {
                self.binding.touch();
                match self.controller.click(self.metrics.to_track(x), &self.layout) {
                    Some(index) => self.commit(index).map(Some),
                    None => Ok(None),
                }
            }
            SliderEvent::Resized { width } => {
                if width != self.container_width {
                    self.resize(width)?;
                }
                Ok(None)
            }
        }
    }

    /// Register the value-changed observer
    pub fn on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.binding.on_change(callback);
    }

    /// Register the touched observer (fires on the first interaction)
    pub fn on_touched(&mut self, callback: impl FnMut() + 'static) {
        self.binding.on_touched(callback);
    }

    /// Whether the pointer at canvas (`x`, `y`) is over the handle
    pub fn hits_handle(&self, x: f32, y: f32) -> bool {
        let offset = self
            .controller
            .session()
            .map_or(self.layout.handle_offset, |s| s.handle_offset());
        self.metrics.handle_rect(&self.options, offset).contains(x, y)
    }

    /// Whether the pointer at canvas (`x`, `y`) is over the grid
    pub fn hits_track(&self, x: f32, y: f32) -> bool {
        self.metrics.grid.contains(x, y)
    }

    /// Last scene handed to the backend
    pub fn scene(&self) -> Option<&Scene> {
        self.sync.scene()
    }

    /// Scene for a container width other than the current one
    ///
    /// Used to draw correctly before a pending resize is processed.
    pub fn scene_for_width(&self, container_width: f32) -> Option<Scene> {
        let (metrics, layout) =
            relayout(&self.values, &self.options, container_width, self.binding.get_value()).ok()?;
        Some(Scene::build(
            &layout,
            &self.values,
            &self.options,
            &metrics,
            layout.handle_offset,
            layout.active_index,
        ))
    }

    /// Tear down interaction state, observers and drawn output
    ///
    /// The slider is inert afterwards: events and setters are ignored and
    /// nothing is drawn again.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.controller.teardown();
        self.binding.clear_observers();
        self.sync.teardown();
    }

    pub fn values(&self) -> &ValueSet {
        &self.values
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn user_options(&self) -> &SliderOptions {
        &self.user_options
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    pub fn backend(&self) -> &B {
        self.sync.backend()
    }

    fn commit(&mut self, index: usize) -> Result<f64, SliderError> {
        let value = self
            .values
            .get(index)
            .map(|v| v.value)
            .ok_or(SliderError::ValueNotListed(f64::NAN))?;
        self.layout = Layout::compute(&self.values, self.metrics.track_width, &self.options, Some(value))?;
        self.binding.commit(value);
        self.render();
        log::debug!("slider: committed {}", value);
        Ok(value)
    }

    fn rebuild(&mut self, metrics: Metrics, layout: Layout) {
        // Stored offsets are stale after a structural change
        self.controller.teardown();
        self.metrics = metrics;
        self.layout = layout;
        self.render();
    }

    fn render(&mut self) -> SyncOutcome {
        let (handle_offset, highlighted) = match self.controller.session() {
            Some(session) => (
                session.handle_offset(),
                session.provisional().unwrap_or(self.layout.active_index),
            ),
            None => (self.layout.handle_offset, self.layout.active_index),
        };
        let scene = Scene::build(
            &self.layout,
            &self.values,
            &self.options,
            &self.metrics,
            handle_offset,
            highlighted,
        );
        let structure = StructureKey {
            values: self.values.as_slice().to_vec(),
            options: self.options.clone(),
            container_width: self.container_width,
        };
        self.sync.sync(structure, scene)
    }
}

fn relayout(
    values: &ValueSet,
    options: &ResolvedOptions,
    container_width: f32,
    selection: Option<f64>,
) -> Result<(Metrics, Layout), SliderError> {
    let metrics = Metrics::new(options, container_width);
    let layout = Layout::compute(values, metrics.track_width, options, selection)?;
    Ok((metrics, layout))
}
