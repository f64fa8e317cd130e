//! iced canvas backend for the slider
//!
//! `CanvasBackend` keeps the latest scene and a geometry cache that is cleared
//! whenever a new scene is applied. `SliderCanvas` is the canvas `Program`:
//! it paints the scene and translates mouse and touch events into
//! `SliderEvent`s published through the `on_event` callback.

use std::collections::{HashMap, HashSet};
use std::fmt;

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Text};
use iced::{mouse, touch, Color, Point, Rectangle, Size, Theme};

use crate::interaction::PointerSource;
use crate::render::{Fill, RenderBackend, Scene};
use crate::slider::{DashSlider, SliderEvent};
use crate::theme;

/// Fallback for colour strings the backend can't interpret
const FALLBACK_COLOR: Color = Color::WHITE;

/// Render backend drawing into an iced canvas
pub struct CanvasBackend {
    cache: canvas::Cache,
    scene: Option<Scene>,
    palette: HashMap<String, Color>,
    /// Invalid colour strings already reported
    warned: HashSet<String>,
}

impl Default for CanvasBackend {
    fn default() -> Self {
        Self {
            cache: canvas::Cache::new(),
            scene: None,
            palette: HashMap::new(),
            warned: HashSet::new(),
        }
    }
}

impl fmt::Debug for CanvasBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasBackend")
            .field("has_scene", &self.scene.is_some())
            .field("palette", &self.palette.len())
            .finish()
    }
}

impl CanvasBackend {
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    fn color(&self, name: &str) -> Color {
        self.palette.get(name).copied().unwrap_or(FALLBACK_COLOR)
    }

    fn draw(&self, renderer: &iced::Renderer, size: Size) -> Option<Geometry> {
        let scene = self.scene.as_ref()?;
        Some(self.cache.draw(renderer, size, |frame| {
            paint_scene(frame, scene, |c| self.color(c));
        }))
    }
}

impl RenderBackend for CanvasBackend {
    fn teardown(&mut self) {
        self.cache.clear();
        self.scene = None;
        self.palette.clear();
    }

    fn apply(&mut self, scene: &Scene) {
        for color in scene_colors(scene) {
            if self.palette.contains_key(color) {
                continue;
            }
            let parsed = theme::parse_color(color).unwrap_or_else(|| {
                if self.warned.insert(color.to_string()) {
                    log::warn!("Invalid slider color '{}', using white", color);
                }
                FALLBACK_COLOR
            });
            self.palette.insert(color.to_string(), parsed);
        }
        self.scene = Some(scene.clone());
        self.cache.clear();
    }
}

fn scene_colors(scene: &Scene) -> impl Iterator<Item = &str> {
    std::iter::once(scene.track.color.as_str())
        .chain(scene.window.iter().map(|w| w.color.as_str()))
        .chain(scene.dashes.iter().map(|d| d.fill.color.as_str()))
        .chain(scene.labels.iter().map(|l| l.color.as_str()))
        .chain(std::iter::once(scene.handle.color.as_str()))
}

fn fill_rounded(frame: &mut Frame, fill: &Fill, color: Color) {
    let size = Size::new(fill.rect.width.max(0.0), fill.rect.height.max(0.0));
    let radius = fill.radius.clamp(0.0, size.width.min(size.height) / 2.0);
    let path = Path::rounded_rectangle(Point::new(fill.rect.x, fill.rect.y), size, radius.into());
    frame.fill(&path, color);
}

/// Paint `scene` back to front: grid, window, dashes, labels, handle
fn paint_scene(frame: &mut Frame, scene: &Scene, color: impl Fn(&str) -> Color) {
    fill_rounded(frame, &scene.track, color(&scene.track.color));

    if let Some(window) = &scene.window {
        fill_rounded(frame, window, color(&window.color));
    }

    for dash in scene.dashes.iter().filter(|d| d.visible) {
        fill_rounded(frame, &dash.fill, color(&dash.fill.color));
    }

    for label in scene.labels.iter().filter(|l| l.visible) {
        frame.fill_text(Text {
            content: label.text.clone(),
            position: Point::new(label.x, label.bottom),
            size: label.size.into(),
            color: color(&label.color),
            font: theme::font(&label.font, label.weight),
            align_x: Horizontal::Center.into(),
            align_y: Vertical::Bottom.into(),
            ..Text::default()
        });
    }

    fill_rounded(frame, &scene.handle, color(&scene.handle.color));
}

/// Canvas state for a press that may become a click
#[derive(Debug, Clone, Copy, Default)]
pub struct SliderInteraction {
    /// Pointer pressed on the track (not the handle), click fires on release
    pub pending_click: Option<PointerSource>,
}

/// Canvas program for one slider
pub struct SliderCanvas<'a, Message, F>
where
    F: Fn(SliderEvent) -> Message,
{
    pub slider: &'a DashSlider,
    pub on_event: F,
}

impl<'a, Message, F> SliderCanvas<'a, Message, F>
where
    F: Fn(SliderEvent) -> Message,
{
    fn publish(&self, event: SliderEvent) -> Option<canvas::Action<Message>> {
        Some(canvas::Action::publish((self.on_event)(event)).and_capture())
    }

    fn press(
        &self,
        interaction: &mut SliderInteraction,
        source: PointerSource,
        local: Point,
    ) -> Option<canvas::Action<Message>> {
        if self.slider.hits_handle(local.x, local.y) {
            return self.publish(SliderEvent::Pressed {
                source,
                x: local.x,
                y: local.y,
            });
        }
        if self.slider.hits_track(local.x, local.y) {
            interaction.pending_click = Some(source);
        }
        None
    }

    fn release(
        &self,
        interaction: &mut SliderInteraction,
        source: PointerSource,
        local: Option<Point>,
    ) -> Option<canvas::Action<Message>> {
        if interaction.pending_click == Some(source) {
            interaction.pending_click = None;
            return match local {
                Some(p) if self.slider.hits_track(p.x, p.y) => self.publish(SliderEvent::Clicked { x: p.x }),
                _ => None,
            };
        }
        if self.slider.is_dragging() {
            return self.publish(SliderEvent::Released { source });
        }
        None
    }

    fn moved(&self, source: PointerSource, x: f32) -> Option<canvas::Action<Message>> {
        if self.slider.is_dragging() {
            return self.publish(SliderEvent::Moved { source, x });
        }
        None
    }
}

impl<'a, Message, F> Program<Message> for SliderCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(SliderEvent) -> Message,
{
    type State = SliderInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let resized = bounds.width != self.slider.container_width();

        // Positions relative to the canvas, valid outside the bounds too
        let local = |p: Point| Point::new(p.x - bounds.x, p.y - bounds.y);

        let action = match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => cursor
                .position_in(bounds)
                .and_then(|position| self.press(interaction, PointerSource::Mouse, position)),
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                self.moved(PointerSource::Mouse, local(*position).x)
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                self.release(interaction, PointerSource::Mouse, cursor.position_in(bounds))
            }
            Event::Touch(touch::Event::FingerPressed { id, position }) if bounds.contains(*position) => {
                self.press(interaction, PointerSource::Touch(id.0), local(*position))
            }
            Event::Touch(touch::Event::FingerMoved { id, position }) => {
                self.moved(PointerSource::Touch(id.0), local(*position).x)
            }
            Event::Touch(
                touch::Event::FingerLifted { id, position } | touch::Event::FingerLost { id, position },
            ) => {
                let inside = bounds.contains(*position).then(|| local(*position));
                self.release(interaction, PointerSource::Touch(id.0), inside)
            }
            _ => None,
        };

        // Pointer input wins; a pending resize rides on the next idle event
        if action.is_none() && resized {
            return Some(canvas::Action::publish((self.on_event)(SliderEvent::Resized {
                width: bounds.width,
            })));
        }
        action
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.slider.is_dragging() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(p) if self.slider.hits_handle(p.x, p.y) => mouse::Interaction::Grab,
            Some(p) if self.slider.hits_track(p.x, p.y) => mouse::Interaction::Pointer,
            _ => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        if bounds.width == self.slider.container_width() {
            if let Some(geometry) = self.slider.backend().draw(renderer, bounds.size()) {
                return vec![geometry];
            }
        }

        // Resize not processed yet: draw an uncached scene for the actual width
        let mut frame = Frame::new(renderer, bounds.size());
        if let Some(scene) = self.slider.scene_for_width(bounds.width) {
            paint_scene(&mut frame, &scene, |c| theme::parse_color(c).unwrap_or(FALLBACK_COLOR));
        }
        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ResolvedOptions, SliderOptions};
    use crate::layout::Layout;
    use crate::render::Metrics;
    use crate::values::ValueSet;

    fn scene(options: &ResolvedOptions) -> Scene {
        let values = ValueSet::from_range(8, 17).unwrap();
        let metrics = Metrics::new(options, 930.0);
        let layout = Layout::compute(&values, metrics.track_width, options, Some(12.0)).unwrap();
        Scene::build(&layout, &values, options, &metrics, layout.handle_offset, layout.active_index)
    }

    #[test]
    fn test_apply_builds_palette() {
        let mut backend = CanvasBackend::default();
        backend.apply(&scene(&ResolvedOptions::default()));
        assert_eq!(backend.color("red"), Color::from_rgb8(255, 0, 0));
        assert_eq!(backend.color("#223345"), Color::from_rgb8(0x22, 0x33, 0x45));
        assert!(backend.scene().is_some());
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let options = ResolvedOptions::resolve(&SliderOptions {
            bar_color: Some("linear-gradient(#fff, #000)".to_string()),
            ..Default::default()
        });
        let mut backend = CanvasBackend::default();
        backend.apply(&scene(&options));
        backend.apply(&scene(&options));
        assert_eq!(backend.color("linear-gradient(#fff, #000)"), FALLBACK_COLOR);
        assert_eq!(backend.warned.len(), 1);
    }

    #[test]
    fn test_teardown_clears_scene() {
        let mut backend = CanvasBackend::default();
        backend.apply(&scene(&ResolvedOptions::default()));
        backend.teardown();
        assert!(backend.scene().is_none());
        assert!(backend.palette.is_empty());
    }

    const ORIGIN: Point = Point::new(100.0, 50.0);

    fn font_size_slider() -> DashSlider {
        let values = ValueSet::from_range(8, 17).unwrap().as_slice().to_vec();
        let mut slider: DashSlider = DashSlider::new(values, &SliderOptions::default(), Some(12.0)).unwrap();
        slider.resize(930.0).unwrap();
        slider
    }

    fn bounds(slider: &DashSlider, width: f32) -> Rectangle {
        Rectangle {
            x: ORIGIN.x,
            y: ORIGIN.y,
            width,
            height: slider.metrics().height,
        }
    }

    /// Handle centre in canvas coordinates
    fn handle_center(slider: &DashSlider) -> Point {
        let rect = slider.metrics().handle_rect(slider.options(), slider.layout().handle_offset);
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
    }

    fn window_point(local: Point) -> Point {
        Point::new(local.x + ORIGIN.x, local.y + ORIGIN.y)
    }

    fn run(
        slider: &DashSlider,
        interaction: &mut SliderInteraction,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<SliderEvent> {
        let program = SliderCanvas {
            slider,
            on_event: |e: SliderEvent| e,
        };
        program
            .update(interaction, &event, bounds, cursor)
            .and_then(|action| action.into_inner().0)
    }

    fn left_press() -> Event {
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left))
    }

    fn left_release() -> Event {
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
    }

    #[test]
    fn test_press_on_handle_publishes_pressed() {
        let slider = font_size_slider();
        let bounds = bounds(&slider, 930.0);
        let center = handle_center(&slider);
        let mut interaction = SliderInteraction::default();

        let event = run(
            &slider,
            &mut interaction,
            left_press(),
            bounds,
            mouse::Cursor::Available(window_point(center)),
        );
        assert_eq!(
            event,
            Some(SliderEvent::Pressed {
                source: PointerSource::Mouse,
                x: center.x,
                y: center.y,
            })
        );
        assert_eq!(interaction.pending_click, None);
    }

    #[test]
    fn test_drag_tracked_outside_bounds() {
        let mut slider = font_size_slider();
        let bounds = bounds(&slider, 930.0);
        let mut interaction = SliderInteraction::default();

        // Not dragging yet: moves are ignored
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(-200.0, 400.0),
        });
        assert_eq!(run(&slider, &mut interaction, moved.clone(), bounds, mouse::Cursor::Unavailable), None);

        let center = handle_center(&slider);
        slider
            .handle_event(SliderEvent::Pressed {
                source: PointerSource::Mouse,
                x: center.x,
                y: center.y,
            })
            .unwrap();

        assert_eq!(
            run(&slider, &mut interaction, moved, bounds, mouse::Cursor::Unavailable),
            Some(SliderEvent::Moved {
                source: PointerSource::Mouse,
                x: -300.0,
            })
        );
        assert_eq!(
            run(&slider, &mut interaction, left_release(), bounds, mouse::Cursor::Unavailable),
            Some(SliderEvent::Released {
                source: PointerSource::Mouse,
            })
        );
    }

    #[test]
    fn test_track_press_clicks_only_when_released_over_track() {
        let slider = font_size_slider();
        let bounds = bounds(&slider, 930.0);
        let grid = slider.metrics().grid;
        let on_track = Point::new(slider.metrics().track_left + 140.0, grid.y + grid.height / 2.0);
        let cursor = mouse::Cursor::Available(window_point(on_track));
        let mut interaction = SliderInteraction::default();

        assert_eq!(run(&slider, &mut interaction, left_press(), bounds, cursor), None);
        assert_eq!(interaction.pending_click, Some(PointerSource::Mouse));
        assert_eq!(
            run(&slider, &mut interaction, left_release(), bounds, cursor),
            Some(SliderEvent::Clicked { x: on_track.x })
        );

        // Released after leaving the widget: no click
        assert_eq!(run(&slider, &mut interaction, left_press(), bounds, cursor), None);
        assert_eq!(
            run(&slider, &mut interaction, left_release(), bounds, mouse::Cursor::Unavailable),
            None
        );
        assert_eq!(interaction.pending_click, None);
    }

    #[test]
    fn test_finger_lost_releases_drag() {
        let mut slider = font_size_slider();
        let bounds = bounds(&slider, 930.0);
        let finger = PointerSource::Touch(3);
        let center = handle_center(&slider);
        let mut interaction = SliderInteraction::default();

        let pressed = Event::Touch(touch::Event::FingerPressed {
            id: touch::Finger(3),
            position: window_point(center),
        });
        assert_eq!(
            run(&slider, &mut interaction, pressed, bounds, mouse::Cursor::Unavailable),
            Some(SliderEvent::Pressed {
                source: finger,
                x: center.x,
                y: center.y,
            })
        );

        slider
            .handle_event(SliderEvent::Pressed {
                source: finger,
                x: center.x,
                y: center.y,
            })
            .unwrap();
        let lost = Event::Touch(touch::Event::FingerLost {
            id: touch::Finger(3),
            position: Point::new(2000.0, 2000.0),
        });
        assert_eq!(
            run(&slider, &mut interaction, lost, bounds, mouse::Cursor::Unavailable),
            Some(SliderEvent::Released { source: finger })
        );
    }

    #[test]
    fn test_resize_does_not_swallow_pointer_events() {
        let mut slider = font_size_slider();
        let center = handle_center(&slider);
        slider
            .handle_event(SliderEvent::Pressed {
                source: PointerSource::Mouse,
                x: center.x,
                y: center.y,
            })
            .unwrap();

        // Laid out narrower than the slider was last sized for
        let narrow = bounds(&slider, 600.0);
        let mut interaction = SliderInteraction::default();
        assert_eq!(
            run(&slider, &mut interaction, left_release(), narrow, mouse::Cursor::Unavailable),
            Some(SliderEvent::Released {
                source: PointerSource::Mouse,
            })
        );

        slider
            .handle_event(SliderEvent::Released {
                source: PointerSource::Mouse,
            })
            .unwrap();
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: Point::new(300.0, 80.0),
        });
        assert_eq!(
            run(&slider, &mut interaction, moved, narrow, mouse::Cursor::Unavailable),
            Some(SliderEvent::Resized { width: 600.0 })
        );
    }
}
