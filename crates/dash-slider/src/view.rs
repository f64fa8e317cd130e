//! Slider view function
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     dash_slider(&self.font_size, Message::FontSize)
//! }
//!
//! fn update(&mut self, message: Message) {
//!     if let Message::FontSize(event) = message {
//!         match self.font_size.handle_event(event) {
//!             Ok(Some(value)) => self.preview_size = value,
//!             Ok(None) => {}
//!             Err(e) => log::error!("font size slider: {}", e),
//!         }
//!     }
//! }
//! ```

use iced::widget::{row, Canvas, Space};
use iced::{Element, Length};

use crate::canvas::SliderCanvas;
use crate::config::TrackWidth;
use crate::slider::{DashSlider, SliderEvent};

/// Create the slider element
///
/// # Arguments
///
/// * `slider` - Slider state owned by the application
/// * `on_event` - Wraps slider input into an application message; feed it
///   back through `DashSlider::handle_event`
pub fn dash_slider<'a, Message>(
    slider: &'a DashSlider,
    on_event: impl Fn(SliderEvent) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let height = Length::Fixed(slider.metrics().height);
    let canvas = Canvas::new(SliderCanvas { slider, on_event }).height(height);

    match slider.options().track_width() {
        TrackWidth::Fixed(px) => canvas.width(Length::Fixed(px)).into(),
        TrackWidth::Fill(fraction) if fraction >= 1.0 => canvas.width(Length::Fill).into(),
        TrackWidth::Fill(fraction) => {
            // Partial width: share the row with an empty remainder
            let portion = ((fraction * 100.0).round() as u16).clamp(1, 99);
            row![
                canvas.width(Length::FillPortion(portion)),
                Space::new().width(Length::FillPortion(100 - portion)),
            ]
            .width(Length::Fill)
            .into()
        }
    }
}

impl DashSlider {
    /// Create the view element for this slider (see [`dash_slider`])
    pub fn view<'a, Message: Clone + 'a>(
        &'a self,
        on_event: impl Fn(SliderEvent) -> Message + 'a,
    ) -> Element<'a, Message> {
        dash_slider(self, on_event)
    }
}
