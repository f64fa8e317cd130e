//! Dash Slider demo - font size and weight pickers with a live preview

use dash_slider::{
    default_options_path, load_options, theme, DashSlider, DiscreteValue, SliderError,
    SliderEvent, SliderOptions,
};
use env_logger::Env;
use iced::widget::{column, container, text};
use iced::{Background, Color, Element, Length, Size, Task};

const PREVIEW: &str = "The quick brown fox jumps over the lazy dog";

#[derive(Debug, Clone, Copy)]
enum Message {
    FontSize(SliderEvent),
    FontWeight(SliderEvent),
    DarkFontSize(SliderEvent),
    DarkFontWeight(SliderEvent),
}

#[derive(Debug, Clone, Copy)]
enum Picker {
    Size,
    Weight,
}

struct DemoApp {
    font_size: DashSlider,
    font_weight: DashSlider,
    dark_font_size: DashSlider,
    dark_font_weight: DashSlider,
    preview_size: f64,
    preview_weight: f64,
}

fn font_size_values() -> Vec<DiscreteValue> {
    (8..=17i32).map(|n| DiscreteValue::new(n as f64, n)).collect()
}

fn font_weight_values() -> Vec<DiscreteValue> {
    vec![
        DiscreteValue::new(100.0, "thin"),
        DiscreteValue::new(300.0, "light"),
        DiscreteValue::new(400.0, 400),
        DiscreteValue::new(500.0, 500),
        DiscreteValue::new(600.0, 600),
        DiscreteValue::new(700.0, "bold"),
        DiscreteValue::new(800.0, 800),
        DiscreteValue::new(900.0, "black"),
    ]
}

fn dark_options(base: &SliderOptions) -> SliderOptions {
    SliderOptions {
        grid_color: Some("#4F545C".into()),
        dash_color: Some("#4F545C".into()),
        dash_mark_color: Some("#4F545C".into()),
        dash_mark_selected_color: Some("#68d391".into()),
        dash_mark_font_weight: Some(900),
        dash_mark_font_size: Some(12.0),
        dash_mark_padding: Some(12.0),
        bar_color: Some("#ffffff".into()),
        ..base.clone()
    }
}

impl DemoApp {
    fn new() -> Result<Self, SliderError> {
        let options = load_options(&default_options_path());
        // Every weight gets a label; sizes keep the default step
        let weight_options = SliderOptions {
            step: options.step.or(Some(1)),
            ..options.clone()
        };
        let dark_size = dark_options(&options);
        let dark_weight = dark_options(&weight_options);

        let preview_size = 14.0;
        let preview_weight = 400.0;

        let mut font_size = DashSlider::new(font_size_values(), &options, Some(preview_size))?;
        let mut font_weight =
            DashSlider::new(font_weight_values(), &weight_options, Some(preview_weight))?;
        let dark_font_size = DashSlider::new(font_size_values(), &dark_size, Some(preview_size))?;
        let dark_font_weight = DashSlider::new(font_weight_values(), &dark_weight, Some(preview_weight))?;

        font_size.on_change(|v| log::info!("font size changed to {}", v));
        font_size.on_touched(|| log::debug!("font size slider touched"));
        font_weight.on_change(|v| log::info!("font weight changed to {}", v));
        font_weight.on_touched(|| log::debug!("font weight slider touched"));

        Ok(Self {
            font_size,
            font_weight,
            dark_font_size,
            dark_font_weight,
            preview_size,
            preview_weight,
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        // Light and dark sliders mirror each other through set_value
        let result = match message {
            Message::FontSize(event) => self
                .font_size
                .handle_event(event)
                .and_then(|v| self.mirror(v, Picker::Size, false)),
            Message::FontWeight(event) => self
                .font_weight
                .handle_event(event)
                .and_then(|v| self.mirror(v, Picker::Weight, false)),
            Message::DarkFontSize(event) => self
                .dark_font_size
                .handle_event(event)
                .and_then(|v| self.mirror(v, Picker::Size, true)),
            Message::DarkFontWeight(event) => self
                .dark_font_weight
                .handle_event(event)
                .and_then(|v| self.mirror(v, Picker::Weight, true)),
        };

        if let Err(e) = result {
            log::error!("slider event failed: {}", e);
        }
        Task::none()
    }

    /// Apply a committed value to the preview and the twin slider
    fn mirror(
        &mut self,
        committed: Option<f64>,
        picker: Picker,
        from_dark: bool,
    ) -> Result<(), SliderError> {
        let Some(value) = committed else {
            return Ok(());
        };

        let twin = match (picker, from_dark) {
            (Picker::Size, false) => &mut self.dark_font_size,
            (Picker::Size, true) => &mut self.font_size,
            (Picker::Weight, false) => &mut self.dark_font_weight,
            (Picker::Weight, true) => &mut self.font_weight,
        };
        twin.set_value(Some(value))?;

        match picker {
            Picker::Size => self.preview_size = value,
            Picker::Weight => self.preview_weight = value,
        }
        Ok(())
    }

    fn view(&self) -> Element<'_, Message> {
        let preview_font = theme::font("sans-serif", self.preview_weight as u16);
        let preview = |color: Color| {
            text(PREVIEW)
                .size(self.preview_size as f32)
                .font(preview_font)
                .color(color)
        };

        let light = column![
            text("Font size").size(13),
            self.font_size.view(Message::FontSize),
            text("Font weight").size(13),
            self.font_weight.view(Message::FontWeight),
            preview(Color::from_rgb8(0x2D, 0x37, 0x48)),
        ]
        .spacing(12);

        let dark = container(
            column![
                text("Font size").size(13).color(Color::WHITE),
                self.dark_font_size.view(Message::DarkFontSize),
                text("Font weight").size(13).color(Color::WHITE),
                self.dark_font_weight.view(Message::DarkFontWeight),
                preview(Color::WHITE),
            ]
            .spacing(12),
        )
        .padding(20)
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color::from_rgb8(0x2F, 0x33, 0x3A))),
            ..container::Style::default()
        });

        container(column![light, dark].spacing(32))
            .padding(30)
            .width(Length::Fill)
            .into()
    }
}

fn title(_app: &DemoApp) -> String {
    String::from("Dash Slider Demo")
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let app = match DemoApp::new() {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build demo sliders: {}", e);
            std::process::exit(1);
        }
    };

    // iced requires a Fn boot closure; it is only called once
    let app_cell = std::cell::RefCell::new(Some(app));
    iced::application(
        move || app_cell.borrow_mut().take().expect("boot called once"),
        DemoApp::update,
        DemoApp::view,
    )
    .title(title)
    .window_size(Size::new(960.0, 560.0))
    .run()
}
