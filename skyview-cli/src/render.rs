use std::fmt::Write as _;

use skyview_core::{DisplayViewModel, PresentationError, RenderSink};

/// Prints view models to stdout and failures to stderr.
#[derive(Debug)]
pub struct TerminalSink {
    json: bool,
}

impl TerminalSink {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl RenderSink for TerminalSink {
    fn render(&mut self, view: &DisplayViewModel) {
        if self.json {
            match serde_json::to_string_pretty(view) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("Error: failed to encode view model: {e}"),
            }
        } else {
            print!("{}", format_view(view));
        }
    }

    fn report(&mut self, error: &PresentationError) {
        eprintln!("Error: {}", error.user_message());
    }
}

fn format_view(view: &DisplayViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.city_name);
    let _ = writeln!(out, "{}, {}", view.day_name, view.date_text);
    let _ = writeln!(out, "{}  {}", view.temperature_text, view.condition_text);
    let _ = writeln!(out, "{} | {}", view.min_temp_text, view.max_temp_text);
    let _ = writeln!(out, "Humidity:  {}", view.humidity_text);
    let _ = writeln!(out, "Wind:      {}", view.wind_speed_text);
    let _ = writeln!(out, "Pressure:  {}", view.pressure_text);
    let _ = writeln!(out, "Sunrise:   {}", view.sunrise_text);
    let _ = writeln!(out, "Sunset:    {}", view.sunset_text);
    let _ = writeln!(
        out,
        "Theme:     {} (background: {}, animation: {})",
        view.theme,
        view.theme.background(),
        view.theme.animation()
    );
    out
}
