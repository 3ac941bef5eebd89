pub mod help_bar;
pub mod location_header;
pub mod weather_body;
pub mod weather_display;

// Re-export core Component trait
pub use ipweather_core::Component;

pub use help_bar::{HelpBar, HelpBarProps};
pub use location_header::{LocationHeader, LocationHeaderProps, format_coordinates};
pub use weather_body::{WeatherBody, WeatherBodyProps};
pub use weather_display::{SPINNERS, TempUnit, WeatherDisplay, WeatherDisplayProps};
