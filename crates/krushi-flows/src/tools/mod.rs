//! Direct-lookup tools.

mod languages;
mod weather;

pub use languages::{LanguageList, SupportedLanguages};
pub use weather::{
    describe_weather_code, CurrentWeather, GetCurrentWeather, OpenMeteoClient, WeatherError,
    WeatherInput, WeatherProvider,
};
