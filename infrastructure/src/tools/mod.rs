//! Tool handler implementations
//!
//! One [`ToolHandler`](toolrouter_application::ToolHandler) per capability.
//! Calculator and QR run locally; the rest call remote services through the
//! shared [`http`] helpers, which race every request against the caller's
//! cancellation token.

pub mod calculator;
pub mod cookie_store;
pub mod http;
pub mod login;
pub mod palette;
pub mod qr;
pub mod search;
pub mod translator;
pub mod weather;

mod registry;

pub use calculator::CalculatorTool;
pub use cookie_store::CookieStore;
pub use login::LoginTool;
pub use palette::PaletteTool;
pub use qr::QrTool;
pub use registry::ToolRegistry;
pub use search::{SearchEndpoints, SearchTool};
pub use translator::TranslatorTool;
pub use weather::WeatherTool;
