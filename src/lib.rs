/*!
 * # Showcase - an ordered page of UI sections
 *
 * A Rust library for rendering a page as a fixed sequence of sections on a
 * pluggable presentation surface.
 *
 * ## Features
 *
 * - Page initialization that happens exactly once, before any rendering
 * - Four sections rendered in a fixed order:
 *   - Text: headings, plain and emphasized text, captions, code, math
 *   - Input: button, text input, slider and choice, echoed back
 *   - Data: random sample table and line chart
 *   - Status: info message, simulated progress cycle and pending spinner
 * - Terminal rendering with `indicatif` progress bars
 * - Recording surface that captures every call as a JSON-serializable event
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `app_controller`: Section orchestrator and render session
 * - `sections`: The page sections and their order
 * - `progress`: Progress-cycle state machine and pending phase
 * - `surface`: Presentation surface trait and implementations:
 *   - `surface::terminal`: Terminal output
 *   - `surface::recording`: Event recording
 * - `data`: Sample data generation
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod data;
pub mod errors;
pub mod progress;
pub mod sections;
pub mod surface;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::SectionOrchestrator;
pub use errors::{AppError, DelayError, SurfaceError};
pub use progress::{Delay, ProgressCycle, ThreadDelay};
pub use sections::{Section, SectionKind};
pub use surface::{PresentationSurface, RecordingSurface, TerminalSurface, WidgetValues};
