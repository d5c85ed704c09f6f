// Presentation layer - Page, terminal and console adapters
pub mod console;
pub mod html;
pub mod text;
