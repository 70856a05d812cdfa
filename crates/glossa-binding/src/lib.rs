mod binding;
mod options;

pub use binding::{TranslationBinding, english_binding, spanish_binding};
pub use options::{DEFAULT_DEBOUNCE, TranslationOptions, TranslationResult};
