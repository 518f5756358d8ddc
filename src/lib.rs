pub mod assembler;
pub mod classify;
pub mod config;
pub mod duration;
pub mod emit;
pub mod error;
pub mod melodies;
pub mod note;
pub mod playback;
pub mod table;
pub mod translator;

pub use config::TranslatorConfig;
pub use error::*;
pub use note::*;
pub use table::DedupTable;
pub use translator::{translate, translate_with_config, Translation, Translator};

/// Compile a tune to a C header.
/// This is the main entry point for the library.
pub fn compile_header(source: &str) -> Result<String, TuneError> {
    let translation = translate(source)?;
    Ok(emit::c_header(&DedupTable::build(&translation.song)))
}

/// Compile a tune to a C header, failing on the first recoverable diagnostic too.
pub fn compile_header_strict(
    source: &str,
    config: &TranslatorConfig,
) -> Result<String, TuneError> {
    let translation = translate_with_config(source, config)?;
    if let Some(first) = translation.diagnostics.into_iter().next() {
        return Err(first);
    }
    Ok(emit::c_header(&DedupTable::build(&translation.song)))
}
