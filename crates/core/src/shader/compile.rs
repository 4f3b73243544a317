//! Per-stage compilation against a [`GraphicsContext`].
//!
//! Compilation never fails a build by itself: the context is asked for its
//! info log and anything it reports is logged as a warning with the source
//! printed alongside. Only a missing shader object is an error.

use crate::context::{GraphicsContext, ShaderStage};
use crate::program::ProgramError;

/// Numbers each line of `source` and appends the compiler's `log`, so
/// line references in the log can be read against the GLSL.
///
/// Line numbers are right-aligned to the width of the largest one.
pub fn format_shader_error(source: &str, log: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let width = lines.len().max(1).to_string().len();

    let numbered = lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}: {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    match (numbered.is_empty(), log.is_empty()) {
        (true, true) => String::new(),
        (true, false) => log.to_string(),
        (false, true) => numbered,
        (false, false) => format!("{numbered}\n\n{log}"),
    }
}

/// Creates a shader object for `stage`, sets its source and compiles it.
///
/// # Errors
///
/// Returns `ProgramError::ShaderCreation` if the context cannot allocate
/// the shader object.
pub fn compile_shader<C: GraphicsContext>(
    ctx: &C,
    stage: ShaderStage,
    source: &str,
) -> Result<C::Shader, ProgramError> {
    let shader = ctx
        .create_shader(stage)
        .ok_or(ProgramError::ShaderCreation { stage })?;
    ctx.shader_source(shader, source);
    ctx.compile_shader(shader);

    let info_log = ctx.shader_info_log(shader);
    if !info_log.trim().is_empty() {
        log::warn!(
            "{stage} shader compiler output:\n{}",
            format_shader_error(source, info_log.trim_end())
        );
    }
    Ok(shader)
}
