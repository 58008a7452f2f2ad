//! Code generation entry point for stubforge

use std::path::PathBuf;

use crate::{
    config::Config,
    error::{Error, Result},
    events::LogListener,
    generator::{Codegen, GenerationReport},
    model::SchemaPropertyResolver,
    naming::Namer,
    openapi::OpenApiContext,
    output::{Emitter, FsWriter},
    templates::TemplateManager,
};

/// Main entry point for code generation
pub async fn generate(config: &Config) -> Result<GenerationReport> {
    // 1. Load OpenAPI document
    let spec = OpenApiContext::from_file_or_url(&config.spec).await?;
    log::info!(
        "Generating from '{}' v{} into {}",
        spec.title(),
        spec.version(),
        config.output_dir
    );

    // 2. Initialize template manager with template_dir from config if available
    let kind = config.template_kind()?;
    let templates = TemplateManager::new(kind, config.template_dir.as_ref().map(PathBuf::from))?;
    let missing = templates.missing_templates();
    if !missing.is_empty() {
        return Err(Error::template(format!(
            "Template set for '{}' is missing: {}",
            kind,
            missing.join(", ")
        )));
    }

    // 3. Run the generators
    let ignore = config.ignore_rules()?;
    let resolver = SchemaPropertyResolver::new(kind);
    let report = Codegen::new(
        Emitter::new(&templates, &ignore, &FsWriter, kind.extension()),
        Namer::new(kind.namespace_separator()),
        &resolver,
    )
    .with_listener(&LogListener)
    .run(
        spec.document(),
        &config.namespace,
        &config.output_dir(),
        &config.config_dir(),
    )?;

    log::info!(
        "Generated {} handler(s), {} hydrator(s), route table {}",
        report.handlers.len(),
        report.hydrators.len(),
        if report.routes_written { "written" } else { "skipped" }
    );
    Ok(report)
}
