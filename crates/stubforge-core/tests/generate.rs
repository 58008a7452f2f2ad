//! End-to-end generation with the built-in template sets.

use std::fs;
use std::path::{Path, PathBuf};

use stubforge_core::{generate, Config, GenerationReport, Result};
use tempfile::tempdir;

const WIDGETS: &str = r#"
openapi: 3.0.0
info:
  title: Widgets
  version: 1.0.0
paths:
  /widgets/{id}:
    parameters:
      - name: id
        in: path
        required: true
        schema: { type: string }
    get:
      operationId: getWidget
      responses:
        "200": { description: ok }
    put:
      operationId: updateWidget
      requestBody:
        content:
          application/json:
            schema: { $ref: '#/components/schemas/Widget' }
      responses:
        "200": { description: ok }
components:
  schemas:
    Widget:
      type: object
      required: [id]
      properties:
        id: { type: string }
        name: { type: string }
"#;

fn templates_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../templates")
        .canonicalize()
        .expect("workspace templates directory")
}

fn config(dir: &Path, kind: &str) -> Result<Config> {
    let spec = dir.join("widgets.yaml");
    fs::write(&spec, WIDGETS)?;

    let mut config = Config::new(
        spec.to_string_lossy(),
        "App",
        dir.join("out").to_string_lossy(),
    );
    config.template_kind = kind.to_string();
    config.template_dir = Some(templates_root().to_string_lossy().into_owned());
    Ok(config)
}

#[tokio::test]
async fn test_generate_rust_widgets() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path(), "rust")?;

    let report = generate(&config).await?;
    assert_eq!(
        report,
        GenerationReport {
            handlers: vec!["WidgetsIdHandler".to_string()],
            hydrators: vec!["WidgetHydrator".to_string()],
            routes_written: true,
        }
    );

    let out = dir.path().join("out");
    let handler = fs::read_to_string(out.join("Handler/WidgetsIdHandler.rs"))?;
    assert!(handler.contains("pub struct WidgetsIdHandler;"));
    assert!(handler.contains("pub fn get("));
    assert!(handler.contains("pub fn put("));
    assert!(handler.find("pub fn get(") < handler.find("pub fn put("));

    let hydrator = fs::read_to_string(out.join("Hydrator/WidgetHydrator.rs"))?;
    assert!(hydrator.contains("pub struct WidgetHydrator;"));
    assert!(hydrator.contains("use App::Model::Widget;"));
    assert!(hydrator.contains("`id`: `String` (required)"));
    assert!(hydrator.contains("`name`: `String`"));

    let routes = fs::read_to_string(out.join("config/swagger.routes.rs"))?;
    assert_eq!(routes.matches("path: \"/widgets/:id\"").count(), 2);
    assert!(routes.contains("middleware: \"App::Handler::WidgetsIdHandler\""));
    assert!(routes.contains("model_middleware: Some(\"App::Model::Widget\")"));
    assert!(routes.contains("name: Some(\"getWidget\")"));
    assert!(routes.find("method: \"GET\"") < routes.find("method: \"PUT\""));
    Ok(())
}

#[tokio::test]
async fn test_generate_php_widgets() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path(), "php")?;

    generate(&config).await?;

    let out = dir.path().join("out");
    let handler = fs::read_to_string(out.join("Handler/WidgetsIdHandler.php"))?;
    assert!(handler.contains(r"namespace App\Handler;"));
    assert!(handler.contains("class WidgetsIdHandler"));

    let hydrator = fs::read_to_string(out.join("Hydrator/WidgetHydrator.php"))?;
    assert!(hydrator.contains(r"use App\Model\Widget;"));
    assert!(hydrator.contains("$model->name = $data['name'];"));

    let routes = fs::read_to_string(out.join("config/swagger.routes.php"))?;
    assert!(routes.contains(r"App\Model\Widget::class"));
    assert!(routes.contains("'path' => '/widgets/:id'"));
    Ok(())
}

#[tokio::test]
async fn test_existing_files_are_kept() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path(), "rust")?;
    generate(&config).await?;

    let handler_path = dir.path().join("out/Handler/WidgetsIdHandler.rs");
    fs::write(&handler_path, "// hand-written")?;

    let report = generate(&config).await?;
    assert_eq!(
        report,
        GenerationReport {
            routes_written: true,
            ..GenerationReport::default()
        }
    );
    assert_eq!(fs::read_to_string(&handler_path)?, "// hand-written");
    Ok(())
}

#[tokio::test]
async fn test_route_table_follows_new_paths() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path(), "rust")?;
    generate(&config).await?;

    let extended = WIDGETS.replace(
        "components:",
        r#"  /gadgets:
    get:
      operationId: listGadgets
      responses:
        "200": { description: ok }
components:"#,
    );
    fs::write(&config.spec, extended)?;

    let report = generate(&config).await?;
    assert_eq!(report.handlers, vec!["GadgetsHandler"]);
    assert!(report.hydrators.is_empty());
    assert!(report.routes_written);

    let routes = fs::read_to_string(dir.path().join("out/config/swagger.routes.rs"))?;
    assert!(routes.contains("name: Some(\"listGadgets\")"));
    assert!(routes.contains("name: Some(\"getWidget\")"));
    Ok(())
}

#[tokio::test]
async fn test_overwrite_is_idempotent() -> Result<()> {
    let dir = tempdir()?;
    let mut config = config(dir.path(), "rust")?;
    config.overwrite = true;

    generate(&config).await?;
    let first = fs::read_to_string(dir.path().join("out/Hydrator/WidgetHydrator.rs"))?;
    let report = generate(&config).await?;
    let second = fs::read_to_string(dir.path().join("out/Hydrator/WidgetHydrator.rs"))?;

    assert_eq!(first, second);
    assert_eq!(report.hydrators, vec!["WidgetHydrator"]);
    Ok(())
}

#[tokio::test]
async fn test_ignore_file_suppresses_routes() -> Result<()> {
    let dir = tempdir()?;
    let config = config(dir.path(), "rust")?;
    fs::create_dir_all(dir.path().join("out"))?;
    fs::write(dir.path().join("out/.stubforge-ignore"), "config/\n")?;

    let report = generate(&config).await?;
    assert!(!report.routes_written);
    assert!(!dir.path().join("out/config").exists());
    assert_eq!(report.handlers, vec!["WidgetsIdHandler"]);
    Ok(())
}
