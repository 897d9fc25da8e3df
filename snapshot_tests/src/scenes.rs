use crate::{Result, SnapshotTestError};
use stackdom::prelude::*;
use std::path::PathBuf;

/// Names of the scenes known to the harness
pub const SCENES: &[&str] = &["counter", "nested_menu", "todo_list"];

/// Configuration for capturing a scene
pub struct CaptureConfig {
    /// Name of the scene to render
    pub scene_name: String,
    /// Path where the markup will be saved
    pub output_path: PathBuf,
}

/// Render a named scene to HTML on a fresh root
pub fn render_scene(scene_name: &str) -> Result<String> {
    let scene: fn() = match scene_name {
        "counter" => counter,
        "nested_menu" => nested_menu,
        "todo_list" => todo_list,
        other => return Err(SnapshotTestError::UnknownScene(other.to_string())),
    };

    let html = Root::new().render_to(&mut HtmlRenderer::new(), scene)?;
    if html.is_empty() {
        return Err(SnapshotTestError::Render(format!(
            "Scene '{}' rendered no markup",
            scene_name
        )));
    }
    Ok(html)
}

/// Render a scene and write its markup to the configured path
pub fn capture_scene(config: &CaptureConfig) -> Result<()> {
    let html = render_scene(&config.scene_name)?;
    std::fs::write(&config.output_path, format!("{}\n", html))?;
    Ok(())
}

fn counter() {
    let (count, _set_count) = declare_state(0);
    div(Some(props! { "class" => "counter" }), || {
        h1(None, "Counter");
        span(Some(props! { "aria-live" => "polite" }), *count);
        button(Some(props! { "onclick" => Callback::new(|| {}) }), "+1");
    });
}

fn nested_menu() {
    ul(Some(props! { "class" => "menu" }), || {
        li(None, || {
            a(Some(props! { "href" => "/" }), "Home");
        });
        li(None, || {
            a(Some(props! { "href" => "/docs" }), "Docs");
            ul(None, || {
                li(None, || {
                    a(Some(props! { "href" => "/docs/intro" }), "Intro & setup");
                });
                li(Some(props! { "hidden" => true }), "Draft");
            });
        });
    });
}

fn todo_list() {
    let todos = [("Write the reconstructor", true), ("Render to <html>", false)];
    div(Some(props! { "id" => "app" }), || {
        h1(None, "Todos");
        ol(None, || {
            for (title, done) in todos {
                li(Some(props! { "class" => if done { "done" } else { "open" } }), || {
                    span(None, title);
                    button(Some(props! { "disabled" => done }), "Toggle");
                });
            }
        });
        p(None, format!("{} items", todos.len()));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scene_renders() {
        for scene in SCENES {
            assert!(render_scene(scene).is_ok(), "scene '{}' failed", scene);
        }
    }

    #[test]
    fn test_unknown_scene_is_reported() {
        assert!(matches!(
            render_scene("missing"),
            Err(SnapshotTestError::UnknownScene(_))
        ));
    }
}
