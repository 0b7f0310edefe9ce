// ============================================================================
// HTML - index.html con un <script> por chunk inicial + arranque del shell
// ============================================================================
// Los chunks iniciales van como scripts clásicos, en orden, y registran sus
// módulos al ejecutarse. El glue de wasm-bindgen (`--target web`) va como
// módulo, que se ejecuta después de todos ellos.
// ============================================================================

use crate::models::ChunkManifest;

/// Glue que genera `wasm-pack build --target web` para este crate
pub const DEFAULT_BOOT_MODULE: &str = "lazy_route_shell.js";

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Lazy route shell</title>
</head>
<body>
    <div id="root"></div>
</body>
</html>
"#;

/// Scripts justo antes de `</body>`; sin `</body>` se añaden al final
pub fn render_index_html(template: &str, manifest: &ChunkManifest, boot_module: &str) -> String {
    let mut scripts: String = manifest
        .initial
        .iter()
        .map(|file| format!("<script src=\"{}\"></script>\n", manifest.url_for(file)))
        .collect();
    scripts.push_str(&format!(
        "<script type=\"module\">import init from \"{}\"; init();</script>\n",
        manifest.url_for(boot_module)
    ));

    match template.rfind("</body>") {
        Some(at) => format!("{}{}{}", &template[..at], scripts, &template[at..]),
        None => format!("{}{}", template, scripts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> ChunkManifest {
        ChunkManifest {
            public_path: "/".into(),
            initial: vec!["vendor.js".into(), "main.js".into()],
            ..Default::default()
        }
    }

    #[test]
    fn scripts_are_inserted_in_order_before_body_end() {
        let html = render_index_html(DEFAULT_TEMPLATE, &manifest(), DEFAULT_BOOT_MODULE);
        let vendor = html.find("/vendor.js").unwrap();
        let main = html.find("/main.js").unwrap();
        let boot = html.find("/lazy_route_shell.js").unwrap();
        let body_end = html.find("</body>").unwrap();
        assert!(vendor < main && main < boot && boot < body_end);
        assert!(html.contains(r#"<div id="root"></div>"#));
    }

    #[test]
    fn shell_is_booted_as_a_module() {
        let mut m = manifest();
        m.public_path = "/static/".into();
        let html = render_index_html(DEFAULT_TEMPLATE, &m, "pkg/shell.js");
        assert!(html.contains(
            r#"<script type="module">import init from "/static/pkg/shell.js"; init();</script>"#
        ));
    }

    #[test]
    fn template_without_body_gets_scripts_appended() {
        let html = render_index_html("<div id=\"root\"></div>", &manifest(), DEFAULT_BOOT_MODULE);
        assert!(html.starts_with("<div id=\"root\"></div><script src=\"/vendor.js\">"));
        assert!(html.ends_with("init();</script>\n"));
    }
}
