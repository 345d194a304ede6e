//! Static page skeleton hosting the map viewer.

use serde::{Deserialize, Serialize};

use map_core::{DrawMode, MapConfig};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    pub title: String,
    pub lang: String,
    pub font_family: String,
    pub font_href: String,
    /// Origins to preconnect to; the font-asset origin needs `crossorigin`.
    pub preconnect: Vec<Preconnect>,
    /// Module generated by `wasm-bindgen --target web`.
    pub script: String,
    pub container_id: String,
    /// Inlined as `window.__MAP_CONFIG` when present.
    pub map: Option<MapConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preconnect {
    pub href: String,
    #[serde(default)]
    pub crossorigin: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            title: "Map Viewer".to_string(),
            lang: "en".to_string(),
            font_family: "Inter".to_string(),
            font_href: "https://fonts.googleapis.com/css2?family=Inter:wght@400;600&display=swap"
                .to_string(),
            preconnect: vec![
                Preconnect {
                    href: "https://fonts.googleapis.com".to_string(),
                    crossorigin: false,
                },
                Preconnect {
                    href: "https://fonts.gstatic.com".to_string(),
                    crossorigin: true,
                },
            ],
            script: "./pkg/map_wasm.js".to_string(),
            container_id: "map".to_string(),
            map: None,
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// `</` would end the surrounding <script> element early.
fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn head(cfg: &ShellConfig) -> String {
    let mut h = String::new();
    h.push_str("<meta charset=\"utf-8\" />\n");
    h.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    h.push_str(&format!("<title>{}</title>\n", escape_html(&cfg.title)));
    for pc in &cfg.preconnect {
        let cross = if pc.crossorigin { " crossorigin" } else { "" };
        h.push_str(&format!(
            "<link rel=\"preconnect\" href=\"{}\"{} />\n",
            escape_html(&pc.href),
            cross
        ));
    }
    if !cfg.font_href.is_empty() {
        h.push_str(&format!(
            "<link rel=\"stylesheet\" href=\"{}\" />\n",
            escape_html(&cfg.font_href)
        ));
    }
    let family = cfg.font_family.replace(['"', '<', '>', ';', '{', '}'], "");
    h.push_str(&format!(
        "<style>\n\
         html, body {{ height: 100%; margin: 0; font-family: \"{family}\", sans-serif; }}\n\
         #{id} {{ position: absolute; inset: 0; }}\n\
         #controls {{ position: absolute; top: 12px; left: 12px; z-index: 1; display: flex; gap: 8px; align-items: center; background: #fff; padding: 6px 10px; border-radius: 4px; box-shadow: 0 1px 4px rgba(0,0,0,.3); }}\n\
         [hidden] {{ display: none !important; }}\n\
         </style>\n",
        id = escape_html(&cfg.container_id),
    ));
    h
}

fn controls() -> String {
    let mut c = String::new();
    c.push_str("<div id=\"controls\">\n");
    c.push_str("<label for=\"drawMode\">Geometry type</label>\n");
    c.push_str("<select id=\"drawMode\">\n");
    for mode in DrawMode::ALL {
        let selected = if mode == DrawMode::default() {
            " selected"
        } else {
            ""
        };
        c.push_str(&format!(
            "<option value=\"{m}\"{selected}>{m}</option>\n",
            m = mode.as_str()
        ));
    }
    c.push_str("</select>\n");
    c.push_str("<button id=\"measure\" type=\"button\" hidden></button>\n");
    c.push_str("<div id=\"measurement\" hidden></div>\n");
    c.push_str("</div>\n");
    c
}

/// Render the complete `index.html`.
pub fn render_document(cfg: &ShellConfig) -> Result<String, serde_json::Error> {
    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n");
    doc.push_str(&format!("<html lang=\"{}\">\n", escape_html(&cfg.lang)));
    doc.push_str("<head>\n");
    doc.push_str(&head(cfg));
    doc.push_str("</head>\n<body>\n");
    doc.push_str(&controls());
    doc.push_str(&format!(
        "<div id=\"{}\"></div>\n",
        escape_html(&cfg.container_id)
    ));
    if let Some(map) = &cfg.map {
        let json = serde_json::to_string(map)?;
        doc.push_str(&format!(
            "<script>window.__MAP_CONFIG = {};</script>\n",
            script_safe_json(&json)
        ));
    }
    let script = serde_json::to_string(&cfg.script)?;
    doc.push_str("<script type=\"module\">\n");
    doc.push_str(&format!("import init from {};\n", script_safe_json(&script)));
    doc.push_str("init();\n");
    doc.push_str("</script>\n");
    doc.push_str("</body>\n</html>\n");
    Ok(doc)
}
