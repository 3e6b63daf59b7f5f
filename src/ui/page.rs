use crate::models::ExportOptions;

use super::cards::ListRegion;

/// Presentation switches that print mode flips and must restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
    /// `printing-mode` on `<body>`.
    pub printing: bool,
    /// `hide-source` on `<body>`.
    pub hide_source_class: bool,
    /// Inline `display:none` on every `.meta-time`.
    pub time_hidden: bool,
    /// Inline `display:none` on every `.meta-source`.
    pub source_hidden: bool,
}

impl Presentation {
    fn body_class(&self) -> String {
        let mut classes = Vec::new();
        if self.printing {
            classes.push("printing-mode");
        }
        if self.hide_source_class {
            classes.push("hide-source");
        }
        classes.join(" ")
    }
}

const STYLE: &str = r#"
:root { --accent: #0071E3; --muted: #86868B; --card: #FFFFFF; --bg: #F5F5F7; }
* { box-sizing: border-box; }
body {
  margin: 0;
  font-family: -apple-system, "PingFang SC", "Microsoft YaHei", "Segoe UI", sans-serif;
  background: var(--bg);
  color: #1D1D1F;
}
.toolbar {
  position: sticky; top: 0; z-index: 10;
  display: flex; justify-content: space-between; align-items: center;
  padding: 16px 32px; background: rgba(245,245,247,0.85);
  backdrop-filter: blur(12px);
}
.toolbar h1 { font-size: 20px; font-weight: 600; margin: 0; }
.toolbar .actions { display: flex; gap: 12px; align-items: center; }
button { border: none; border-radius: 8px; padding: 6px 14px; cursor: pointer; font-size: 13px; }
#clear-all { background: transparent; color: #FF3B30; }
#export-btn { background: var(--accent); color: #fff; }
.export-menu-wrapper { position: relative; }
.export-menu {
  display: none; position: absolute; right: 0; top: 36px; min-width: 180px;
  background: #fff; border-radius: 10px; padding: 8px;
  box-shadow: 0 8px 24px rgba(0,0,0,0.12);
}
.export-menu.show { display: block; }
.export-option { padding: 8px 10px; border-radius: 6px; cursor: pointer; font-size: 13px; }
.export-option:hover { background: var(--bg); }
.export-settings { border-top: 1px solid #E5E5EA; margin-top: 6px; padding-top: 6px; font-size: 12px; color: var(--muted); }
.export-settings label { display: block; padding: 4px 10px; }
#note-list { max-width: 760px; margin: 24px auto; padding: 0 16px; }
.note-card {
  --mouse-x: 50%; --mouse-y: 50%;
  position: relative; margin-bottom: 16px; padding: 20px 24px;
  border-radius: 14px; background: var(--card);
  background-image: radial-gradient(circle at var(--mouse-x) var(--mouse-y), rgba(0,113,227,0.06), transparent 60%);
  box-shadow: 0 1px 3px rgba(0,0,0,0.06);
  transition: box-shadow 0.2s;
}
.note-card:hover { box-shadow: 0 6px 20px rgba(0,0,0,0.08); }
.note-card.editing { box-shadow: 0 0 0 2px var(--accent); }
.note-content { font-size: 15px; line-height: 1.7; white-space: pre-wrap; outline: none; }
.note-meta { margin-top: 12px; font-size: 12px; color: var(--muted); display: flex; gap: 16px; flex-wrap: wrap; }
.note-meta a { color: var(--accent); text-decoration: none; }
.delete-btn {
  position: absolute; top: 10px; right: 14px; cursor: pointer;
  color: var(--muted); font-size: 18px; opacity: 0; transition: opacity 0.2s;
}
.note-card:hover .delete-btn { opacity: 1; }

@media print {
  body { background: #fff; }
  .toolbar, .delete-btn { display: none !important; }
  #note-list { max-width: none; margin: 0; }
  .note-card { box-shadow: none; background-image: none; border-bottom: 1px solid #ddd; border-radius: 0; page-break-inside: avoid; }
  .screen-only { display: none !important; }
  .print-only { display: inline !important; }
  body.hide-source .meta-source { display: none !important; }
}
.printing-mode .toolbar, .printing-mode .delete-btn { display: none; }
.printing-mode .note-card { box-shadow: none; background-image: none; }
"#;

fn checked(on: bool) -> &'static str {
    if on {
        " checked"
    } else {
        ""
    }
}

/// The whole management page as currently presented.
pub fn render_page(
    list: &ListRegion,
    presentation: &Presentation,
    export_menu_open: bool,
    options: ExportOptions,
) -> String {
    let menu_class = if export_menu_open {
        "export-menu show"
    } else {
        "export-menu"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8">
  <title>句存 · LightNote</title>
  <style>{STYLE}</style>
</head>
<body class="{body_class}">
  <header class="toolbar">
    <h1>句存</h1>
    <div class="actions">
      <button id="clear-all">清空全部</button>
      <div class="export-menu-wrapper">
        <button id="export-btn">导出</button>
        <div id="export-menu" class="{menu_class}">
          <div class="export-option" data-format="txt">纯文本 (.txt)</div>
          <div class="export-option" data-format="word">Word 文档 (.docx)</div>
          <div class="export-option" data-format="pdf">PDF (打印)</div>
          <div class="export-settings">
            <label><input type="checkbox" id="export-include-time"{time_checked}> 包含时间</label>
            <label><input type="checkbox" id="export-include-source"{source_checked}> 包含来源</label>
          </div>
        </div>
      </div>
    </div>
  </header>
  <main id="note-list">
{list}
  </main>
</body>
</html>
"#,
        body_class = presentation.body_class(),
        time_checked = checked(options.include_time),
        source_checked = checked(options.include_source),
        list = list.render(presentation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;

    fn list() -> ListRegion {
        ListRegion::from_notes(vec![Note {
            id: 1,
            content: "hello".to_string(),
            source_url: "https://x.com".to_string(),
            source_title: Some("X".to_string()),
            timestamp: "2024/1/1 10:00:00".to_string(),
        }])
    }

    #[test]
    fn screen_page_has_controls_and_list() {
        let html = render_page(&list(), &Presentation::default(), false, ExportOptions::default());

        assert!(html.contains(r#"<body class="">"#));
        assert!(html.contains(r#"id="clear-all""#));
        assert!(html.contains(r#"class="export-menu""#));
        assert!(html.contains(r#"id="export-include-time" checked"#));
        assert!(html.contains(r#"id="export-include-source" checked"#));
        assert!(html.contains("hello"));
    }

    #[test]
    fn reflects_menu_and_checkbox_state() {
        let options = ExportOptions {
            include_time: false,
            include_source: true,
        };
        let html = render_page(&list(), &Presentation::default(), true, options);

        assert!(html.contains(r#"class="export-menu show""#));
        assert!(html.contains(r#"id="export-include-time">"#));
    }

    #[test]
    fn print_presentation_sets_body_classes() {
        let presentation = Presentation {
            printing: true,
            hide_source_class: true,
            time_hidden: false,
            source_hidden: true,
        };
        let html = render_page(&list(), &presentation, false, ExportOptions::default());
        assert!(html.contains(r#"<body class="printing-mode hide-source">"#));
    }
}
