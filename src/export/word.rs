//! HTML served with a Word MIME type and a `.docx` name. Word processors
//! open it as a document; it is not OOXML.

use crate::models::{ExportOptions, Note};
use crate::ui::escape_html;

pub const WORD_FILENAME: &str = "my-notes.docx";
pub const WORD_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const HEAD: &str = r#"<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <meta charset="UTF-8">
  <meta http-equiv="Content-Type" content="text/html; charset=utf-8">
  <style>
    body {
      font-family: "Microsoft YaHei", "Segoe UI", sans-serif;
      font-size: 11pt;
      line-height: 1.5;
      margin: 1in;
      color: #1D1D1F;
    }
    .note-item {
      margin-bottom: 24pt;
      page-break-inside: avoid;
    }
    .note-title {
      font-weight: normal;
      font-size: 12pt;
      margin-bottom: 8pt;
      font-family: "Microsoft YaHei", "Segoe UI", sans-serif;
      color: #000000;
    }
    .note-meta {
      font-size: 10pt;
      color: #666666;
      margin-bottom: 8pt;
      font-family: "Microsoft YaHei", "Segoe UI", sans-serif;
    }
    .note-meta-line {
      margin-bottom: 4pt;
      display: block;
    }
    .note-meta a {
      color: #0071E3;
      text-decoration: none;
    }
    hr {
      border: none;
      border-top: 1px solid #dddddd;
      margin: 16pt 0;
    }
    h1 {
      text-align: left;
      font-size: 18pt;
      margin-bottom: 30pt;
      font-family: "Microsoft YaHei", "Segoe UI", sans-serif;
      font-weight: normal;
      color: #000000;
    }
  </style>
</head>
<body>"#;

pub fn to_word_html(notes: &[Note], options: ExportOptions) -> String {
    let mut html = String::from(HEAD);
    html.push_str("<h1>全部笔记</h1>");

    for note in notes {
        html.push_str(r#"<div class="note-item">"#);
        html.push_str(&format!(
            r#"<div class="note-title">{}</div>"#,
            escape_html(&note.content)
        ));

        if options.include_time || options.include_source {
            html.push_str(r#"<div class="note-meta">"#);
            if options.include_time {
                html.push_str(&format!(
                    r#"<span class="note-meta-line">时间: {}</span>"#,
                    escape_html(&note.timestamp)
                ));
            }
            if options.include_source {
                html.push_str(&format!(
                    r#"<span class="note-meta-line">来源: <a href="{}">{}</a></span>"#,
                    escape_html(&note.source_url),
                    escape_html(note.display_title())
                ));
            }
            html.push_str("</div>");
        }

        html.push_str("<hr></div>");
    }

    html.push_str("</body></html>");
    html
}
