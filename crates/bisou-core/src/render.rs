//! Frame document and image rendering.

use crate::view::{FrameView, Tone};
use bisou_types::BISOU;
use std::fmt::Write;

/// Protocol version declared in `fc:frame`.
pub const FRAME_VERSION: &str = "vNext";

pub const IMAGE_WIDTH: u32 = 1200;
pub const IMAGE_HEIGHT: u32 = 630;

/// Escape text for use in HTML/XML content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the frame HTML document for `view`.
///
/// `base_url` has no trailing slash; image and post-back URLs are made
/// absolute against it.
pub fn render_document(view: &FrameView, base_url: &str) -> String {
    let image_url = format!("{base_url}{}", view.step.image_path());
    let post_url = format!("{base_url}{}", view.step.post_path());

    let mut meta = String::new();
    let _ = writeln!(meta, r#"    <meta property="fc:frame" content="{FRAME_VERSION}" />"#);
    let _ = writeln!(
        meta,
        r#"    <meta property="fc:frame:image" content="{}" />"#,
        escape(&image_url)
    );
    let _ = writeln!(
        meta,
        r#"    <meta property="fc:frame:post_url" content="{}" />"#,
        escape(&post_url)
    );
    for (i, label) in view.buttons.iter().take(4).enumerate() {
        let _ = writeln!(
            meta,
            r#"    <meta property="fc:frame:button:{}" content="{}" />"#,
            i + 1,
            escape(label)
        );
    }
    if let Some(prompt) = &view.input_prompt {
        let _ = writeln!(
            meta,
            r#"    <meta property="fc:frame:input:text" content="{}" />"#,
            escape(prompt)
        );
    }
    let _ = writeln!(
        meta,
        r#"    <meta property="og:title" content="{}" />"#,
        escape(&view.title)
    );
    let _ = writeln!(
        meta,
        r#"    <meta property="og:description" content="{}" />"#,
        escape(&view.description)
    );
    let _ = writeln!(
        meta,
        r#"    <meta property="og:image" content="{}" />"#,
        escape(&image_url)
    );

    let mut body = String::new();
    let _ = writeln!(body, "    <h1>{}</h1>", escape(&view.title));
    for line in &view.lines {
        let _ = writeln!(body, "    <p>{}</p>", escape(line));
    }

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n    <title>{}</title>\n{meta}  </head>\n  <body>\n{body}  </body>\n</html>\n",
        escape(&view.title)
    )
}

/// Render the 1200x630 SVG image for `view`.
pub fn render_svg(view: &FrameView) -> String {
    let accent = match view.tone {
        Tone::Normal => "#ffffff",
        Tone::Warning => "#f44336",
    };
    let cx = IMAGE_WIDTH / 2;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg width="{IMAGE_WIDTH}" height="{IMAGE_HEIGHT}" viewBox="0 0 {IMAGE_WIDTH} {IMAGE_HEIGHT}" xmlns="http://www.w3.org/2000/svg">"#
    );
    svg.push_str(
        r##"  <defs>
    <linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="#0f0c29" />
      <stop offset="50%" stop-color="#302b63" />
      <stop offset="100%" stop-color="#24243e" />
    </linearGradient>
    <filter id="shadow" x="-20%" y="-20%" width="140%" height="140%">
      <feDropShadow dx="0" dy="4" stdDeviation="8" flood-opacity="0.3" />
    </filter>
  </defs>
  <rect width="100%" height="100%" fill="url(#grad)" />
"##,
    );

    match view.tone {
        Tone::Normal => {
            let _ = writeln!(
                svg,
                r##"  <circle cx="{cx}" cy="180" r="70" fill="#ffffff" opacity="0.1" />
  <circle cx="{cx}" cy="180" r="60" fill="#ffffff" opacity="0.2" />
  <text x="{cx}" y="180" font-family="Arial, sans-serif" font-size="70" font-weight="bold" text-anchor="middle" dominant-baseline="middle" fill="#ffffff">$</text>"##
            );
        }
        Tone::Warning => {
            let _ = writeln!(
                svg,
                r#"  <text x="{cx}" y="220" font-family="Arial, sans-serif" font-size="120" text-anchor="middle" fill="{accent}">!</text>"#
            );
        }
    }

    let _ = writeln!(
        svg,
        r#"  <text x="{cx}" y="320" font-family="Arial, sans-serif" font-size="52" font-weight="bold" text-anchor="middle" fill="{accent}" filter="url(#shadow)">{}</text>"#,
        escape(&view.heading)
    );

    for (i, line) in view.lines.iter().enumerate() {
        let y = 385 + 50 * i;
        let _ = writeln!(
            svg,
            r##"  <text x="{cx}" y="{y}" font-family="Arial, sans-serif" font-size="30" text-anchor="middle" fill="#ffffff" opacity="0.8">{}</text>"##,
            escape(line)
        );
    }

    let network = BISOU.network.to_uppercase();
    let _ = writeln!(
        svg,
        r##"  <rect x="{}" y="530" width="160" height="40" rx="20" fill="#ffffff" fill-opacity="0.1" />
  <text x="{cx}" y="558" font-family="Arial, sans-serif" font-size="20" text-anchor="middle" fill="#ffffff">{network} NETWORK</text>"##,
        cx - 80
    );
    svg.push_str("</svg>\n");
    svg
}
